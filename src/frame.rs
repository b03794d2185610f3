// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/frame.rs - 图像缓冲区定义
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use image::DynamicImage;

pub trait AsNhwcFrame {
  fn as_nhwc(&self) -> &[u8];
}

/// 解码后的像素数据，按 HWC 交错存放，每个通道 8 位。
///
/// 不约束形状、通道布局或归一化方式，只保留解码器给出的通道数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
  width: u32,
  height: u32,
  channels: u8,
  data: Box<[u8]>,
}

impl ImageBuffer {
  pub fn with_shape(height: u32, width: u32, channels: u8) -> Self {
    let size = channels as usize * width as usize * height as usize;
    Self {
      width,
      height,
      channels,
      data: vec![0u8; size].into_boxed_slice(),
    }
  }

  /// 由原始数据构造，长度不匹配时返回 `None`
  pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Option<Self> {
    if data.len() != channels as usize * width as usize * height as usize {
      return None;
    }
    Some(Self {
      width,
      height,
      channels,
      data: data.into_boxed_slice(),
    })
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn channels(&self) -> u8 {
    self.channels
  }

  pub fn to_dynamic_image(&self) -> Option<DynamicImage> {
    let (w, h) = (self.width, self.height);
    let data = self.data.to_vec();
    match self.channels {
      1 => image::GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
      2 => image::GrayAlphaImage::from_raw(w, h, data).map(DynamicImage::ImageLumaA8),
      3 => image::RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
      4 => image::RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
      _ => None,
    }
  }
}

impl From<DynamicImage> for ImageBuffer {
  fn from(image: DynamicImage) -> Self {
    let (width, height) = (image.width(), image.height());
    let (channels, data) = match image.color().channel_count() {
      1 => (1, image.into_luma8().into_raw()),
      2 => (2, image.into_luma_alpha8().into_raw()),
      3 => (3, image.into_rgb8().into_raw()),
      _ => (4, image.into_rgba8().into_raw()),
    };

    Self {
      width,
      height,
      channels,
      data: data.into_boxed_slice(),
    }
  }
}

impl AsMut<[u8]> for ImageBuffer {
  fn as_mut(&mut self) -> &mut [u8] {
    &mut self.data
  }
}

impl AsNhwcFrame for ImageBuffer {
  fn as_nhwc(&self) -> &[u8] {
    &self.data
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

  #[test]
  fn keeps_grey_channel_count() {
    let grey = GrayImage::from_pixel(4, 3, Luma([7]));
    let buffer = ImageBuffer::from(DynamicImage::ImageLuma8(grey));
    assert_eq!(buffer.channels(), 1);
    assert_eq!((buffer.width(), buffer.height()), (4, 3));
    assert_eq!(buffer.as_nhwc().len(), 12);
    assert!(buffer.as_nhwc().iter().all(|&v| v == 7));
  }

  #[test]
  fn rgb_data_is_interleaved() {
    let mut rgb = RgbImage::new(2, 1);
    rgb.put_pixel(0, 0, Rgb([1, 2, 3]));
    rgb.put_pixel(1, 0, Rgb([4, 5, 6]));
    let buffer = ImageBuffer::from(DynamicImage::ImageRgb8(rgb));
    assert_eq!(buffer.as_nhwc(), &[1, 2, 3, 4, 5, 6]);
  }

  #[test]
  fn sixteen_bit_rgba_is_narrowed() {
    let image = DynamicImage::ImageRgba16(image::ImageBuffer::from_pixel(
      1,
      1,
      Rgba([u16::MAX, 0, u16::MAX, u16::MAX]),
    ));
    let buffer = ImageBuffer::from(image);
    assert_eq!(buffer.channels(), 4);
    assert_eq!(buffer.as_nhwc(), &[255, 0, 255, 255]);
  }

  #[test]
  fn converts_back_to_dynamic_image() {
    let rgba = RgbaImage::from_pixel(3, 2, Rgba([9, 8, 7, 6]));
    let buffer = ImageBuffer::from(DynamicImage::ImageRgba8(rgba.clone()));
    let image = buffer.to_dynamic_image().expect("4 通道应可转换");
    assert_eq!(image.to_rgba8(), rgba);
  }

  #[test]
  fn rejects_mismatched_raw_length() {
    assert!(ImageBuffer::from_raw(2, 2, 3, vec![0; 11]).is_none());
    let buffer = ImageBuffer::from_raw(2, 2, 3, vec![0; 12]).expect("长度匹配");
    assert_eq!(buffer, ImageBuffer::with_shape(2, 2, 3));
  }

  #[test]
  fn unsupported_channel_count_has_no_image() {
    let mut buffer = ImageBuffer::with_shape(1, 1, 5);
    buffer.as_mut()[0] = 1;
    assert!(buffer.to_dynamic_image().is_none());
  }
}
