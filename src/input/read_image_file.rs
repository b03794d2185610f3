// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/input/read_image_file.rs - 图像文件输入
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

use std::path::PathBuf;

use image::ImageReader;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{Stage, frame::ImageBuffer};

#[derive(Error, Debug)]
pub enum ImageFileInputError {
  #[error("cannot open image file {}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("cannot decode image file {}", .path.display())]
  Decode {
    path: PathBuf,
    #[source]
    source: image::ImageError,
  },
}

impl ImageFileInputError {
  pub fn path(&self) -> &std::path::Path {
    match self {
      ImageFileInputError::Io { path, .. } | ImageFileInputError::Decode { path, .. } => path,
    }
  }
}

/// 读取并解码图像文件，格式由文件内容判断
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileInput;

impl Stage for ImageFileInput {
  type Input = PathBuf;
  type Output = ImageBuffer;
  type Error = ImageFileInputError;

  const NAME: &'static str = "load-image";

  fn run(&self, path: PathBuf) -> Result<ImageBuffer, ImageFileInputError> {
    info!("Loading image from {}...", path.display());

    let reader = match ImageReader::open(&path).and_then(|r| r.with_guessed_format()) {
      Ok(reader) => reader,
      Err(source) => {
        error!("无法打开图像文件 {}: {}", path.display(), source);
        return Err(ImageFileInputError::Io { path, source });
      }
    };

    let image = match reader.decode() {
      Ok(image) => image,
      Err(source) => {
        error!("无法解码图像文件 {}: {}", path.display(), source);
        return Err(ImageFileInputError::Decode { path, source });
      }
    };

    let buffer = ImageBuffer::from(image);
    debug!(
      "图像尺寸: {}x{}, 通道数: {}",
      buffer.width(),
      buffer.height(),
      buffer.channels()
    );
    Ok(buffer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{Rgb, RgbImage};

  #[test]
  fn decodes_png_by_content() {
    let dir = tempfile::tempdir().unwrap();
    // 扩展名与内容不一致时依然按内容解码
    let path = dir.path().join("scan.dat");
    RgbImage::from_pixel(100, 100, Rgb([10, 20, 30]))
      .save_with_format(&path, image::ImageFormat::Png)
      .unwrap();

    let buffer = ImageFileInput.run(path).unwrap();
    assert_eq!((buffer.width(), buffer.height()), (100, 100));
    assert_eq!(buffer.channels(), 3);
  }

  #[test]
  fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.png");

    let err = ImageFileInput.run(path.clone()).unwrap_err();
    assert!(matches!(err, ImageFileInputError::Io { .. }));
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().contains("missing.png"));
  }

  #[test]
  fn garbage_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not an image").unwrap();

    let err = ImageFileInput.run(path).unwrap_err();
    assert!(matches!(err, ImageFileInputError::Decode { .. }));
  }
}
