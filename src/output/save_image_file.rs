// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/output/save_image_file.rs - 保存分割结果
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

use thiserror::Error;
use tracing::info;

use crate::{Stage, frame::ImageBuffer, output::SaveOutcome};

#[derive(Error, Debug)]
pub enum SaveImageFileError {
  #[error("cannot create directory {}", .path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("cannot encode result to {}", .path.display())]
  Encode {
    path: PathBuf,
    #[source]
    source: image::ImageError,
  },
  #[error("cannot encode a {0}-channel result as an image")]
  UnsupportedChannels(u8),
}

/// 保存分割结果。
///
/// 默认只确保目标目录存在而不写入图像，`write_image(true)` 时才真正编码输出。
#[derive(Debug, Clone)]
pub struct SaveImageFileOutput {
  path: PathBuf,
  write_image: bool,
}

impl SaveImageFileOutput {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      write_image: false,
    }
  }

  pub fn write_image(mut self, write_image: bool) -> Self {
    self.write_image = write_image;
    self
  }

  fn ensure_parent(&self) -> Result<(), SaveImageFileError> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent).map_err(|source| SaveImageFileError::CreateDir {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    Ok(())
  }

  #[cfg(feature = "save_image_file")]
  fn save_image(&self, image: &ImageBuffer) -> Result<bool, SaveImageFileError> {
    let image = image
      .to_dynamic_image()
      .ok_or(SaveImageFileError::UnsupportedChannels(image.channels()))?;

    image
      .save(&self.path)
      .map_err(|source| SaveImageFileError::Encode {
        path: self.path.clone(),
        source,
      })?;

    info!("保存图像到文件: {}", self.path.display());
    Ok(true)
  }

  #[cfg(not(feature = "save_image_file"))]
  fn save_image(&self, _image: &ImageBuffer) -> Result<bool, SaveImageFileError> {
    tracing::warn!("未启用 save_image_file 特性，跳过写入: {}", self.path.display());
    Ok(false)
  }
}

impl Stage for SaveImageFileOutput {
  type Input = ImageBuffer;
  type Output = SaveOutcome;
  type Error = SaveImageFileError;

  const NAME: &'static str = "save-result";

  fn run(&self, result: ImageBuffer) -> Result<SaveOutcome, SaveImageFileError> {
    info!("Saving result to {}...", self.path.display());
    self.ensure_parent()?;

    let written = if self.write_image {
      self.save_image(&result)?
    } else {
      info!("Note: This is a placeholder. Integrate with your actual models.");
      false
    };

    Ok(SaveOutcome {
      path: self.path.clone(),
      written,
    })
  }
}
