// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/model.rs - 模型
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

use std::{convert::Infallible, fmt, str::FromStr};

use clap::ValueEnum;
use thiserror::Error;
use tracing::info;

use crate::Stage;

/// 可选的分割模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ModelKind {
  #[value(name = "unet")]
  UNet,
  #[value(name = "unet++")]
  UNetPlusPlus,
  #[value(name = "attention")]
  Attention,
  #[value(name = "trans-unet")]
  TransUNet,
  #[value(name = "ensemble")]
  Ensemble,
}

impl ModelKind {
  pub const ALL: [ModelKind; 5] = [
    ModelKind::UNet,
    ModelKind::UNetPlusPlus,
    ModelKind::Attention,
    ModelKind::TransUNet,
    ModelKind::Ensemble,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      ModelKind::UNet => "unet",
      ModelKind::UNetPlusPlus => "unet++",
      ModelKind::Attention => "attention",
      ModelKind::TransUNet => "trans-unet",
      ModelKind::Ensemble => "ensemble",
    }
  }
}

impl fmt::Display for ModelKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("未知模型 '{0}'，可选: unet, unet++, attention, trans-unet, ensemble")]
pub struct UnknownModelError(pub String);

impl FromStr for ModelKind {
  type Err = UnknownModelError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ModelKind::ALL
      .into_iter()
      .find(|kind| kind.as_str() == s)
      .ok_or_else(|| UnknownModelError(s.to_string()))
  }
}

/// 已加载模型的不透明句柄
///
/// 目前不持有任何权重，只记录选择的模型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
  kind: ModelKind,
}

impl ModelHandle {
  pub fn kind(&self) -> ModelKind {
    self.kind
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ModelLoader;

impl Stage for ModelLoader {
  type Input = ModelKind;
  type Output = ModelHandle;
  type Error = Infallible;

  const NAME: &'static str = "load-model";

  fn run(&self, kind: ModelKind) -> Result<ModelHandle, Infallible> {
    info!("Loading {} model...", kind);
    Ok(ModelHandle { kind })
  }
}

mod passthrough;
pub use self::passthrough::{PassthroughInference, PassthroughPostprocess};
