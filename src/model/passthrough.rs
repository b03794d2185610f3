// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/model/passthrough.rs - 占位推理与后处理
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

use std::convert::Infallible;

use tracing::{debug, info};

use crate::{
  Stage,
  frame::{AsNhwcFrame, ImageBuffer},
  model::ModelHandle,
};

/// 恒等推理：不做任何模型计算，原样返回输入图像
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughInference;

impl Stage for PassthroughInference {
  type Input = (ModelHandle, ImageBuffer);
  type Output = ImageBuffer;
  type Error = Infallible;

  const NAME: &'static str = "inference";

  fn run(&self, (model, image): Self::Input) -> Result<ImageBuffer, Infallible> {
    info!("Performing inference...");
    debug!(
      "模型 {} 输入尺寸: {}x{}x{} ({} 字节)",
      model.kind(),
      image.width(),
      image.height(),
      image.channels(),
      image.as_nhwc().len()
    );
    Ok(image)
  }
}

/// 恒等后处理
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughPostprocess;

impl Stage for PassthroughPostprocess {
  type Input = ImageBuffer;
  type Output = ImageBuffer;
  type Error = Infallible;

  const NAME: &'static str = "postprocess";

  fn run(&self, prediction: ImageBuffer) -> Result<ImageBuffer, Infallible> {
    info!("Postprocessing result...");
    Ok(prediction)
  }
}
