// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/task.rs - 分割任务
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

use std::{
  path::PathBuf,
  time::{Duration, Instant},
};

use tracing::{debug, error, info, warn};

use crate::{
  Stage,
  input::ImageFileInput,
  model::{ModelKind, ModelLoader, PassthroughInference, PassthroughPostprocess},
  output::{SaveImageFileOutput, SaveOutcome, SavePolicy},
};

/// 一次分割任务的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationRequest {
  pub model: ModelKind,
  pub input: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
  pub model: ModelKind,
  pub input: PathBuf,
  /// 宽松策略下保存失败时为 `None`
  pub saved: Option<SaveOutcome>,
  pub elapsed: Duration,
}

/// 依次执行 加载模型 → 读取图像 → 推理 → 后处理 → 保存 的单次任务
pub struct SegmentationTask<L, D, I, P, S> {
  loader: L,
  decoder: D,
  inference: I,
  postprocess: P,
  output: S,
  policy: SavePolicy,
}

pub type PlaceholderTask = SegmentationTask<
  ModelLoader,
  ImageFileInput,
  PassthroughInference,
  PassthroughPostprocess,
  SaveImageFileOutput,
>;

impl PlaceholderTask {
  pub fn placeholder(output: SaveImageFileOutput) -> Self {
    SegmentationTask::new(
      ModelLoader,
      ImageFileInput,
      PassthroughInference,
      PassthroughPostprocess,
      output,
    )
  }
}

impl<L, D, I, P, S> SegmentationTask<L, D, I, P, S> {
  pub fn new(loader: L, decoder: D, inference: I, postprocess: P, output: S) -> Self {
    Self {
      loader,
      decoder,
      inference,
      postprocess,
      output,
      policy: SavePolicy::default(),
    }
  }

  pub fn with_policy(mut self, policy: SavePolicy) -> Self {
    self.policy = policy;
    self
  }
}

fn run_stage<T: Stage>(stage: &T, input: T::Input) -> Result<T::Output, T::Error> {
  debug!("进入环节: {}", T::NAME);
  let now = Instant::now();
  let result = stage.run(input);
  debug!("环节 {} 完成，耗时: {:.2?}", T::NAME, now.elapsed());
  result
}

impl<L, D, I, P, S> SegmentationTask<L, D, I, P, S>
where
  L: Stage<Input = ModelKind>,
  D: Stage<Input = PathBuf>,
  I: Stage<Input = (L::Output, D::Output)>,
  P: Stage<Input = I::Output>,
  S: Stage<Input = P::Output, Output = SaveOutcome>,
{
  pub fn run_task(&self, request: SegmentationRequest) -> anyhow::Result<TaskSummary> {
    info!("开始任务...");
    let now = Instant::now();

    let model = run_stage(&self.loader, request.model)?;
    let image = run_stage(&self.decoder, request.input.clone())?;
    let prediction = run_stage(&self.inference, (model, image))?;
    let result = run_stage(&self.postprocess, prediction)?;

    let saved = match run_stage(&self.output, result) {
      Ok(outcome) => Some(outcome),
      Err(e) => {
        let e = anyhow::Error::new(e);
        match self.policy {
          SavePolicy::Lenient => {
            warn!("Error saving result: {:#}", e);
            None
          }
          SavePolicy::Strict => {
            error!("保存结果失败: {:#}", e);
            return Err(e);
          }
        }
      }
    };

    let elapsed = now.elapsed();
    info!("任务完成，耗时: {:.2?}", elapsed);

    Ok(TaskSummary {
      model: request.model,
      input: request.input,
      saved,
      elapsed,
    })
  }
}
