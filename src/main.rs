// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/main.rs - 项目主程序
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

use std::{io::IsTerminal, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use livseg::{
  args::{Args, InvocationArguments},
  model::ModelKind,
  output::{SaveImageFileOutput, SegmentationReport, resolve_output_path},
  task::{SegmentationRequest, SegmentationTask, TaskSummary},
};

fn run(args: &Args, invocation: &InvocationArguments) -> Result<TaskSummary> {
  let output_path = resolve_output_path(&invocation.output);
  let output = SaveImageFileOutput::new(output_path).write_image(args.write_result);

  SegmentationTask::placeholder(output)
    .with_policy(args.save_policy())
    .run_task(SegmentationRequest {
      model: invocation.model,
      input: invocation.input.clone(),
    })
}

fn main() -> ExitCode {
  let args = Args::parse();

  tracing_subscriber::fmt()
    .with_max_level(args.log_level)
    .with_ansi(std::io::stdout().is_terminal())
    .init();

  if args.list_models {
    for kind in ModelKind::ALL {
      println!("{}", kind);
    }
    return ExitCode::SUCCESS;
  }

  let Some(invocation) = args.invocation() else {
    eprintln!("Error during segmentation: --input, --model and --output are required");
    return ExitCode::FAILURE;
  };

  info!("模型: {}", invocation.model);
  info!("输入图像: {}", invocation.input.display());
  info!("输出路径: {}", invocation.output.display());

  let mut outcome = run(&args, &invocation);

  if let Some(report_path) = &args.report {
    let report = match &outcome {
      Ok(summary) => SegmentationReport::completed(
        summary.model,
        &summary.input,
        summary.saved.as_ref().map(|s| s.path.as_path()),
      ),
      Err(e) => {
        SegmentationReport::failed(invocation.model, &invocation.input, format!("{:#}", e))
      }
    };
    if let Err(e) = report.write_to(report_path) {
      let e = anyhow::Error::new(e);
      error!("写入报告失败: {:#}", e);
      // 任务本身的错误优先
      if outcome.is_ok() {
        outcome = Err(e);
      }
    }
  }

  match outcome {
    Ok(summary) => {
      info!("总耗时: {:.2?}", summary.elapsed);
      println!("Segmentation completed successfully!");
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!("分割失败: {:#}", e);
      eprintln!("Error during segmentation: {:#}", e);
      ExitCode::FAILURE
    }
  }
}
