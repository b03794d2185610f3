// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/args.rs - 项目参数配置
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

use clap::Parser;

use crate::{model::ModelKind, output::SavePolicy};

/// Liver Tumor Segmentation Inference
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 输入图像路径
  #[arg(long, value_name = "FILE", required_unless_present = "list_models")]
  pub input: Option<PathBuf>,

  /// 分割模型
  #[arg(
    long,
    value_enum,
    value_name = "MODEL",
    required_unless_present = "list_models"
  )]
  pub model: Option<ModelKind>,

  /// 输出路径，指向目录或以 / 结尾时自动生成文件名
  #[arg(long, value_name = "OUTPUT", required_unless_present = "list_models")]
  pub output: Option<PathBuf>,

  /// 将后处理结果编码写入输出路径
  #[arg(long)]
  pub write_result: bool,

  /// 保存失败时以非零状态退出
  #[arg(long)]
  pub strict_save: bool,

  /// 将 JSON 格式的运行报告写入该文件
  #[arg(long, value_name = "FILE")]
  pub report: Option<PathBuf>,

  /// 日志级别 (trace, debug, info, warn, error)
  #[arg(long, default_value = "info", value_name = "LEVEL")]
  pub log_level: tracing::Level,

  /// 列出可用的模型后退出
  #[arg(long, exclusive = true)]
  pub list_models: bool,
}

/// 单次调用的参数，解析后不再改变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationArguments {
  pub input: PathBuf,
  pub model: ModelKind,
  pub output: PathBuf,
}

impl Args {
  /// `--list-models` 时为 `None`
  pub fn invocation(&self) -> Option<InvocationArguments> {
    Some(InvocationArguments {
      input: self.input.clone()?,
      model: self.model?,
      output: self.output.clone()?,
    })
  }

  pub fn save_policy(&self) -> SavePolicy {
    if self.strict_save {
      SavePolicy::Strict
    } else {
      SavePolicy::Lenient
    }
  }
}
