// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/lib.rs - 库主文件
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

pub mod args;
pub mod frame;
pub mod input;
pub mod model;
pub mod output;
pub mod task;

/// 流水线中的一个环节：给定类型化的输入，产生类型化的输出或类型化的错误。
///
/// 尚未接入真实实现的环节使用 [`std::convert::Infallible`] 作为错误类型。
pub trait Stage {
  type Input;
  type Output;
  type Error: std::error::Error + Send + Sync + 'static;

  /// 日志中使用的环节名称
  const NAME: &'static str;

  fn run(&self, input: Self::Input) -> Result<Self::Output, Self::Error>;
}
