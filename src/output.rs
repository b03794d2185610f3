// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/output.rs - 输出定义
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

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

mod report;
mod save_image_file;

pub use self::report::{ReportError, SegmentationReport};
pub use self::save_image_file::{SaveImageFileError, SaveImageFileOutput};

/// 保存失败时的处理方式
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SavePolicy {
  /// 只记录日志，任务仍视为成功
  #[default]
  Lenient,
  /// 保存失败即任务失败
  Strict,
}

/// 保存环节的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
  pub path: PathBuf,
  /// 是否真正写入了图像数据
  pub written: bool,
}

/// 解析输出路径。
///
/// 指向已存在的目录或以路径分隔符结尾时，在该目录下生成
/// `segmented_<毫秒时间戳>.png`；否则原样返回。
pub fn resolve_output_path(output: &Path) -> PathBuf {
  resolve_output_path_at(output, Utc::now())
}

pub fn resolve_output_path_at(output: &Path, now: DateTime<Utc>) -> PathBuf {
  let names_directory = output
    .as_os_str()
    .to_string_lossy()
    .chars()
    .last()
    .is_some_and(std::path::is_separator);

  if names_directory || output.is_dir() {
    output.join(format!("segmented_{}.png", now.timestamp_millis()))
  } else {
    output.to_path_buf()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn fixed_time() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
  }

  #[test]
  fn file_path_is_kept() {
    let path = Path::new("out/result.png");
    assert_eq!(resolve_output_path_at(path, fixed_time()), path);
  }

  #[test]
  fn trailing_separator_names_a_directory() {
    let path = Path::new("out/");
    assert_eq!(
      resolve_output_path_at(path, fixed_time()),
      Path::new("out").join("segmented_1700000000123.png")
    );
  }

  #[test]
  fn existing_directory_gets_generated_name() {
    let dir = tempfile::tempdir().unwrap();
    let resolved = resolve_output_path_at(dir.path(), fixed_time());
    assert_eq!(resolved, dir.path().join("segmented_1700000000123.png"));
  }

  #[test]
  fn default_policy_is_lenient() {
    assert_eq!(SavePolicy::default(), SavePolicy::Lenient);
  }
}
