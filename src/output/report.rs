// 该文件是 Livseg （肝脏肿瘤分割） 项目的一部分。
// src/output/report.rs - 运行结果报告
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
  fmt::Display,
  path::{Path, PathBuf},
};

use serde_json::{Value, json};
use thiserror::Error;
use tracing::info;

use crate::model::ModelKind;

#[derive(Error, Debug)]
pub enum ReportError {
  #[error("cannot write report {}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("cannot serialize report")]
  Serialize(#[from] serde_json::Error),
}

/// 分割任务的结果报告，字段与后端服务的响应一致
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationReport {
  pub message: String,
  pub segmented_image_path: Option<PathBuf>,
  pub original_image_path: PathBuf,
  pub success: bool,
  pub model_used: ModelKind,
}

impl SegmentationReport {
  pub fn completed(model: ModelKind, input: &Path, output: Option<&Path>) -> Self {
    Self {
      message: "Segmentation completed successfully".to_string(),
      segmented_image_path: output.map(Path::to_path_buf),
      original_image_path: input.to_path_buf(),
      success: true,
      model_used: model,
    }
  }

  pub fn failed(model: ModelKind, input: &Path, reason: impl Display) -> Self {
    Self {
      message: format!("Segmentation failed: {}", reason),
      segmented_image_path: None,
      original_image_path: input.to_path_buf(),
      success: false,
      model_used: model,
    }
  }

  pub fn to_json(&self) -> Value {
    json!({
      "message": self.message,
      "segmentedImagePath": self
        .segmented_image_path
        .as_ref()
        .map(|p| p.display().to_string()),
      "originalImagePath": self.original_image_path.display().to_string(),
      "success": self.success,
      "modelUsed": self.model_used.as_str()
    })
  }

  pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
    let content = serde_json::to_string_pretty(&self.to_json())?;
    std::fs::write(path, content).map_err(|source| ReportError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    info!("报告已写入: {}", path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn completed_report_shape() {
    let report = SegmentationReport::completed(
      ModelKind::UNetPlusPlus,
      Path::new("scans/ct.png"),
      Some(Path::new("out/result.png")),
    );
    assert_eq!(
      report.to_json(),
      json!({
        "message": "Segmentation completed successfully",
        "segmentedImagePath": "out/result.png",
        "originalImagePath": "scans/ct.png",
        "success": true,
        "modelUsed": "unet++"
      })
    );
  }

  #[test]
  fn failed_report_has_no_output() {
    let report = SegmentationReport::failed(ModelKind::Ensemble, Path::new("ct.png"), "boom");
    let value = report.to_json();
    assert_eq!(value["segmentedImagePath"], Value::Null);
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["message"], json!("Segmentation failed: boom"));
  }

  #[test]
  fn written_report_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let report = SegmentationReport::completed(ModelKind::UNet, Path::new("a.png"), None);
    report.write_to(&path).unwrap();

    let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, report.to_json());
  }

  #[test]
  fn unwritable_report_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.json");
    let report = SegmentationReport::completed(ModelKind::UNet, Path::new("a.png"), None);
    assert!(matches!(report.write_to(&path), Err(ReportError::Io { .. })));
  }
}
