//! 公共类型（对外暴露）
use serde::Serialize;
use std::path::Path;

use crate::detect::DetectedEncoding;
use crate::error::NormalizeError;

/// 单文件处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// 检测到非目标编码，已（或将要）转换
    Converted,
    /// 已是规范目标编码
    Unchanged,
    /// 所有候选失败，有损回退
    Lossy,
    Failed,
}

/// 报告项（对应 JSON 报告的单个元素）
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    pub encoding: Option<&'static str>,
    pub error: Option<String>,
}

impl FileReport {
    pub(crate) fn from_outcome(path: &Path, outcome: &Result<DetectedEncoding, NormalizeError>) -> Self {
        let path = path.display().to_string();
        match outcome {
            Ok(enc) => {
                let status = if enc.is_lossy() {
                    FileStatus::Lossy
                } else if enc.is_target() {
                    FileStatus::Unchanged
                } else {
                    FileStatus::Converted
                };
                Self { path, status, encoding: Some(enc.label()), error: None }
            }
            Err(e) => Self { path, status: FileStatus::Failed, encoding: None, error: Some(e.to_string()) },
        }
    }
}
