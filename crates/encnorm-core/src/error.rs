//! 错误类型
use std::path::PathBuf;
use thiserror::Error;

/// 归一化过程中可能出现的错误
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// 根目录不存在：不扫描、不修改任何文件
    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// 单文件读写失败（仅记录，不中断整体流程）
    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 候选编码名不在支持的固定集合内
    #[error("unknown encoding `{0}` (supported: gbk, gb2312, cp1252, utf-8)")]
    UnknownEncoding(String),

    /// 配置文件读取或解析失败
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// 报告输出失败（stdout 或 JSON 文件）
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl NormalizeError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

pub type Result<T, E = NormalizeError> = std::result::Result<T, E>;
