//! 归一化选项与统计信息（模块）
use crate::encodings::{Candidate, DEFAULT_CANDIDATES};
use crate::types::FileReport;

/// 归一化选项
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// 文件名后缀过滤（按文件名结尾匹配，例如 ".rs"）
    pub suffix: String,
    /// 候选编码，按优先级排列
    pub candidates: Vec<Candidate>,
    /// 先以规范目标编码严格解码；false 则严格按候选顺序
    pub target_first: bool,
    /// 只检测、不写回
    pub dry_run: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            suffix: ".rs".to_string(),
            candidates: DEFAULT_CANDIDATES.to_vec(),
            target_first: true,
            dry_run: false,
        }
    }
}

/// 运行统计信息（便于 CLI 打印与输出 JSON 报告）
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub files_found: usize,
    /// 检测编码与规范目标不同的文件数（含有损回退）
    pub files_fixed: usize,
    pub files_lossy: usize,
    pub files_failed: usize,
    pub reports: Vec<FileReport>,
}
