//! 配置文件加载（TOML）
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::encodings::Candidate;
use crate::error::{NormalizeError, Result};
use crate::options::NormalizeOptions;

/// 配置文件结构；所有字段可选，未给出的沿用默认值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// 待处理的根目录
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub suffix: Option<String>,
    /// 候选编码名，例如 ["gbk", "cp1252", "utf-8"]
    #[serde(default)]
    pub candidates: Option<Vec<String>>,
    #[serde(default)]
    pub strict_order: Option<bool>,
    #[serde(default)]
    pub dry_run: Option<bool>,
}

impl FileConfig {
    /// 将配置文件中给出的字段覆盖到 `opts` 上
    pub fn apply_to(&self, opts: &mut NormalizeOptions) -> Result<()> {
        if let Some(suffix) = &self.suffix { opts.suffix = suffix.clone(); }
        if let Some(names) = &self.candidates {
            opts.candidates = names.iter().map(|n| n.parse::<Candidate>()).collect::<Result<_>>()?;
        }
        if let Some(strict) = self.strict_order { opts.target_first = !strict; }
        if let Some(dry_run) = self.dry_run { opts.dry_run = dry_run; }
        Ok(())
    }
}

/// 从 TOML 文件加载配置
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let txt = std::fs::read_to_string(path).map_err(|e| NormalizeError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_config(&txt, path)
}

pub(crate) fn parse_config(txt: &str, path: &Path) -> Result<FileConfig> {
    toml::from_str(txt).map_err(|e| NormalizeError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
