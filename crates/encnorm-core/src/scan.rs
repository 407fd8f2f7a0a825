//! 目录扫描与归一化主流程
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{NormalizeError, Result};
use crate::options::{NormalizeOptions, RunStats};
use crate::rewrite::normalize_file;
use crate::types::FileReport;

/// 递归收集根目录下文件名以 `suffix` 结尾的文件
/// - 根目录不存在时直接返回 `RootNotFound`
/// - 无法读取的目录项记录告警后跳过；不跟随目录符号链接
/// - 结果按路径排序，保证报告可复现
pub fn collect_files(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(NormalizeError::RootNotFound(root.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = vec![];
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => { warn!(%err, "skipping unreadable entry"); continue; }
        };
        if !is_regular_file(&entry) { continue; }
        // 按原始字节比较，非 UTF-8 文件名同样适用
        if entry.file_name().as_encoded_bytes().ends_with(suffix.as_bytes()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// 扫描目录、逐个文件检测并改写，向 `out` 输出可读报告
/// 单文件失败只记录，不中断；仅根目录缺失时返回错误
pub fn normalize_dir(root: &Path, out: &mut dyn Write, opts: &NormalizeOptions) -> Result<RunStats> {
    let files = collect_files(root, &opts.suffix)?;
    info!(root = %root.display(), files = files.len(), dry_run = opts.dry_run, "files collected");

    let mut stats = RunStats { files_found: files.len(), ..Default::default() };
    writeln!(out, "Found {} files ending in {} to check", files.len(), opts.suffix)?;

    let verb = if opts.dry_run { "Would fix" } else { "Fixed" };
    for path in files {
        let outcome = normalize_file(&path, opts);
        match &outcome {
            Ok(enc) if !enc.is_target() => {
                writeln!(out, "{}: {} (was {})", verb, path.display(), enc.label())?;
                stats.files_fixed += 1;
                if enc.is_lossy() { stats.files_lossy += 1; }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to normalize file");
                writeln!(out, "Error fixing {}: {}", path.display(), e)?;
                stats.files_failed += 1;
            }
        }
        stats.reports.push(FileReport::from_outcome(&path, &outcome));
    }

    writeln!(out, "\n{} {} files", verb, stats.files_fixed)?;
    writeln!(out, "Done!")?;
    Ok(stats)
}

/// 将报告项以 JSON 数组写入 `out`
pub fn write_json_report(out: &mut dyn Write, reports: &[FileReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}
