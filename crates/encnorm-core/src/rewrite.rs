//! 单文件检测与改写
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::detect::{detect, DetectedEncoding};
use crate::error::{NormalizeError, Result};
use crate::options::NormalizeOptions;

/// 检测单个文件的编码并以规范目标编码写回
/// - 整读 → 解码 → 整写；读取失败时文件保持不变
/// - 即使已经是目标编码也会写回（dry_run 时跳过写入）
pub fn normalize_file(path: &Path, opts: &NormalizeOptions) -> Result<DetectedEncoding> {
    let raw = fs::read(path).map_err(|e| NormalizeError::io(path, e))?;
    let detection = detect(&raw, &opts.candidates, opts.target_first);
    let encoding = detection.encoding;
    debug!(path = %path.display(), encoding = encoding.label(), "detected encoding");

    if !opts.dry_run {
        fs::write(path, detection.into_target_bytes()).map_err(|e| NormalizeError::io(path, e))?;
    }
    Ok(encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encodings::Candidate;

    #[test]
    fn rewrites_gbk_as_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.rs");
        let (gbk, _, _) = encoding_rs::GBK.encode("// 你好，世界\nfn main() {}\n");
        fs::write(&path, &gbk).unwrap();

        let enc = normalize_file(&path, &NormalizeOptions::default()).unwrap();
        assert_eq!(enc, DetectedEncoding::Candidate(Candidate::Gbk));
        assert_eq!(fs::read_to_string(&path).unwrap(), "// 你好，世界\nfn main() {}\n");
    }

    #[test]
    fn dry_run_leaves_bytes_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.rs");
        fs::write(&path, b"caf\xE9").unwrap();

        let opts = NormalizeOptions { dry_run: true, ..Default::default() };
        let enc = normalize_file(&path, &opts).unwrap();
        assert_eq!(enc, DetectedEncoding::Candidate(Candidate::Cp1252));
        assert_eq!(fs::read(&path).unwrap(), b"caf\xE9");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = normalize_file(&dir.path().join("gone.rs"), &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::Io { .. }));
    }
}
