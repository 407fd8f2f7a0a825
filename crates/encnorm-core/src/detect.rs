//! 编码检测：按候选顺序严格解码，全部失败时有损回退
use std::borrow::Cow;

use encoding_rs::UTF_8;

use crate::encodings::{Candidate, TARGET, UTF8_BOM};

/// 检测结果中的编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedEncoding {
    /// 某个候选编码严格解码成功
    Candidate(Candidate),
    /// 带 BOM 的 UTF-8；改写时去掉 BOM
    Utf8Sig,
    /// 所有候选均失败，按 UTF-8 解码并以 U+FFFD 替换非法序列
    Lossy,
}

impl DetectedEncoding {
    pub fn label(self) -> &'static str {
        match self {
            DetectedEncoding::Candidate(c) => c.label(),
            DetectedEncoding::Utf8Sig => "utf-8-sig",
            DetectedEncoding::Lossy => "utf-8 (with replacements)",
        }
    }

    /// 是否已经是规范目标编码（无需转换）
    pub fn is_target(self) -> bool {
        matches!(self, DetectedEncoding::Candidate(c) if c == TARGET)
    }

    pub fn is_lossy(self) -> bool {
        matches!(self, DetectedEncoding::Lossy)
    }
}

/// 单个文件的检测结果：编码 + 解码后的文本
#[derive(Debug)]
pub struct Detection<'a> {
    pub encoding: DetectedEncoding,
    pub text: Cow<'a, str>,
}

impl Detection<'_> {
    /// 以规范目标编码（无 BOM 的 UTF-8）输出
    pub fn into_target_bytes(self) -> Vec<u8> {
        self.text.into_owned().into_bytes()
    }
}

/// 检测字节流的编码
/// - `target_first` 为 true 时，先以规范目标编码严格解码，已规范的文件不会被误判
/// - 随后按 `candidates` 顺序尝试，第一个成功者即为结果
/// - 全部失败时走有损回退
pub fn detect<'a>(bytes: &'a [u8], candidates: &[Candidate], target_first: bool) -> Detection<'a> {
    if target_first {
        if let Some(found) = try_candidate(bytes, TARGET) { return found; }
    }
    for &candidate in candidates {
        if let Some(found) = try_candidate(bytes, candidate) { return found; }
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let (text, _) = UTF_8.decode_without_bom_handling(body);
    Detection { encoding: DetectedEncoding::Lossy, text }
}

fn try_candidate(bytes: &[u8], candidate: Candidate) -> Option<Detection<'_>> {
    if candidate == Candidate::Utf8 {
        if let Some(body) = bytes.strip_prefix(UTF8_BOM) {
            return candidate
                .decode_strict(body)
                .map(|text| Detection { encoding: DetectedEncoding::Utf8Sig, text });
        }
    }
    candidate
        .decode_strict(bytes)
        .map(|text| Detection { encoding: DetectedEncoding::Candidate(candidate), text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encodings::DEFAULT_CANDIDATES;

    #[test]
    fn ascii_is_target_when_checked_first() {
        let d = detect(b"fn main() {}\n", &DEFAULT_CANDIDATES, true);
        assert_eq!(d.encoding, DetectedEncoding::Candidate(Candidate::Utf8));
        assert!(d.encoding.is_target());
    }

    #[test]
    fn strict_order_reports_first_candidate_for_ascii() {
        let d = detect(b"fn main() {}\n", &DEFAULT_CANDIDATES, false);
        assert_eq!(d.encoding, DetectedEncoding::Candidate(Candidate::Gbk));
        assert_eq!(d.text, "fn main() {}\n");
    }

    #[test]
    fn utf8_chinese_survives_target_first() {
        let src = "// 中文注释\n";
        let d = detect(src.as_bytes(), &DEFAULT_CANDIDATES, true);
        assert!(d.encoding.is_target());
        assert_eq!(d.into_target_bytes(), src.as_bytes());

        // 严格顺序下 GBK 会先命中并产生乱码
        let d = detect(src.as_bytes(), &DEFAULT_CANDIDATES, false);
        assert_eq!(d.encoding, DetectedEncoding::Candidate(Candidate::Gbk));
        assert_ne!(d.text, src);
    }

    #[test]
    fn gbk_bytes_detected() {
        let (bytes, _, _) = encoding_rs::GBK.encode("// 中文注释\n");
        let d = detect(&bytes, &DEFAULT_CANDIDATES, true);
        assert_eq!(d.encoding, DetectedEncoding::Candidate(Candidate::Gbk));
        assert_eq!(d.text, "// 中文注释\n");
    }

    #[test]
    fn cp1252_after_gbk_fails() {
        let d = detect(b"caf\xE9\n", &DEFAULT_CANDIDATES, true);
        assert_eq!(d.encoding, DetectedEncoding::Candidate(Candidate::Cp1252));
        assert_eq!(d.text, "café\n");
    }

    #[test]
    fn cp1252_symbols_are_not_taken_as_gbk() {
        let d = detect(b"\xA71\xA72\n", &DEFAULT_CANDIDATES, true);
        assert_eq!(d.encoding, DetectedEncoding::Candidate(Candidate::Cp1252));
        assert_eq!(d.text, "§1§2\n");

        let d = detect(b"price \x80 5\n", &DEFAULT_CANDIDATES, true);
        assert_eq!(d.encoding, DetectedEncoding::Candidate(Candidate::Cp1252));
        assert_eq!(d.text, "price € 5\n");
    }

    #[test]
    fn bom_is_stripped() {
        let d = detect(b"\xEF\xBB\xBFhello", &DEFAULT_CANDIDATES, true);
        assert_eq!(d.encoding, DetectedEncoding::Utf8Sig);
        assert!(!d.encoding.is_target());
        assert_eq!(d.into_target_bytes(), b"hello");
    }

    #[test]
    fn lossy_fallback_replaces_invalid_bytes() {
        let d = detect(b"ok \x81", &DEFAULT_CANDIDATES, true);
        assert!(d.encoding.is_lossy());
        assert_eq!(d.encoding.label(), "utf-8 (with replacements)");
        assert_eq!(d.text, "ok \u{FFFD}");
    }

    #[test]
    fn empty_candidate_list_still_tries_target() {
        let d = detect(b"abc", &[], true);
        assert!(d.encoding.is_target());
        let d = detect(b"abc", &[], false);
        assert!(d.encoding.is_lossy());
        assert_eq!(d.text, "abc");
    }
}
