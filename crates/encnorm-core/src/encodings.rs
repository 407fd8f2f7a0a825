//! 候选编码（固定集合）与严格解码
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::{GBK, UTF_8, WINDOWS_1252};

use crate::error::NormalizeError;

/// 支持的候选编码
/// - Gbk：简体中文 Windows 常见编码，只接受 ASCII 与双字节对（不含 GB18030 四字节序列）
/// - Gb2312：仅 GB2312 已分配的 EUC-CN 双字节区，比 GBK 更严格
/// - Cp1252：西文 Windows 单字节编码
/// - Utf8：规范目标编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Candidate {
    Gbk,
    Gb2312,
    Cp1252,
    Utf8,
}

/// 规范目标编码：所有文件统一写为无 BOM 的 UTF-8
pub const TARGET: Candidate = Candidate::Utf8;

/// 默认候选顺序
pub const DEFAULT_CANDIDATES: [Candidate; 4] = [Candidate::Gbk, Candidate::Gb2312, Candidate::Cp1252, Candidate::Utf8];

pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CP1252 中未定义的 5 个字节
const CP1252_UNMAPPED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

impl Candidate {
    /// 报告中使用的编码名
    pub fn label(self) -> &'static str {
        match self {
            Candidate::Gbk => "gbk",
            Candidate::Gb2312 => "gb2312",
            Candidate::Cp1252 => "cp1252",
            Candidate::Utf8 => "utf-8",
        }
    }

    /// 严格解码：出现任何非法或未映射的字节序列即返回 None，不做替换
    pub fn decode_strict(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            Candidate::Gbk => {
                // encoding_rs 的 GBK 解码器即 gb18030，会接受四字节序列与单字节 0x80
                if !is_gbk(bytes) { return None; }
                GBK.decode_without_bom_handling_and_without_replacement(bytes)
            }
            Candidate::Gb2312 => {
                if !is_euc_cn(bytes) { return None; }
                GBK.decode_without_bom_handling_and_without_replacement(bytes)
            }
            Candidate::Cp1252 => {
                // encoding_rs 按 WHATWG 把未定义字节映射为 C1 控制符，这里显式拒绝
                if bytes.iter().any(|b| CP1252_UNMAPPED.contains(b)) { return None; }
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                Some(text)
            }
            Candidate::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Candidate {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gbk" | "cp936" => Ok(Candidate::Gbk),
            "gb2312" | "euc-cn" => Ok(Candidate::Gb2312),
            "cp1252" | "windows-1252" => Ok(Candidate::Cp1252),
            "utf-8" | "utf8" => Ok(Candidate::Utf8),
            _ => Err(NormalizeError::UnknownEncoding(s.to_string())),
        }
    }
}

/// 判断字节流是否只由 ASCII 与 GBK 双字节对组成
/// 首字节 0x81..=0xFE，次字节 0x40..=0x7E | 0x80..=0xFE；单字节 0x80、0xFF 非法
fn is_gbk(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < 0x80 { i += 1; continue; }
        let lead_ok = matches!(b, 0x81..=0xFE);
        let trail_ok = matches!(bytes.get(i + 1), Some(0x40..=0x7E | 0x80..=0xFE));
        if !(lead_ok && trail_ok) { return false; }
        i += 2;
    }
    true
}

/// 判断字节流是否只由 ASCII 与 GB2312 已分配码位组成
fn is_euc_cn(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < 0x80 { i += 1; continue; }
        match bytes.get(i + 1) {
            Some(&trail) if is_gb2312_pair(b, trail) => i += 2,
            _ => return false,
        }
    }
    true
}

/// GB2312 已分配区：非汉字区 1–9 行按行限定次字节，汉字区 16–87 行（0xD7 行止于 0xF9）
fn is_gb2312_pair(lead: u8, trail: u8) -> bool {
    if !(0xA1..=0xFE).contains(&trail) { return false; }
    match lead {
        0xA1 | 0xA3 => true,
        0xA2 => matches!(trail, 0xB1..=0xE2 | 0xE5..=0xEE | 0xF1..=0xFC),
        0xA4 => trail <= 0xF3,
        0xA5 => trail <= 0xF6,
        0xA6 => matches!(trail, 0xA1..=0xB8 | 0xC1..=0xD8),
        0xA7 => matches!(trail, 0xA1..=0xC1 | 0xD1..=0xF1),
        0xA8 => matches!(trail, 0xA1..=0xBA | 0xC5..=0xE9),
        0xA9 => matches!(trail, 0xA4..=0xEF),
        0xD7 => trail <= 0xF9,
        0xB0..=0xF7 => true,
        _ => false,
    }
}
