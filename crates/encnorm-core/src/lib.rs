//! 文本编码归一化核心库
//!
//! 设计要点：
//! - 递归扫描根目录，只处理文件名以指定后缀结尾的文件。
//! - 按固定候选顺序（gbk → gb2312 → cp1252 → utf-8）严格解码，首个成功者即为检测结果；
//!   全部失败时以 U+FFFD 替换非法序列（有损回退）。
//! - 统一写回无 BOM 的 UTF-8；单文件失败只记录，不中断整体流程。
//! - 严格串行：一个文件读完、解码、写完后才处理下一个。

mod config;
mod detect;
mod encodings;
mod error;
mod options;
mod rewrite;
mod scan;
mod types;

pub use config::{load_config, FileConfig};
pub use detect::{detect, DetectedEncoding, Detection};
pub use encodings::{Candidate, DEFAULT_CANDIDATES, TARGET};
pub use error::{NormalizeError, Result};
pub use options::{NormalizeOptions, RunStats};
pub use rewrite::normalize_file;
pub use scan::{collect_files, normalize_dir, write_json_report};
pub use types::{FileReport, FileStatus};
