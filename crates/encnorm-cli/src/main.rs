use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use encnorm_core::{
    load_config, normalize_dir, write_json_report, Candidate, FileConfig, NormalizeError, NormalizeOptions,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "encnorm", version, about = "将源文件统一转换为无 BOM 的 UTF-8")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 检测编码并写回 UTF-8
    Fix(NormalizeArgs),
    /// 只检测并报告，不写回
    Check(NormalizeArgs),
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    /// 根目录（也可在配置文件中通过 input 指定）
    #[arg(long)]
    input: Option<PathBuf>,

    /// 文件名后缀过滤，默认 .rs
    #[arg(long)]
    suffix: Option<String>,

    /// 候选编码，逗号分隔并按优先级排列（可选 gbk、gb2312、cp1252、utf-8）
    #[arg(long, value_delimiter = ',')]
    candidates: Option<Vec<Candidate>>,

    /// 严格按候选顺序检测，不预先判断 UTF-8
    #[arg(long, overrides_with = "no_strict_order")]
    strict_order: bool,

    /// 先判断 UTF-8（默认行为；可覆盖配置文件中的 strict_order = true）
    #[arg(long, overrides_with = "strict_order")]
    no_strict_order: bool,

    /// 配置文件路径（TOML）
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON 报告输出路径
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    let (args, dry_run) = match cli.command {
        Commands::Fix(args) => (args, false),
        Commands::Check(args) => (args, true),
    };
    run(args, dry_run)
}

fn run(args: NormalizeArgs, dry_run: bool) -> Result<()> {
    // 优先级：命令行 > 配置文件 > 默认值
    let file_cfg = match &args.config {
        Some(path) => load_config(path).context("load config")?,
        None => FileConfig::default(),
    };
    let mut opts = NormalizeOptions::default();
    file_cfg.apply_to(&mut opts).context("apply config")?;
    if let Some(suffix) = args.suffix { opts.suffix = suffix; }
    if let Some(candidates) = args.candidates { opts.candidates = candidates; }
    if args.strict_order { opts.target_first = false; }
    if args.no_strict_order { opts.target_first = true; }
    if dry_run { opts.dry_run = true; }

    let input = args
        .input
        .or(file_cfg.input)
        .context("no input directory: pass --input or set `input` in the config file")?;
    info!(?input, suffix = %opts.suffix, dry_run = opts.dry_run, "starting normalize");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let stats = match normalize_dir(&input, &mut out, &opts) {
        Ok(stats) => stats,
        Err(err @ NormalizeError::RootNotFound(_)) => {
            writeln!(out, "{err}")?;
            return Ok(());
        }
        Err(err) => return Err(err).context("normalize failed"),
    };
    out.flush().ok();

    if let Some(path) = &args.report {
        let mut w = BufWriter::new(File::create(path).context("create report file")?);
        write_json_report(&mut w, &stats.reports).context("write report")?;
        w.flush().context("flush report")?;
    }

    info!(
        files_found = stats.files_found,
        files_fixed = stats.files_fixed,
        files_lossy = stats.files_lossy,
        files_failed = stats.files_failed,
        "normalize finished"
    );
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只保留报告
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
