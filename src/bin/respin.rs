use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "respin", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write perturbed variations of one image or video.
    Vary(VaryArgs),
    /// Rewrite a zip archive, transforming every image entry.
    Archive(ArchiveArgs),
}

#[derive(Parser, Debug)]
struct VaryArgs {
    /// Input image or video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving `<stem>_var<N>.<ext>` outputs.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of variations (1-5).
    #[arg(long, default_value_t = 3)]
    count: u32,

    /// Modification level in [0, 1).
    #[arg(long, default_value_t = 0.2)]
    level: f64,

    /// Seed for a reproducible batch. Omit for OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ArchiveArgs {
    /// Input zip archive.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output zip archive.
    #[arg(long)]
    out: PathBuf,

    /// Modification level in [0, 1).
    #[arg(long, default_value_t = 0.2)]
    level: f64,

    /// Seed for a reproducible run. Omit for OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Vary(args) => cmd_vary(args),
        Command::Archive(args) => cmd_archive(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<respin::EngineConfig> {
    match path {
        Some(p) => Ok(respin::EngineConfig::from_json_file(p)?),
        None => Ok(respin::EngineConfig::default()),
    }
}

fn make_rng(seed: Option<u64>) -> respin::VariationRng {
    match seed {
        Some(s) => respin::seeded_rng(s),
        None => respin::entropy_rng(),
    }
}

fn cmd_vary(args: VaryArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let blob = respin::MediaBlob::from_path(&args.in_path)?;
    let request = respin::VariationRequest {
        count: args.count,
        modification_level: args.level,
    };

    let out = respin::produce(&blob, &request, &config, &mut make_rng(args.seed))?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let stem = args
        .in_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "variation".to_string());
    let ext = match out.kind() {
        respin::MediaKind::Video => "mp4",
        respin::MediaKind::Image | respin::MediaKind::Other => "jpg",
    };

    for (i, bytes) in out.iter().enumerate() {
        let path = args.out_dir.join(format!("{stem}_var{}.{ext}", i + 1));
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        println!("{}  {}", sha256_hex(bytes), path.display());
    }
    Ok(())
}

fn cmd_archive(args: ArchiveArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read archive '{}'", args.in_path.display()))?;

    let out = respin::process_archive(&bytes, args.level, &config, &mut make_rng(args.seed))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &out.bytes)
        .with_context(|| format!("write archive '{}'", args.out.display()))?;

    eprintln!(
        "transformed {}, copied {}, passed through {}",
        out.summary.transformed, out.summary.copied, out.summary.passed_through
    );
    println!("{}  {}", sha256_hex(&out.bytes), args.out.display());
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
