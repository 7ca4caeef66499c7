use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use kvg2ref::{coverage, run_batch, source, table, PatternConfig};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "kvg2ref",
    version,
    about = "KanjiVG stroke data to stroke-matching reference patterns"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log every processed glyph
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a ref-patterns.js table from SVG stroke files.
    Generate(GenerateArgs),
    /// Check that a table covers every character of a text.
    Check(CheckArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// KanjiVG kanji/ directory
    #[arg(long)]
    kanjivg: PathBuf,

    /// Directory of custom stroke SVGs that override KanjiVG
    #[arg(long)]
    custom: Option<PathBuf>,

    /// Output ref-patterns.js path
    #[arg(short, long)]
    output: PathBuf,

    /// Only process these characters
    #[arg(long)]
    chars: Option<String>,

    /// Arc-length distance between feature points
    #[arg(long, default_value = "20")]
    interval: f64,

    /// Samples per curve segment
    #[arg(long, default_value = "50")]
    samples: usize,
}

#[derive(Args)]
struct CheckArgs {
    /// Generated ref-patterns.js to check
    #[arg(short, long)]
    table: PathBuf,

    /// Characters that must be covered
    #[arg(long, conflicts_with = "text", required_unless_present = "text")]
    chars: Option<String>,

    /// Text file whose characters must be covered
    #[arg(long)]
    text: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Check(args) => check(args),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = PatternConfig {
        feature_interval: args.interval,
        samples_per_segment: args.samples,
        ..PatternConfig::default()
    };
    if !(config.feature_interval > 0.0) || config.samples_per_segment == 0 {
        bail!("--interval and --samples must be positive");
    }

    let files = source::collect_sources(&args.kanjivg, args.custom.as_deref())
        .context("failed to scan source directories")?;
    info!("Found {} SVG files", files.len());

    let (sources, missing) = source::select(files, args.chars.as_deref());
    if !missing.is_empty() {
        warn!("Missing characters: {}", missing.iter().collect::<String>());
    }
    if args.chars.as_deref().is_some_and(|c| !c.is_empty()) && !sources.is_empty() {
        info!(
            "Found characters: {}",
            sources.iter().map(|s| s.character).collect::<String>()
        );
    }

    let report = run_batch(&sources, &config);
    table::write_table_file(&args.output, &report.entries)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("Wrote {} characters to {}", report.entries.len(), args.output.display());
    if report.failed() > 0 {
        warn!(
            "Errors/skipped: {} ({} skipped, {} errors)",
            report.failed(),
            report.skipped.len(),
            report.errors.len()
        );
    }
    Ok(())
}

fn check(args: CheckArgs) -> Result<()> {
    let entries = table::read_table_file(&args.table)
        .with_context(|| format!("failed to read {}", args.table.display()))?;

    let text = match (&args.chars, &args.text) {
        (Some(chars), _) => chars.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("either --chars or --text is required"),
    };

    let required = coverage::required_characters(&text);
    let missing = coverage::missing_characters(&required, &entries);
    if missing.is_empty() {
        info!(
            "Stroke coverage OK: all {} characters covered in {}",
            required.len(),
            args.table.display()
        );
        return Ok(());
    }

    for c in &missing {
        warn!("  {}  (U+{:05X})", c, *c as u32);
    }
    bail!(
        "stroke coverage check failed: {} characters missing from {}",
        missing.len(),
        args.table.display()
    )
}
