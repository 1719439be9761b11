// crates/matching-replay/src/main.rs

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use matching_core::{PolicyKind, PriceTime, SizePriority, TradePrice};
use tracing::info;
use tracing_subscriber::EnvFilter;

use matching_replay::{parse_script, BookView, OutputFormat, Replay, ReplayConfig, DEMO_SCRIPT};

#[derive(Parser)]
#[clap(name = "matching-replay")]
#[clap(about = "Replay an order script through the matching engine")]
struct Cli {
    /// Order script to replay. Runs the built-in demo when omitted.
    script: Option<PathBuf>,

    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Allocation policy (fifo | size-priority)
    #[clap(short, long)]
    policy: Option<PolicyKind>,

    /// Trade price rule (resting | aggressor)
    #[clap(short, long)]
    trade_price: Option<TradePrice>,

    /// Output format (text | json)
    #[clap(short, long)]
    format: Option<OutputFormat>,

    /// Book print layout (orders | levels)
    #[clap(short, long)]
    book_view: Option<BookView>,

    /// Pause after every book print, in milliseconds
    #[clap(long)]
    step_delay_ms: Option<u64>,

    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a clean report.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;

    let (script_name, text) = match &cli.script {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => ("<demo>".to_string(), DEMO_SCRIPT.to_string()),
    };
    let commands = parse_script(&text).with_context(|| format!("failed to parse {script_name}"))?;

    info!(script = %script_name, ?config, "starting replay");

    let out = BufWriter::new(io::stdout());
    let summary = match config.policy {
        PolicyKind::Fifo => run::<PriceTime, _>(config, out, &commands).await?,
        PolicyKind::SizePriority => run::<SizePriority, _>(config, out, &commands).await?,
    };

    info!(
        submitted = summary.submitted,
        rejected = summary.rejected,
        fills = summary.fills,
        completed = summary.completed,
        "done"
    );
    Ok(())
}

async fn run<P, W>(
    config: ReplayConfig,
    out: W,
    commands: &[matching_replay::ScriptCommand],
) -> Result<matching_replay::ReplaySummary>
where
    P: matching_core::AllocationPolicy,
    W: Write,
{
    let mut replay = Replay::<P, W>::new(config, out);
    Ok(replay.run(commands).await?)
}

/// Defaults, then the config file, then `MATCHING_*` variables, then flags.
fn load_config(cli: &Cli) -> Result<ReplayConfig> {
    let mut config = match &cli.config {
        Some(path) => ReplayConfig::from_file(path)?,
        None => ReplayConfig::default(),
    };
    config.apply_env()?;

    if let Some(policy) = cli.policy {
        config.policy = policy;
    }
    if let Some(trade_price) = cli.trade_price {
        config.trade_price = trade_price;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(book_view) = cli.book_view {
        config.book_view = book_view;
    }
    if let Some(delay) = cli.step_delay_ms {
        config.step_delay_ms = delay;
    }

    Ok(config)
}
