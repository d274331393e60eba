use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use combomatch::core::Config;
use combomatch::{Overrides, RunOptions};

#[derive(Parser)]
#[command(name = "combomatch", about = "Filter and highlight records with a multi-term query")]
struct Cli {
    /// Query text; split on whitespace into terms.
    query: String,

    /// JSON lines or JSON array of records (reads stdin when omitted).
    file: Option<PathBuf>,

    /// Config file to use instead of ~/.config/combomatch/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field shown and matched for each record.
    #[arg(long)]
    field: Option<String>,

    /// Extra field to match against (repeatable).
    #[arg(long = "match-field")]
    match_fields: Vec<String>,

    /// Accept records matching any term instead of all terms.
    #[arg(long)]
    or: bool,

    /// Match the whole query as a prefix of the field.
    #[arg(long)]
    anchored: bool,

    #[arg(long)]
    case_sensitive: bool,

    /// Queries shorter than this leave the list unfiltered.
    #[arg(long)]
    min_chars: Option<usize>,

    /// Use the configured highlight markup instead of terminal colours.
    #[arg(long)]
    markup: bool,

    /// Print only the number of matching records.
    #[arg(long)]
    count: bool,

    /// Write debug logs to /tmp/combomatch-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/combomatch-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("combomatch debug log started, tail -f /tmp/combomatch-debug.log");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load config")?;

    Overrides {
        display_field: cli.field,
        match_fields: cli.match_fields,
        or: cli.or,
        anchored: cli.anchored,
        case_sensitive: cli.case_sensitive,
        min_chars: cli.min_chars,
    }
    .apply(&mut config);

    let input = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let opts = RunOptions {
        query: cli.query,
        markup: cli.markup,
        count_only: cli.count,
    };
    let stdout = std::io::stdout();
    combomatch::run(&config, &opts, &input, &mut stdout.lock())?;
    Ok(())
}
