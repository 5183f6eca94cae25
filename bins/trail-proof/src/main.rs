//! Trail proof binary.
//!
//! Loads the engine configuration, scores the submission found in the input
//! directory and writes `results.json` to the output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use trail_core::ScoringMode;
use trail_engine::{EngineConfig, ProofEngine};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Quality alone drives the score; integrity and correctness gate validity.
    Correctness,
    /// Quality and authenticity are combined.
    Authenticity,
}

impl From<Mode> for ScoringMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Correctness => ScoringMode::Correctness,
            Mode::Authenticity => ScoringMode::Authenticity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable lines with target and level
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "trail-proof",
    version,
    about = "Score a browsing-data submission and emit a proof of contribution"
)]
struct Args {
    /// Config file (TOML). Defaults to <config_dir>/trail/config.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the submission file
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory results.json is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Data pool id
    #[arg(long)]
    dlp_id: Option<i64>,

    /// Signature over the submission challenge (hex)
    #[arg(long)]
    signed_message: Option<String>,

    /// Scoring mode
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(self, mut config: EngineConfig) -> EngineConfig {
        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(id) = self.dlp_id {
            config.dlp_id = id;
        }
        if let Some(signed) = self.signed_message {
            config.signed_message = Some(signed);
        }
        if let Some(mode) = self.mode {
            config.scoring.mode = mode.into();
        }
        config
    }
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_format);

    if let Err(e) = run(args) {
        error!("proof generation failed: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    info!("Trail proof v{}", env!("CARGO_PKG_VERSION"));

    let loaded =
        EngineConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = args.apply(loaded);
    info!(
        dlp_id = config.dlp_id,
        mode = ?config.scoring.mode,
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        "configuration loaded"
    );

    let engine = ProofEngine::new(config);
    let response = engine.generate().context("Failed to generate proof")?;
    let path = engine
        .write_results(&response)
        .context("Failed to write results")?;

    let rendered = serde_json::to_string_pretty(&response).context("Failed to render proof")?;
    info!(path = %path.display(), "proof response:\n{rendered}");
    Ok(())
}

/// Install the global subscriber. Logs go to stderr.
///
/// `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init(),
    }
}
