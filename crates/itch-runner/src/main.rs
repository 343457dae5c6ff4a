//! # itch-runner
//!
//! Main entry point for the ITCH VWAP report.
//!
//! Loads a JSON configuration file, opens the capture, scans one trading
//! session, and writes the hourly (and optionally whole-day) VWAP reports.
//!
//! # Usage
//!
//! ```bash
//! itch-runner config.json --log-level info
//! itch-runner config.json --input 01302019.NASDAQ_ITCH50.gz --output hourly.csv --strict
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use itch_md::report::{ReportSink, create_file_sink};
use itch_md::{SessionOptions, run_session};
use tracing::info;

/// ITCH 5.0 hourly VWAP report.
#[derive(Parser)]
#[command(name = "itch-runner", about = "ITCH 5.0 hourly VWAP report")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,

    /// Override the capture path from the config.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Override the hourly report path from the config.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail if the capture ends before the end-of-market-hours event.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration and apply CLI overrides
    let mut config = itch_core::config::load_config(&cli.config)?;
    if let Some(input) = cli.input {
        config.input.path = input;
    }
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if cli.strict {
        config.scan.strict_end_of_day = true;
    }
    config.validate()?;

    // 2. Initialize logging
    let log_dir = cli.log_dir.or_else(|| config.log_path());
    itch_core::logging::init_logging(&cli.log_level, log_dir.as_deref(), &config.module_name());

    info!(
        "itch-runner starting: config={}, input={}, strict={}",
        cli.config.display(),
        config.input.path.display(),
        config.scan.strict_end_of_day,
    );

    // 3. Scan the capture
    let mut source = itch_md::source::open_capture(&config.input.path, config.input.compression)
        .with_context(|| format!("opening capture {}", config.input.path.display()))?;
    let opts = SessionOptions::from(&config);
    let report = run_session(&mut source, &opts).context("scanning capture")?;
    drop(source);

    // 4. Write reports
    let mut sink = create_file_sink(&config.output.path, config.output.format, opts.clock)
        .with_context(|| format!("creating {}", config.output.path.display()))?;
    report.write_hourly(sink.as_mut())?;
    sink.finish()?;
    info!("wrote {} hourly rows to {}", report.hourly.len(), config.output.path.display());

    if let Some(path) = &config.output.daily_totals_path {
        let mut sink = create_file_sink(path, config.output.format, opts.clock)
            .with_context(|| format!("creating {}", path.display()))?;
        report.write_daily(sink.as_mut())?;
        sink.finish()?;
        info!("wrote {} daily rows to {}", report.daily.len(), path.display());
    }

    info!("done");
    Ok(())
}
