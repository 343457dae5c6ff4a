//! Configuration parsing for the ITCH VWAP pipeline.
//!
//! A run reads its settings from a single JSON config file: the session
//! calendar (date and market-open time), the capture to read, where reports
//! go, and scan strictness.
//!
//! # Example config
//!
//! ```json
//! {
//!   "app": { "module_name": "itch_vwap", "log_path": "/tmp/log" },
//!   "session": { "date": "2019-01-30", "market_open": "09:30:00" },
//!   "input": { "path": "01302019.NASDAQ_ITCH50.gz", "compression": "auto" },
//!   "output": { "path": "hourly_vwap_results.txt", "format": "csv" },
//!   "scan": { "strict_end_of_day": false }
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::error::ItchError;

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Module metadata (name, log path).
    #[serde(default)]
    pub app: Option<ModuleMeta>,

    /// Trading session calendar.
    pub session: SessionConfig,

    /// Capture file settings.
    pub input: InputConfig,

    /// Report destinations.
    pub output: OutputConfig,

    /// Dispatcher behavior.
    #[serde(default)]
    pub scan: ScanConfig,
}

impl AppConfig {
    /// Returns the module name used as the log file prefix.
    pub fn module_name(&self) -> String {
        self.app
            .as_ref()
            .and_then(|m| m.module_name.clone())
            .unwrap_or_else(|| "itch_vwap".to_string())
    }

    /// Returns the log path.
    pub fn log_path(&self) -> Option<String> {
        self.app.as_ref().and_then(|m| m.log_path.clone())
    }

    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ItchError> {
        if self.input.path.as_os_str().is_empty() {
            return Err(ItchError::Config("input.path must not be empty".into()));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(ItchError::Config("output.path must not be empty".into()));
        }
        if let Some(daily) = &self.output.daily_totals_path {
            if daily == &self.output.path {
                return Err(ItchError::Config(
                    "output.daily_totals_path must differ from output.path".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Module metadata block.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleMeta {
    pub module_name: Option<String>,
    pub log_path: Option<String>,
}

/// Session calendar: the capture's trading date and the market-open time
/// that hour buckets are measured from.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SessionConfig {
    /// Trading date of the capture (`YYYY-MM-DD`).
    pub date: NaiveDate,

    /// Wall-clock market open (`HH:MM:SS`, default 09:30:00).
    #[serde(default = "default_market_open")]
    pub market_open: NaiveTime,
}

fn default_market_open() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default()
}

/// Container format of the capture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Decide from the file extension (`.gz` means gzip).
    #[default]
    Auto,
    Gzip,
    None,
}

impl Compression {
    /// Resolves [`Compression::Auto`] against a concrete path.
    pub fn resolve(self, path: &Path) -> Compression {
        match self {
            Compression::Auto => {
                let is_gz = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("gz"));
                if is_gz { Compression::Gzip } else { Compression::None }
            }
            other => other,
        }
    }
}

/// Capture file settings.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub compression: Compression,
}

/// Report serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

/// Report destinations.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Hourly VWAP report path.
    pub path: PathBuf,

    #[serde(default)]
    pub format: ReportFormat,

    /// Optional whole-day per-symbol VWAP report path.
    #[serde(default)]
    pub daily_totals_path: Option<PathBuf>,
}

/// Dispatcher behavior.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScanConfig {
    /// Treat a capture that ends before the end-of-market-hours event as an
    /// error instead of returning the partial aggregation.
    #[serde(default)]
    pub strict_end_of_day: bool,
}

/// Load, parse, and validate a JSON config file.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
