//! One-session pipeline: gate, dispatch, finalize.
//!
//! # Architecture
//!
//! ```text
//! ByteSource ──► wait_for_market_open() ──► dispatch() ──► VwapEngine
//!                                                            │
//!                         SessionReport { hourly, daily } ◄──┘ finalize()
//! ```
//!
//! Every call builds a fresh [`VwapEngine`], so running the same bytes twice
//! yields identical reports.

use itch_core::config::AppConfig;
use itch_core::error::Result;
use itch_core::time_util::SessionClock;
use itch_core::{DailyVwapRow, VwapRow};
use tracing::info;

use crate::aggregation::VwapEngine;
use crate::dispatcher::{self, ScanOptions, ScanStats};
use crate::report::ReportSink;
use crate::session::{self, MarketOpen};
use crate::source::ByteSource;

/// Inputs for one session run.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub clock: SessionClock,
    pub scan: ScanOptions,
}

impl From<&AppConfig> for SessionOptions {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            clock: SessionClock::from(cfg.session),
            scan: ScanOptions { strict_end_of_day: cfg.scan.strict_end_of_day },
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub market_open: MarketOpen,
    pub hourly: Vec<VwapRow>,
    pub daily: Vec<DailyVwapRow>,
    pub stats: ScanStats,
}

impl SessionReport {
    /// Hand the hourly rows to `sink`.
    pub fn write_hourly(&self, sink: &mut dyn ReportSink) -> Result<()> {
        sink.write_hourly(&self.hourly)
    }

    /// Hand the whole-day rows to `sink`.
    pub fn write_daily(&self, sink: &mut dyn ReportSink) -> Result<()> {
        sink.write_daily(&self.daily)
    }
}

/// Scan one capture from start to end of market hours and finalize.
pub fn run_session<S: ByteSource + ?Sized>(source: &mut S, opts: &SessionOptions) -> Result<SessionReport> {
    info!(
        "session {} market open {}",
        opts.clock.market_open().date(),
        opts.clock.market_open().time()
    );

    let market_open = session::wait_for_market_open(source)?;

    let mut engine = VwapEngine::new(opts.clock);
    let stats = dispatcher::dispatch(source, &mut engine, opts.scan)?;
    info!("scan complete: {stats}");

    let hourly = engine.finalize();
    let daily = engine.daily_rows();
    info!(
        "finalized {} hourly rows across {} symbols",
        hourly.len(),
        engine.symbol_count()
    );

    Ok(SessionReport { market_open, hourly, daily, stats })
}
