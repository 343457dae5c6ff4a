//! `tracing` subscriber setup for the runner.
//!
//! The scan logs at a handful of points. Capture open, market open, market
//! close and the final scan statistics are `info`; system events seen before
//! the open are `debug`; a capture that ends before the close is `warn`.
//! Lines go to the console and, when a log directory is configured, to a
//! daily-rotated file as well.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Call once, before the capture is opened.
///
/// `RUST_LOG` wins over `log_level` when set. With `log_dir`, files are named
/// `<module_name>.<date>` (for example `itch_vwap.2019-01-30`).
pub fn init_logging(log_level: &str, log_dir: Option<&str>, module_name: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let console_layer = fmt::layer().with_target(true).with_ansi(true);

    match log_dir {
        Some(dir) => {
            let scan_log = tracing_appender::rolling::daily(dir, module_name);
            let file_layer = fmt::layer().with_writer(scan_log).with_ansi(false).with_target(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .init();
        }
        None => {
            tracing_subscriber::registry().with(env_filter).with(console_layer).init();
        }
    }
}
