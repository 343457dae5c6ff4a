//! # itch-md
//!
//! Offline NASDAQ ITCH 5.0 market-data scan producing hourly VWAPs.
//!
//! ## Architecture
//!
//! A capture is read once, front to back. The [`session`] gate discards
//! everything before the start of market hours; the [`dispatcher`] then walks
//! fixed-length messages, feeding decoded trades into the
//! [`aggregation::VwapEngine`] until the end-of-market-hours event. The
//! engine is finalized into rows for a [`report::ReportSink`].
//!
//! ## Modules
//!
//! - [`source`]: `ByteSource` trait, buffered reader source, gzip capture opening
//! - [`itch`]: ITCH 5.0 body decoders
//! - [`session`]: market session gate
//! - [`dispatcher`]: tag resynchronization and message routing
//! - [`aggregation`]: per-symbol totals and hourly buckets
//! - [`report`]: CSV / JSON / in-memory sinks
//! - [`pipeline`]: `run_session` orchestration

pub mod aggregation;
pub mod dispatcher;
pub mod itch;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod source;

pub use pipeline::{SessionOptions, SessionReport, run_session};
