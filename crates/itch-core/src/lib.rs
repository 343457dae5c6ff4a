//! # itch-core
//!
//! Core crate for the ITCH VWAP pipeline, providing:
//!
//! - **Types** (`types`): tag table, event codes, side, symbol, price, rows
//! - **Configuration** (`config`): JSON config deserialization
//! - **Error types** (`error`): domain-specific `ItchError` via thiserror
//! - **Session clock** (`time_util`): feed timestamps to wall clock and hour buckets
//! - **Logging** (`logging`): tracing-based structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod time_util;
pub mod types;

// Re-export types at crate root for convenience.
pub use types::*;
