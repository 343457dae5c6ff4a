//! Typed error definitions for the ITCH VWAP pipeline.
//!
//! Provides [`ItchError`] for conditions that callers need to tell apart
//! (most importantly a capture that ends before an awaited session event).
//! All variants implement `std::error::Error` via `thiserror`, so they
//! integrate with `anyhow::Result` in the runner.

use thiserror::Error;

/// Domain-specific errors for the ITCH VWAP pipeline.
#[derive(Debug, Error)]
pub enum ItchError {
    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// Underlying read failure (file open, decompression, I/O).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source ran out before a requested read could be satisfied.
    #[error("end of stream at byte {position}")]
    EndOfStream { position: u64 },

    /// The capture ended before an expected session event was observed.
    #[error("stream exhausted at byte {position} while waiting for {waiting_for}")]
    StreamExhausted { waiting_for: &'static str, position: u64 },

    /// Report sink serialization or write error.
    #[error("report error: {0}")]
    Report(String),
}

impl ItchError {
    /// Converts a source-level [`ItchError::EndOfStream`] into a
    /// [`ItchError::StreamExhausted`] naming the awaited event. Other
    /// variants pass through unchanged.
    pub fn exhausted_while(self, waiting_for: &'static str) -> Self {
        match self {
            Self::EndOfStream { position } => Self::StreamExhausted { waiting_for, position },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ItchError>;
