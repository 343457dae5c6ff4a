//! NASDAQ TotalView-ITCH 5.0 decoding.

pub mod parser;

#[cfg(test)]
pub(crate) mod fixtures;

pub use parser::{SystemEvent, decode_system_event, decode_trade};
