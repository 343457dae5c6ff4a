//! Market session gate: skip everything before the start of market hours.
//!
//! The gate looks only for the System Event tag. Any other byte is dropped
//! one at a time, so pre-open traffic is skipped without being parsed. Each
//! System Event found is read in full and its event code checked; the gate
//! returns right after the start-of-market-hours event.

use itch_core::error::{ItchError, Result};
use itch_core::{MessageType, SystemEventCode};
use tracing::{debug, info};

use crate::itch::{SystemEvent, decode_system_event};
use crate::source::ByteSource;

pub(crate) const WAITING_FOR_OPEN: &str = "start of market hours";

/// The market-open event and where the scan resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketOpen {
    pub event: SystemEvent,
    /// Byte position immediately after the event.
    pub position: u64,
}

/// Consume the stream up to and including the start-of-market-hours event.
///
/// Fails with [`ItchError::StreamExhausted`] if the stream ends first.
pub fn wait_for_market_open<S: ByteSource + ?Sized>(source: &mut S) -> Result<MarketOpen> {
    let tag = MessageType::SystemEvent;
    let mut body = [0u8; MessageType::MAX_BODY_LEN];
    let body = &mut body[..tag.body_len()];

    loop {
        match source.read_byte()? {
            Some(b) if b == tag.tag() => {}
            Some(_) => continue,
            None => {
                return Err(ItchError::StreamExhausted {
                    waiting_for: WAITING_FOR_OPEN,
                    position: source.position(),
                });
            }
        }

        source
            .read_exact(body)
            .map_err(|e| e.exhausted_while(WAITING_FOR_OPEN))?;

        let Some(event) = decode_system_event(body) else { continue };
        if event.code == SystemEventCode::StartOfMarketHours {
            let position = source.position();
            info!("market open at byte {position} (feed time {}ns)", event.timestamp_ns);
            return Ok(MarketOpen { event, position });
        }
        debug!("system event {:?} before market open, continuing", event.code);
    }
}
