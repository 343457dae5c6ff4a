//! Message dispatcher: the main scan loop after market open.
//!
//! Each iteration resynchronizes on a known tag, reads that tag's
//! fixed-length body, and routes it:
//!
//! - `P` (non-cross trade) → [`decode_trade`] → [`VwapEngine::record_trade`]
//! - `S` (system event) → stop if the event code is end of market hours
//! - anything else → consumed and ignored
//!
//! Bytes that are not a known tag are skipped one at a time and counted;
//! they never abort the scan. After the end-of-market-hours event nothing
//! more is read from the source.

use std::collections::BTreeMap;

use itch_core::error::{ItchError, Result};
use itch_core::{MessageType, SystemEventCode};
use tracing::{info, warn};

use crate::aggregation::VwapEngine;
use crate::itch::{decode_system_event, decode_trade};
use crate::source::ByteSource;

pub(crate) const WAITING_FOR_CLOSE: &str = "end of market hours";

/// Dispatcher behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Fail with `StreamExhausted` if the stream ends before the
    /// end-of-market-hours event instead of returning partial results.
    pub strict_end_of_day: bool,
}

/// Counters collected during one dispatch pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Bytes consumed by the dispatcher (tags, bodies, and skipped bytes).
    pub bytes: u64,
    /// Complete messages dispatched, per tag.
    pub messages: BTreeMap<MessageType, u64>,
    /// Bytes skipped while looking for a known tag.
    pub resync_bytes: u64,
    /// Trades merged into the engine.
    pub trades: u64,
    /// Trades dropped because the side indicator was neither `B` nor `S`.
    pub trades_invalid_side: u64,
    /// The end-of-market-hours event was observed.
    pub end_of_day: bool,
    /// Tag of a message cut off by the end of the stream, if any.
    pub truncated: Option<MessageType>,
}

impl ScanStats {
    pub fn total_messages(&self) -> u64 {
        self.messages.values().sum()
    }
}

impl std::fmt::Display for ScanStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "bytes={} messages={} trades={} invalid_side={} resync_bytes={} end_of_day={}",
            self.bytes,
            self.total_messages(),
            self.trades,
            self.trades_invalid_side,
            self.resync_bytes,
            self.end_of_day,
        )?;
        if let Some(mt) = self.truncated {
            write!(f, " truncated={mt}")?;
        }
        Ok(())
    }
}

/// Advance to the next known tag. `None` at end of stream.
fn next_tag<S: ByteSource + ?Sized>(source: &mut S, stats: &mut ScanStats) -> Result<Option<MessageType>> {
    while let Some(b) = source.read_byte()? {
        match MessageType::from_tag(b) {
            Some(mt) => return Ok(Some(mt)),
            None => stats.resync_bytes += 1,
        }
    }
    Ok(None)
}

/// Scan messages into `engine` until end of market hours or end of stream.
pub fn dispatch<S: ByteSource + ?Sized>(
    source: &mut S,
    engine: &mut VwapEngine,
    opts: ScanOptions,
) -> Result<ScanStats> {
    let start = source.position();
    let mut stats = ScanStats::default();
    let mut buf = [0u8; MessageType::MAX_BODY_LEN];

    while let Some(mt) = next_tag(source, &mut stats)? {
        let body = &mut buf[..mt.body_len()];
        match source.read_exact(body) {
            Ok(()) => {}
            Err(ItchError::EndOfStream { .. }) => {
                stats.truncated = Some(mt);
                break;
            }
            Err(e) => return Err(e),
        }
        *stats.messages.entry(mt).or_default() += 1;

        match mt {
            MessageType::Trade => match decode_trade(body, engine.clock()) {
                Some(trade) => {
                    engine.record_trade(&trade);
                    stats.trades += 1;
                }
                None => stats.trades_invalid_side += 1,
            },
            MessageType::SystemEvent => {
                let close = decode_system_event(body)
                    .filter(|ev| ev.code == SystemEventCode::EndOfMarketHours);
                if let Some(ev) = close {
                    info!(
                        "end of market hours at byte {} (feed time {}ns)",
                        source.position(),
                        ev.timestamp_ns
                    );
                    stats.end_of_day = true;
                    break;
                }
            }
            _ => {}
        }
    }

    stats.bytes = source.position() - start;

    if !stats.end_of_day {
        if let Some(mt) = stats.truncated {
            warn!("capture ends inside a '{mt}' message at byte {}", source.position());
        }
        if opts.strict_end_of_day {
            return Err(ItchError::StreamExhausted {
                waiting_for: WAITING_FOR_CLOSE,
                position: source.position(),
            });
        }
        warn!("capture ended before end of market hours; returning partial aggregation");
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use itch_core::Symbol;
    use itch_core::time_util::SessionClock;
    use proptest::prelude::*;

    use super::*;
    use crate::itch::fixtures::{self, at};
    use crate::source::ReaderSource;

    fn engine() -> VwapEngine {
        VwapEngine::new(SessionClock::new(
            NaiveDate::from_ymd_opt(2019, 1, 30).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        ))
    }

    fn run(stream: &[u8], strict: bool) -> (Result<ScanStats>, VwapEngine, u64) {
        let mut engine = engine();
        let mut src = ReaderSource::new(stream);
        let res = dispatch(&mut src, &mut engine, ScanOptions { strict_end_of_day: strict });
        (res, engine, src.position())
    }

    #[test]
    fn stops_at_end_of_market_hours() {
        let mut stream = fixtures::trade(at(10, 0, 0), b'B', 50, "TEST", 50_000);
        stream.extend(fixtures::system_event(at(16, 0, 0), b'M'));
        let close_end = stream.len() as u64;
        stream.extend(fixtures::trade(at(16, 5, 0), b'B', 999, "TEST", 10));
        stream.extend(fixtures::system_event(at(20, 0, 0), b'E'));

        let (res, engine, pos) = run(&stream, true);
        let stats = res.unwrap();
        assert!(stats.end_of_day);
        assert_eq!(pos, close_end);
        assert_eq!(stats.bytes, close_end);
        assert_eq!(stats.trades, 1);
        assert_eq!(engine.totals(&Symbol::new("TEST")).unwrap().volume, 50);
    }

    #[test]
    fn other_system_events_do_not_stop_the_scan() {
        let mut stream = fixtures::system_event(at(10, 0, 0), b'Q');
        stream.extend(fixtures::trade(at(10, 0, 1), b'S', 10, "ABC", 20_000));
        stream.extend(fixtures::system_event(at(16, 0, 0), b'M'));

        let (res, _, _) = run(&stream, true);
        let stats = res.unwrap();
        assert_eq!(stats.trades, 1);
        assert_eq!(stats.messages[&MessageType::SystemEvent], 2);
    }

    #[test]
    fn resynchronizes_over_unknown_bytes() {
        let mut stream = vec![0x00, 0xFF, b'z', b'k'];
        stream.extend(fixtures::trade(at(10, 0, 0), b'B', 10, "ABC", 20_000));
        stream.extend([0x01, 0x02]);
        stream.extend(fixtures::system_event(at(16, 0, 0), b'M'));

        let (res, engine, _) = run(&stream, true);
        let stats = res.unwrap();
        assert_eq!(stats.resync_bytes, 6);
        assert_eq!(stats.trades, 1);
        assert_eq!(engine.finalize().len(), 1);
    }

    #[test]
    fn invalid_side_changes_nothing() {
        let mut stream = fixtures::trade(at(10, 0, 0), b'?', 10, "ABC", 20_000);
        stream.extend(fixtures::system_event(at(16, 0, 0), b'M'));

        let (res, engine, _) = run(&stream, true);
        let stats = res.unwrap();
        assert_eq!(stats.trades, 0);
        assert_eq!(stats.trades_invalid_side, 1);
        assert_eq!(stats.messages[&MessageType::Trade], 1);
        assert!(engine.is_empty());
        assert_eq!(engine.bucket_count(), 0);
    }

    #[test]
    fn lenient_exhaustion_returns_partial_results() {
        let mut stream = fixtures::trade(at(10, 0, 0), b'B', 10, "ABC", 20_000);
        stream.extend(&fixtures::trade(at(10, 0, 1), b'B', 10, "ABC", 20_000)[..20]);

        let (res, engine, pos) = run(&stream, false);
        let stats = res.unwrap();
        assert!(!stats.end_of_day);
        assert_eq!(stats.truncated, Some(MessageType::Trade));
        assert_eq!(stats.trades, 1);
        assert_eq!(pos, stream.len() as u64);
        assert_eq!(engine.finalize().len(), 1);
    }

    #[test]
    fn strict_exhaustion_is_an_error() {
        let stream = fixtures::trade(at(10, 0, 0), b'B', 10, "ABC", 20_000);
        let (res, _, _) = run(&stream, true);
        match res {
            Err(ItchError::StreamExhausted { waiting_for, position }) => {
                assert_eq!(waiting_for, WAITING_FOR_CLOSE);
                assert_eq!(position, stream.len() as u64);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn stats_display() {
        let mut stats = ScanStats { bytes: 10, trades: 1, ..Default::default() };
        stats.messages.insert(MessageType::Trade, 1);
        stats.truncated = Some(MessageType::AddOrder);
        assert_eq!(
            stats.to_string(),
            "bytes=10 messages=1 trades=1 invalid_side=0 resync_bytes=0 end_of_day=false truncated=A"
        );
    }

    proptest! {
        #[test]
        fn cursor_advances_by_declared_lengths(
            picks in proptest::collection::vec(0..MessageType::ALL.len(), 0..64)
        ) {
            let tags: Vec<MessageType> = picks.iter().map(|&i| MessageType::ALL[i]).collect();
            let mut stream = Vec::new();
            for &mt in &tags {
                stream.extend(fixtures::filler(mt));
            }

            let (res, _, pos) = run(&stream, false);
            let stats = res.unwrap();
            let expected: u64 = tags.iter().map(|mt| 1 + mt.body_len() as u64).sum();
            prop_assert_eq!(pos, expected);
            prop_assert_eq!(stats.total_messages(), tags.len() as u64);
            prop_assert_eq!(stats.resync_bytes, 0);
            prop_assert!(stats.truncated.is_none());
        }
    }
}
