//! Session clock: converts feed timestamps to wall-clock instants and hour
//! buckets.
//!
//! ITCH timestamps are nanoseconds since midnight of the trading day. The
//! capture does not carry its own date, so the session date comes from
//! configuration. Hour buckets are measured from a fixed market-open time on
//! that date.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::config::SessionConfig;

/// Nanoseconds in one hour.
pub const NANOS_PER_HOUR: i64 = 3_600 * 1_000_000_000;

/// Fixed reference points for one trading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    midnight: NaiveDateTime,
    open: NaiveDateTime,
}

impl SessionClock {
    pub fn new(date: NaiveDate, market_open: NaiveTime) -> Self {
        Self {
            midnight: date.and_time(NaiveTime::default()),
            open: date.and_time(market_open),
        }
    }

    /// Market open of the session as a wall-clock instant.
    #[inline]
    pub fn market_open(&self) -> NaiveDateTime {
        self.open
    }

    /// Wall-clock instant for a feed timestamp (nanoseconds since midnight).
    #[inline]
    pub fn instant(&self, nanos_since_midnight: u64) -> NaiveDateTime {
        // A u48 timestamp always fits in i64.
        self.midnight + TimeDelta::nanoseconds(nanos_since_midnight as i64)
    }

    /// Whole hours elapsed since market open, floored. Negative before open,
    /// and not clamped past the close.
    #[inline]
    pub fn hour_offset(&self, time: NaiveDateTime) -> i64 {
        let delta = time - self.open;
        match delta.num_nanoseconds() {
            Some(ns) => ns.div_euclid(NANOS_PER_HOUR),
            // Beyond ~292 years; fall back to second resolution.
            None => delta.num_seconds().div_euclid(3_600),
        }
    }

    /// Clock label for an hour bucket: market open shifted by `hour_offset`
    /// hours, formatted `HH:MM:SS` (wraps around midnight).
    pub fn hour_label(&self, hour_offset: i64) -> String {
        let (label, _) = self
            .open
            .time()
            .overflowing_add_signed(TimeDelta::hours(hour_offset.rem_euclid(24)));
        label.format("%H:%M:%S").to_string()
    }
}

impl From<SessionConfig> for SessionClock {
    fn from(cfg: SessionConfig) -> Self {
        Self::new(cfg.date, cfg.market_open)
    }
}
