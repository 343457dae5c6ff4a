//! Market data structures produced by the decoder and the aggregation engine.
//!
//! # Price convention
//!
//! ITCH prices are unsigned 32-bit fixed-point integers with four implied
//! decimal places. [`Price`] keeps the raw integer so sums stay exact; the
//! decimal value is only materialized for display and final VWAPs.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::enums::Side;
use super::symbol::Symbol;

/// Implied decimal places of a `Price(4)` field.
pub const PRICE_DECIMALS: u32 = 4;

/// Divisor from raw price units to currency units.
pub const PRICE_SCALE: u32 = 10_u32.pow(PRICE_DECIMALS);

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// A fixed-point price with four implied decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(pub u32);

impl Price {
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / PRICE_SCALE as f64
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:04}", self.0 / PRICE_SCALE, self.0 % PRICE_SCALE)
    }
}

// ---------------------------------------------------------------------------
// TradeRecord
// ---------------------------------------------------------------------------

/// One decoded non-cross trade message. Produced per message and consumed by
/// the aggregation engine; not retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeRecord {
    pub stock_locate: u16,
    /// Nanoseconds since midnight, as carried on the wire.
    pub timestamp_ns: u64,
    /// `timestamp_ns` placed on the session date.
    pub time: NaiveDateTime,
    pub side: Side,
    pub shares: u32,
    pub symbol: Symbol,
    pub price: Price,
    pub match_number: u64,
}

impl TradeRecord {
    /// `shares × price` in raw price units (scale 4).
    #[inline]
    pub fn notional_raw(&self) -> u128 {
        self.shares as u128 * self.price.raw() as u128
    }
}

// ---------------------------------------------------------------------------
// Finalized rows
// ---------------------------------------------------------------------------

/// VWAP for one symbol in one hour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VwapRow {
    pub symbol: Symbol,
    /// Whole hours since market open (may be negative).
    pub hour: i64,
    pub vwap: f64,
}

/// Whole-day VWAP for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyVwapRow {
    pub symbol: Symbol,
    pub volume: u64,
    pub notional: f64,
    pub vwap: f64,
}

/// VWAP from raw accumulators: `notional_raw / volume` rescaled to currency
/// units. Zero volume yields zero rather than dividing by zero.
#[inline]
pub fn vwap_from_raw(notional_raw: u128, volume: u64) -> f64 {
    if volume == 0 {
        return 0.0;
    }
    notional_raw as f64 / volume as f64 / PRICE_SCALE as f64
}

impl std::fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trade({} {:?} {}x{} at {} match={})",
            self.symbol,
            self.side,
            self.shares,
            self.price,
            self.time.format("%H:%M:%S%.9f"),
            self.match_number
        )
    }
}

impl std::fmt::Display for VwapRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VWAP({} h{} {:.4})", self.symbol, self.hour, self.vwap)
    }
}
