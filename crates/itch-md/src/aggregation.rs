//! Trade aggregation: per-symbol running totals and per-symbol hourly
//! buckets, finalized into VWAP rows.
//!
//! The engine exclusively owns its state for one run. Notional is
//! accumulated in raw price units as integers, so totals do not depend on
//! the order trades arrive in and repeated runs over the same capture
//! produce bit-identical VWAPs.

use ahash::AHashMap;
use chrono::NaiveDateTime;
use itch_core::time_util::SessionClock;
use itch_core::*;

/// Whole-day running totals for one symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolTotals {
    /// Σ shares × raw price (scale 4).
    pub notional_raw: u128,
    /// Σ shares.
    pub volume: u64,
}

impl SymbolTotals {
    #[inline]
    fn add(&mut self, shares: u32, price: Price) {
        self.notional_raw += shares as u128 * price.raw() as u128;
        self.volume += shares as u64;
    }

    /// Σ shares × price in currency units.
    pub fn notional(&self) -> f64 {
        self.notional_raw as f64 / PRICE_SCALE as f64
    }

    pub fn vwap(&self) -> f64 {
        vwap_from_raw(self.notional_raw, self.volume)
    }
}

/// Trade observations for one (symbol, hour) pair, in stream order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourlyBucket {
    observations: Vec<(u32, Price)>,
}

impl HourlyBucket {
    pub fn observations(&self) -> &[(u32, Price)] {
        &self.observations
    }

    /// Σ shares_i × price_i / Σ shares_i, or zero for a zero-volume bucket.
    pub fn vwap(&self) -> f64 {
        let (notional, volume) = self
            .observations
            .iter()
            .fold((0u128, 0u64), |(n, v), &(shares, price)| {
                (n + shares as u128 * price.raw() as u128, v + shares as u64)
            });
        vwap_from_raw(notional, volume)
    }
}

/// Owns all aggregation state for one run.
pub struct VwapEngine {
    clock: SessionClock,
    totals: AHashMap<Symbol, SymbolTotals>,
    buckets: AHashMap<(Symbol, i64), HourlyBucket>,
}

impl VwapEngine {
    pub fn new(clock: SessionClock) -> Self {
        Self { clock, totals: AHashMap::new(), buckets: AHashMap::new() }
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Whole hours since market open for a trade time.
    #[inline]
    pub fn hour_offset(&self, time: NaiveDateTime) -> i64 {
        self.clock.hour_offset(time)
    }

    /// Merge one trade into the symbol's totals and its hour bucket.
    pub fn record_trade(&mut self, trade: &TradeRecord) {
        self.totals.entry(trade.symbol).or_default().add(trade.shares, trade.price);

        let hour = self.hour_offset(trade.time);
        self.buckets
            .entry((trade.symbol, hour))
            .or_default()
            .observations
            .push((trade.shares, trade.price));
    }

    pub fn totals(&self, symbol: &Symbol) -> Option<&SymbolTotals> {
        self.totals.get(symbol)
    }

    pub fn bucket(&self, symbol: &Symbol, hour: i64) -> Option<&HourlyBucket> {
        self.buckets.get(&(*symbol, hour))
    }

    pub fn symbol_count(&self) -> usize {
        self.totals.len()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// One VWAP row per (symbol, hour) bucket, sorted by symbol then hour.
    pub fn finalize(&self) -> Vec<VwapRow> {
        let mut rows: Vec<VwapRow> = self
            .buckets
            .iter()
            .map(|(&(symbol, hour), bucket)| VwapRow { symbol, hour, vwap: bucket.vwap() })
            .collect();
        rows.sort_unstable_by(|a, b| (a.symbol, a.hour).cmp(&(b.symbol, b.hour)));
        rows
    }

    /// Whole-day VWAP per symbol, sorted by symbol.
    pub fn daily_rows(&self) -> Vec<DailyVwapRow> {
        let mut rows: Vec<DailyVwapRow> = self
            .totals
            .iter()
            .map(|(&symbol, t)| DailyVwapRow {
                symbol,
                volume: t.volume,
                notional: t.notional(),
                vwap: t.vwap(),
            })
            .collect();
        rows.sort_unstable_by_key(|r| r.symbol);
        rows
    }
}
