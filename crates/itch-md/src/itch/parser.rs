//! ITCH 5.0 body decoders.
//!
//! Every message is a one-byte tag followed by a fixed-length body (see
//! [`MessageType::body_len`]). All integers are **big-endian**; timestamps
//! are 48-bit nanoseconds since midnight. Offsets below are relative to the
//! body, i.e. after the tag byte.
//!
//! # System Event (`S`, 11 bytes)
//!
//! | Offset | Size | Field           |
//! |--------|------|-----------------|
//! | 0      | 2    | stock locate    |
//! | 2      | 2    | tracking number |
//! | 4      | 6    | timestamp       |
//! | 10     | 1    | event code      |
//!
//! # Trade, non-cross (`P`, 43 bytes)
//!
//! | Offset | Size | Field                 |
//! |--------|------|-----------------------|
//! | 0      | 2    | stock locate          |
//! | 2      | 2    | tracking number       |
//! | 4      | 6    | timestamp             |
//! | 10     | 8    | order reference       |
//! | 18     | 1    | buy/sell indicator    |
//! | 19     | 4    | shares                |
//! | 23     | 8    | stock (space padded)  |
//! | 31     | 4    | price, Price(4)       |
//! | 35     | 8    | match number          |

use itch_core::time_util::SessionClock;
use itch_core::*;

const SYSTEM_EVENT_LEN: usize = 11;
const TRADE_LEN: usize = 43;

const OFF_STOCK_LOCATE: usize = 0;
const OFF_TIMESTAMP: usize = 4;
const OFF_EVENT_CODE: usize = 10;
const OFF_SIDE: usize = 18;
const OFF_SHARES: usize = 19;
const OFF_STOCK: usize = 23;
const OFF_PRICE: usize = 31;
const OFF_MATCH: usize = 35;

/// Decoded System Event message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemEvent {
    pub timestamp_ns: u64,
    pub code: SystemEventCode,
}

#[inline]
fn read_u16_be(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

#[inline]
fn read_u32_be(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(data[offset..offset + 4].try_into().unwrap_or([0; 4]))
}

#[inline]
fn read_u48_be(data: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf[2..].copy_from_slice(&data[offset..offset + 6]);
    u64::from_be_bytes(buf)
}

#[inline]
fn read_u64_be(data: &[u8], offset: usize) -> u64 {
    u64::from_be_bytes(data[offset..offset + 8].try_into().unwrap_or([0; 8]))
}

/// Decode a System Event body. `None` if the body is shorter than 11 bytes.
pub fn decode_system_event(body: &[u8]) -> Option<SystemEvent> {
    if body.len() < SYSTEM_EVENT_LEN {
        return None;
    }
    Some(SystemEvent {
        timestamp_ns: read_u48_be(body, OFF_TIMESTAMP),
        code: SystemEventCode::from_byte(body[OFF_EVENT_CODE]),
    })
}

/// Decode a non-cross Trade body into a [`TradeRecord`].
///
/// Returns `None` when the body is too short or the buy/sell indicator is
/// neither `B` nor `S`; such messages are structurally consumed but take no
/// part in aggregation.
pub fn decode_trade(body: &[u8], clock: &SessionClock) -> Option<TradeRecord> {
    if body.len() < TRADE_LEN {
        return None;
    }
    let side = Side::from_byte(body[OFF_SIDE])?;

    let timestamp_ns = read_u48_be(body, OFF_TIMESTAMP);
    let mut stock = [0u8; SYMBOL_LEN];
    stock.copy_from_slice(&body[OFF_STOCK..OFF_STOCK + SYMBOL_LEN]);

    Some(TradeRecord {
        stock_locate: read_u16_be(body, OFF_STOCK_LOCATE),
        timestamp_ns,
        time: clock.instant(timestamp_ns),
        side,
        shares: read_u32_be(body, OFF_SHARES),
        symbol: Symbol::from_wire(&stock),
        price: Price(read_u32_be(body, OFF_PRICE)),
        match_number: read_u64_be(body, OFF_MATCH),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Timelike};

    use super::*;
    use crate::itch::fixtures;

    fn clock() -> SessionClock {
        SessionClock::new(
            NaiveDate::from_ymd_opt(2019, 1, 30).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn decodes_trade_fields() {
        let ts = fixtures::at(10, 15, 0) + 123;
        let msg = fixtures::trade(ts, b'B', 100, "AAPL", 1_500_250);
        let rec = decode_trade(&msg[1..], &clock()).unwrap();

        assert_eq!(rec.timestamp_ns, ts);
        assert_eq!(rec.time.hour(), 10);
        assert_eq!(rec.time.minute(), 15);
        assert_eq!(rec.time.nanosecond(), 123);
        assert_eq!(rec.side, Side::Buy);
        assert_eq!(rec.shares, 100);
        assert_eq!(rec.symbol.as_str(), "AAPL");
        assert_eq!(rec.price, Price(1_500_250));
        assert_eq!(rec.price.as_f64(), 150.025);
        assert_eq!(rec.stock_locate, fixtures::STOCK_LOCATE);
        assert_eq!(rec.match_number, fixtures::MATCH_NUMBER);
    }

    #[test]
    fn fields_are_big_endian() {
        let mut body = [0u8; 43];
        body[OFF_SIDE] = b'S';
        body[OFF_SHARES..OFF_SHARES + 4].copy_from_slice(&[0, 0, 1, 0]);
        body[OFF_STOCK..OFF_STOCK + 8].copy_from_slice(b"ZZ      ");
        body[OFF_PRICE..OFF_PRICE + 4].copy_from_slice(&[0, 1, 0, 0]);
        body[OFF_TIMESTAMP..OFF_TIMESTAMP + 6].copy_from_slice(&[0, 0, 0, 0, 1, 0]);

        let rec = decode_trade(&body, &clock()).unwrap();
        assert_eq!(rec.shares, 256);
        assert_eq!(rec.price, Price(65_536));
        assert_eq!(rec.timestamp_ns, 256);
        assert_eq!(rec.side, Side::Sell);
    }

    #[test]
    fn invalid_side_yields_no_record() {
        let msg = fixtures::trade(fixtures::at(10, 0, 0), b'X', 100, "AAPL", 100_000);
        assert!(decode_trade(&msg[1..], &clock()).is_none());
    }

    #[test]
    fn short_body_yields_no_record() {
        assert!(decode_trade(&[b'B'; 20], &clock()).is_none());
        assert!(decode_system_event(&[0; 10]).is_none());
    }

    #[test]
    fn decodes_system_event() {
        let msg = fixtures::system_event(fixtures::at(9, 30, 0), b'Q');
        let ev = decode_system_event(&msg[1..]).unwrap();
        assert_eq!(ev.code, SystemEventCode::StartOfMarketHours);
        assert_eq!(ev.timestamp_ns, fixtures::at(9, 30, 0));
    }

    #[test]
    fn u48_uses_all_six_bytes() {
        let data = [0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45];
        assert_eq!(read_u48_be(&data, 0), 0xABCD_EF01_2345);
    }
}
