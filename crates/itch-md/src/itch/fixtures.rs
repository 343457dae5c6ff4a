//! Wire-format builders for tests.

use itch_core::MessageType;

pub const STOCK_LOCATE: u16 = 7;
pub const MATCH_NUMBER: u64 = 0x0102_0304_0506_0708;

/// Nanoseconds since midnight for a wall-clock time.
pub fn at(h: u64, m: u64, s: u64) -> u64 {
    ((h * 60 + m) * 60 + s) * 1_000_000_000
}

fn header(mt: MessageType, timestamp_ns: u64) -> Vec<u8> {
    let mut msg = Vec::with_capacity(1 + mt.body_len());
    msg.push(mt.tag());
    msg.extend_from_slice(&STOCK_LOCATE.to_be_bytes());
    msg.extend_from_slice(&0u16.to_be_bytes());
    msg.extend_from_slice(&timestamp_ns.to_be_bytes()[2..]);
    msg
}

/// Tag plus 11-byte System Event body.
pub fn system_event(timestamp_ns: u64, code: u8) -> Vec<u8> {
    let mut msg = header(MessageType::SystemEvent, timestamp_ns);
    msg.push(code);
    msg
}

/// Tag plus 43-byte non-cross Trade body.
pub fn trade(timestamp_ns: u64, side: u8, shares: u32, symbol: &str, price_raw: u32) -> Vec<u8> {
    let mut msg = header(MessageType::Trade, timestamp_ns);
    msg.extend_from_slice(&0xDEAD_BEEFu64.to_be_bytes());
    msg.push(side);
    msg.extend_from_slice(&shares.to_be_bytes());
    msg.extend_from_slice(&itch_core::Symbol::new(symbol).to_wire());
    msg.extend_from_slice(&price_raw.to_be_bytes());
    msg.extend_from_slice(&MATCH_NUMBER.to_be_bytes());
    msg
}

/// Tag plus a zero-filled body of the declared length.
pub fn filler(mt: MessageType) -> Vec<u8> {
    let mut msg = vec![0u8; 1 + mt.body_len()];
    msg[0] = mt.tag();
    msg
}
