//! Synthetic capture builders shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::{Compression, write::GzEncoder};
use itch_core::{MessageType, Symbol};

pub fn at(h: u64, m: u64, s: u64) -> u64 {
    ((h * 60 + m) * 60 + s) * 1_000_000_000
}

fn header(mt: MessageType, timestamp_ns: u64) -> Vec<u8> {
    let mut msg = vec![mt.tag()];
    msg.extend_from_slice(&1u16.to_be_bytes());
    msg.extend_from_slice(&0u16.to_be_bytes());
    msg.extend_from_slice(&timestamp_ns.to_be_bytes()[2..]);
    msg
}

pub fn system_event(timestamp_ns: u64, code: u8) -> Vec<u8> {
    let mut msg = header(MessageType::SystemEvent, timestamp_ns);
    msg.push(code);
    msg
}

pub fn trade(timestamp_ns: u64, side: u8, shares: u32, symbol: &str, price_raw: u32) -> Vec<u8> {
    let mut msg = header(MessageType::Trade, timestamp_ns);
    msg.extend_from_slice(&42u64.to_be_bytes());
    msg.push(side);
    msg.extend_from_slice(&shares.to_be_bytes());
    msg.extend_from_slice(&Symbol::new(symbol).to_wire());
    msg.extend_from_slice(&price_raw.to_be_bytes());
    msg.extend_from_slice(&7u64.to_be_bytes());
    msg
}

pub fn filler(mt: MessageType) -> Vec<u8> {
    let mut msg = vec![0u8; 1 + mt.body_len()];
    msg[0] = mt.tag();
    msg
}

/// A small but complete trading day.
pub fn trading_day() -> Vec<u8> {
    let mut s = Vec::new();
    s.extend(system_event(at(3, 0, 0), b'O'));
    s.extend(system_event(at(4, 0, 0), b'S'));
    s.extend(filler(MessageType::StockDirectory));
    s.extend(filler(MessageType::AddOrder));
    s.extend(system_event(at(9, 30, 0), b'Q'));
    s.extend(trade(at(9, 35, 0), b'B', 100, "AAPL", 100_000));
    s.extend(filler(MessageType::OrderExecuted));
    s.extend(trade(at(9, 40, 0), b'S', 200, "AAPL", 110_000));
    s.extend(trade(at(10, 30, 0), b'B', 10, "MSFT", 1_000_000));
    s.extend(trade(at(10, 31, 0), b'X', 10_000, "MSFT", 1));
    s.extend(filler(MessageType::CrossTrade));
    s.extend(trade(at(15, 59, 59), b'S', 30, "MSFT", 1_200_000));
    s.extend(system_event(at(16, 0, 0), b'M'));
    s.extend(trade(at(16, 10, 0), b'B', 5, "AAPL", 999_999));
    s.extend(system_event(at(20, 0, 0), b'E'));
    s.extend(system_event(at(20, 5, 0), b'C'));
    s
}

pub fn write_gz(path: &Path, bytes: &[u8]) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(bytes).unwrap();
    enc.finish().unwrap();
}
