//! Core data types: the ITCH tag table, event codes, symbols, prices, and
//! the rows the aggregation engine produces.

pub mod enums;
pub mod market_data;
pub mod symbol;

pub use enums::*;
pub use market_data::*;
pub use symbol::*;
