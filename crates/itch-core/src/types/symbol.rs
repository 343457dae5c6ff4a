//! Fixed-width instrument symbols.
//!
//! ITCH carries stock symbols as 8 ASCII bytes, right-padded with spaces.
//! [`Symbol`] keeps them inline (no heap allocation per trade) with the
//! padding trimmed, so it is cheap to copy and hash as a map key.

use serde::{Serialize, Serializer};

/// Width of the symbol field on the wire.
pub const SYMBOL_LEN: usize = 8;

/// A trimmed instrument symbol stored in a zero-filled fixed buffer.
///
/// Ordering compares the zero-filled buffers, which matches lexical ordering
/// of the trimmed strings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol([u8; SYMBOL_LEN]);

impl Symbol {
    /// Decode the space-padded wire field. Trailing spaces (and NULs) are
    /// dropped; bytes outside printable ASCII are replaced with `?`.
    #[inline]
    pub fn from_wire(field: &[u8; SYMBOL_LEN]) -> Self {
        let end = field
            .iter()
            .rposition(|&b| b != b' ' && b != 0)
            .map_or(0, |p| p + 1);
        let mut buf = [0u8; SYMBOL_LEN];
        for (dst, &src) in buf.iter_mut().zip(&field[..end]) {
            *dst = if src.is_ascii_graphic() || src == b' ' { src } else { b'?' };
        }
        Self(buf)
    }

    /// Build from a string, truncating past [`SYMBOL_LEN`] bytes.
    pub fn new(s: &str) -> Self {
        let mut field = [b' '; SYMBOL_LEN];
        let len = s.len().min(SYMBOL_LEN);
        field[..len].copy_from_slice(&s.as_bytes()[..len]);
        Self::from_wire(&field)
    }

    /// The space-padded wire form.
    pub fn to_wire(&self) -> [u8; SYMBOL_LEN] {
        let mut field = self.0;
        for b in field.iter_mut().filter(|b| **b == 0) {
            *b = b' ';
        }
        field
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(SYMBOL_LEN);
        // Only ASCII is ever stored.
        std::str::from_utf8(&self.0[..end]).unwrap_or("")
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_padding() {
        assert_eq!(Symbol::from_wire(b"AAPL    ").as_str(), "AAPL");
        assert_eq!(Symbol::from_wire(b"ABCDEFGH").as_str(), "ABCDEFGH");
    }

    #[test]
    fn all_spaces_is_empty() {
        assert_eq!(Symbol::from_wire(b"        ").as_str(), "");
    }

    #[test]
    fn embedded_space_is_kept() {
        assert_eq!(Symbol::from_wire(b"BRK A   ").as_str(), "BRK A");
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(Symbol::from_wire(b"AB\xffC    ").as_str(), "AB?C");
    }

    #[test]
    fn wire_round_trip() {
        assert_eq!(&Symbol::new("TEST").to_wire(), b"TEST    ");
    }

    #[test]
    fn truncation() {
        assert_eq!(Symbol::new("ABCDEFGHIJ").as_str(), "ABCDEFGH");
    }

    #[test]
    fn ordering_is_lexical() {
        let mut syms = vec![Symbol::new("AAPL"), Symbol::new("AA"), Symbol::new("A"), Symbol::new("B")];
        syms.sort();
        let names: Vec<&str> = syms.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["A", "AA", "AAPL", "B"]);
    }
}
