//! Enumerations for the ITCH 5.0 message stream.
//!
//! [`MessageType`] is the tag table: every tag the feed can carry, with the
//! fixed body length that follows the tag byte. There are no inter-message
//! delimiters, so this table alone determines where the next message starts.

// ---------------------------------------------------------------------------
// Message tags
// ---------------------------------------------------------------------------

/// Message type tag, the first byte of every ITCH message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MessageType {
    SystemEvent = b'S',
    StockDirectory = b'R',
    StockTradingAction = b'H',
    RegShoRestriction = b'Y',
    MarketParticipantPosition = b'L',
    MwcbDeclineLevel = b'V',
    MwcbStatus = b'W',
    IpoQuotingPeriodUpdate = b'K',
    LuldAuctionCollar = b'J',
    OperationalHalt = b'h',
    AddOrder = b'A',
    AddOrderWithMpid = b'F',
    OrderExecuted = b'E',
    OrderExecutedWithPrice = b'C',
    OrderCancel = b'X',
    OrderDelete = b'D',
    OrderReplace = b'U',
    Trade = b'P',
    CrossTrade = b'Q',
    BrokenTrade = b'B',
    Noii = b'I',
    Rpii = b'N',
    RetailInterest = b'O',
}

impl MessageType {
    /// Every known tag, in table order.
    pub const ALL: [MessageType; 23] = [
        Self::SystemEvent,
        Self::StockDirectory,
        Self::StockTradingAction,
        Self::RegShoRestriction,
        Self::MarketParticipantPosition,
        Self::MwcbDeclineLevel,
        Self::MwcbStatus,
        Self::IpoQuotingPeriodUpdate,
        Self::LuldAuctionCollar,
        Self::OperationalHalt,
        Self::AddOrder,
        Self::AddOrderWithMpid,
        Self::OrderExecuted,
        Self::OrderExecutedWithPrice,
        Self::OrderCancel,
        Self::OrderDelete,
        Self::OrderReplace,
        Self::Trade,
        Self::CrossTrade,
        Self::BrokenTrade,
        Self::Noii,
        Self::Rpii,
        Self::RetailInterest,
    ];

    /// Largest body length in the table.
    pub const MAX_BODY_LEN: usize = 49;

    /// Looks up a tag byte. `None` means the byte is not a message boundary
    /// and the reader should resynchronize.
    #[inline]
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            b'S' => Self::SystemEvent,
            b'R' => Self::StockDirectory,
            b'H' => Self::StockTradingAction,
            b'Y' => Self::RegShoRestriction,
            b'L' => Self::MarketParticipantPosition,
            b'V' => Self::MwcbDeclineLevel,
            b'W' => Self::MwcbStatus,
            b'K' => Self::IpoQuotingPeriodUpdate,
            b'J' => Self::LuldAuctionCollar,
            b'h' => Self::OperationalHalt,
            b'A' => Self::AddOrder,
            b'F' => Self::AddOrderWithMpid,
            b'E' => Self::OrderExecuted,
            b'C' => Self::OrderExecutedWithPrice,
            b'X' => Self::OrderCancel,
            b'D' => Self::OrderDelete,
            b'U' => Self::OrderReplace,
            b'P' => Self::Trade,
            b'Q' => Self::CrossTrade,
            b'B' => Self::BrokenTrade,
            b'I' => Self::Noii,
            b'N' => Self::Rpii,
            b'O' => Self::RetailInterest,
            _ => return None,
        })
    }

    /// The tag byte.
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Fixed body length in bytes, excluding the tag byte.
    #[inline]
    pub fn body_len(self) -> usize {
        match self {
            Self::SystemEvent => 11,
            Self::StockDirectory => 38,
            Self::StockTradingAction => 24,
            Self::RegShoRestriction => 19,
            Self::MarketParticipantPosition => 25,
            Self::MwcbDeclineLevel => 34,
            Self::MwcbStatus => 11,
            Self::IpoQuotingPeriodUpdate => 27,
            Self::LuldAuctionCollar => 34,
            Self::OperationalHalt => 20,
            Self::AddOrder => 35,
            Self::AddOrderWithMpid => 39,
            Self::OrderExecuted => 30,
            Self::OrderExecutedWithPrice => 35,
            Self::OrderCancel => 22,
            Self::OrderDelete => 18,
            Self::OrderReplace => 34,
            Self::Trade => 43,
            Self::CrossTrade => 39,
            Self::BrokenTrade => 18,
            Self::Noii => 49,
            Self::Rpii => 19,
            Self::RetailInterest => 44,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag() as char)
    }
}

// ---------------------------------------------------------------------------
// System event codes
// ---------------------------------------------------------------------------

/// Event code carried in the last byte of a System Event message.
///
/// Only [`StartOfMarketHours`](Self::StartOfMarketHours) and
/// [`EndOfMarketHours`](Self::EndOfMarketHours) drive the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemEventCode {
    StartOfMessages,
    StartOfSystemHours,
    StartOfMarketHours,
    EndOfMarketHours,
    EndOfSystemHours,
    EndOfMessages,
    Other(u8),
}

impl SystemEventCode {
    #[inline]
    pub fn from_byte(b: u8) -> Self {
        match b {
            b'O' => Self::StartOfMessages,
            b'S' => Self::StartOfSystemHours,
            b'Q' => Self::StartOfMarketHours,
            b'M' => Self::EndOfMarketHours,
            b'E' => Self::EndOfSystemHours,
            b'C' => Self::EndOfMessages,
            other => Self::Other(other),
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::StartOfMessages => b'O',
            Self::StartOfSystemHours => b'S',
            Self::StartOfMarketHours => b'Q',
            Self::EndOfMarketHours => b'M',
            Self::EndOfSystemHours => b'E',
            Self::EndOfMessages => b'C',
            Self::Other(b) => b,
        }
    }
}

// ---------------------------------------------------------------------------
// Trade side
// ---------------------------------------------------------------------------

/// Buy/sell indicator of the resting order in a trade message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// `None` for any byte other than `B` or `S`.
    #[inline]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'B' => Some(Self::Buy),
            b'S' => Some(Self::Sell),
            _ => None,
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Buy => b'B',
            Self::Sell => b'S',
        }
    }
}
