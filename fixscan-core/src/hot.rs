/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! The hot-tag catalog.
//!
//! Nineteen FIX tags are promoted to dedicated, typed output columns. Every
//! other tag is routed through the overflow map. The slot order here IS the
//! column order of the fixed output schema, so the two must never drift apart.

/// Number of promoted hot tags.
pub const NUM_HOT_TAGS: usize = 19;

/// The promoted tags, in column order.
pub const HOT_TAGS: [u32; NUM_HOT_TAGS] = [
    35, 49, 56, 34, 52, 11, 37, 17, 55, 54, 150, 39, 44, 38, 14, 151, 31, 32, 58,
];

/// Tag number constants for the promoted fields.
pub mod tags {
    /// MsgType
    pub const MSG_TYPE: u32 = 35;
    /// SenderCompID
    pub const SENDER_COMP_ID: u32 = 49;
    /// TargetCompID
    pub const TARGET_COMP_ID: u32 = 56;
    /// MsgSeqNum
    pub const MSG_SEQ_NUM: u32 = 34;
    /// SendingTime
    pub const SENDING_TIME: u32 = 52;
    /// ClOrdID
    pub const CL_ORD_ID: u32 = 11;
    /// OrderID
    pub const ORDER_ID: u32 = 37;
    /// ExecID
    pub const EXEC_ID: u32 = 17;
    /// Symbol
    pub const SYMBOL: u32 = 55;
    /// Side
    pub const SIDE: u32 = 54;
    /// ExecType
    pub const EXEC_TYPE: u32 = 150;
    /// OrdStatus
    pub const ORD_STATUS: u32 = 39;
    /// Price
    pub const PRICE: u32 = 44;
    /// OrderQty
    pub const ORDER_QTY: u32 = 38;
    /// CumQty
    pub const CUM_QTY: u32 = 14;
    /// LeavesQty
    pub const LEAVES_QTY: u32 = 151;
    /// LastPx
    pub const LAST_PX: u32 = 31;
    /// LastQty
    pub const LAST_QTY: u32 = 32;
    /// Text
    pub const TEXT: u32 = 58;
}

/// A promoted hot slot.
///
/// The discriminant doubles as the slot index inside
/// [`ParsedMessage`](crate::message::ParsedMessage) and as the column index
/// in the fixed output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HotSlot {
    /// MsgType (35).
    MsgType = 0,
    /// SenderCompID (49).
    SenderCompId,
    /// TargetCompID (56).
    TargetCompId,
    /// MsgSeqNum (34).
    MsgSeqNum,
    /// SendingTime (52).
    SendingTime,
    /// ClOrdID (11).
    ClOrdId,
    /// OrderID (37).
    OrderId,
    /// ExecID (17).
    ExecId,
    /// Symbol (55).
    Symbol,
    /// Side (54).
    Side,
    /// ExecType (150).
    ExecType,
    /// OrdStatus (39).
    OrdStatus,
    /// Price (44).
    Price,
    /// OrderQty (38).
    OrderQty,
    /// CumQty (14).
    CumQty,
    /// LeavesQty (151).
    LeavesQty,
    /// LastPx (31).
    LastPx,
    /// LastQty (32).
    LastQty,
    /// Text (58).
    Text,
}

impl HotSlot {
    /// All slots in column order.
    pub const ALL: [HotSlot; NUM_HOT_TAGS] = [
        Self::MsgType,
        Self::SenderCompId,
        Self::TargetCompId,
        Self::MsgSeqNum,
        Self::SendingTime,
        Self::ClOrdId,
        Self::OrderId,
        Self::ExecId,
        Self::Symbol,
        Self::Side,
        Self::ExecType,
        Self::OrdStatus,
        Self::Price,
        Self::OrderQty,
        Self::CumQty,
        Self::LeavesQty,
        Self::LastPx,
        Self::LastQty,
        Self::Text,
    ];

    /// Returns the slot for a tag, or `None` for non-hot tags.
    #[inline]
    #[must_use]
    pub const fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            tags::MSG_TYPE => Some(Self::MsgType),
            tags::SENDER_COMP_ID => Some(Self::SenderCompId),
            tags::TARGET_COMP_ID => Some(Self::TargetCompId),
            tags::MSG_SEQ_NUM => Some(Self::MsgSeqNum),
            tags::SENDING_TIME => Some(Self::SendingTime),
            tags::CL_ORD_ID => Some(Self::ClOrdId),
            tags::ORDER_ID => Some(Self::OrderId),
            tags::EXEC_ID => Some(Self::ExecId),
            tags::SYMBOL => Some(Self::Symbol),
            tags::SIDE => Some(Self::Side),
            tags::EXEC_TYPE => Some(Self::ExecType),
            tags::ORD_STATUS => Some(Self::OrdStatus),
            tags::PRICE => Some(Self::Price),
            tags::ORDER_QTY => Some(Self::OrderQty),
            tags::CUM_QTY => Some(Self::CumQty),
            tags::LEAVES_QTY => Some(Self::LeavesQty),
            tags::LAST_PX => Some(Self::LastPx),
            tags::LAST_QTY => Some(Self::LastQty),
            tags::TEXT => Some(Self::Text),
            _ => None,
        }
    }

    /// Returns the FIX tag number for this slot.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u32 {
        HOT_TAGS[self as usize]
    }

    /// Returns the column name for this slot.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MsgType => "MsgType",
            Self::SenderCompId => "SenderCompID",
            Self::TargetCompId => "TargetCompID",
            Self::MsgSeqNum => "MsgSeqNum",
            Self::SendingTime => "SendingTime",
            Self::ClOrdId => "ClOrdID",
            Self::OrderId => "OrderID",
            Self::ExecId => "ExecID",
            Self::Symbol => "Symbol",
            Self::Side => "Side",
            Self::ExecType => "ExecType",
            Self::OrdStatus => "OrdStatus",
            Self::Price => "Price",
            Self::OrderQty => "OrderQty",
            Self::CumQty => "CumQty",
            Self::LeavesQty => "LeavesQty",
            Self::LastPx => "LastPx",
            Self::LastQty => "LastQty",
            Self::Text => "Text",
        }
    }

    /// Returns the slot index (equals the output column index).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Returns true if `tag` is one of the 19 promoted hot tags.
#[inline]
#[must_use]
pub const fn is_hot(tag: u32) -> bool {
    HotSlot::from_tag(tag).is_some()
}
