//! FIX tag numbers used by the request builders (FIX 4.4).

/// A FIX field tag number.
pub type Tag = u32;

// --- Standard header ---

/// BeginString: protocol version, e.g. "FIX.4.4".
pub const BEGIN_STRING: Tag = 8;
/// MsgType: message kind, e.g. "V" for MarketDataRequest.
pub const MSG_TYPE: Tag = 35;
pub const SENDER_COMP_ID: Tag = 49;
pub const TARGET_COMP_ID: Tag = 56;
pub const TARGET_SUB_ID: Tag = 57;

// --- Order entry ---

pub const CL_ORD_ID: Tag = 11;
pub const ORIG_CL_ORD_ID: Tag = 41;
pub const SYMBOL: Tag = 55;
pub const SIDE: Tag = 54;
pub const ORD_TYPE: Tag = 40;
pub const TIME_IN_FORCE: Tag = 59;
pub const ORDER_QTY: Tag = 38;
pub const PRICE: Tag = 44;
pub const STOP_PX: Tag = 99;

// --- Market data ---

pub const MD_REQ_ID: Tag = 262;
pub const SUBSCRIPTION_REQUEST_TYPE: Tag = 263;
pub const MARKET_DEPTH: Tag = 264;
/// NoMDEntryTypes: count tag of the subscribed entry type group.
pub const NO_MD_ENTRY_TYPES: Tag = 267;
pub const MD_ENTRY_TYPE: Tag = 269;
/// NoRelatedSym: count tag of the related instrument group.
pub const NO_RELATED_SYM: Tag = 146;

// --- Security list ---

pub const SECURITY_REQ_ID: Tag = 320;
pub const SECURITY_LIST_REQUEST_TYPE: Tag = 559;
