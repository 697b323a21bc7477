//! # tradeprompt core
//!
//! Domain types, traits, and error definitions for the tradeprompt FIX
//! request builder. This crate has **no I/O**: it defines the model the
//! other crates implement against.
//!
//! ## Seams
//!
//! - [`Prompt`]: where operator text comes from
//! - [`ProtocolEngine`]: where finished messages go
//!
//! Both are traits so the builder can be driven by scripted input and a
//! recording engine in tests.

pub mod engine;
pub mod error;
pub mod field;
pub mod message;
pub mod prompt;
pub mod tag;

// Re-export key types at crate root for ergonomics
pub use engine::ProtocolEngine;
pub use error::{DispatchError, Error, Result};
pub use field::{Field, FieldKind, FieldMap, FieldSpec, FieldValue, FieldWriter};
pub use message::{
    GroupEntry, GroupRule, Header, MarketDataRequest, MdEntryType, MdEntryTypeEntry,
    ProtocolVersion, RelatedSymEntry, RepeatingGroup, RequestMessage, SecurityListRequest,
    SecurityListRequestType, SubscriptionRequestType,
};
pub use prompt::Prompt;
pub use tag::Tag;
