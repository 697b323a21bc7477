//! ProtocolEngine trait: the single point of contact with the external
//! FIX engine.
//!
//! The engine owns sessions, sequence numbers, framing and transport. The
//! builder only hands it finished messages and reports whatever it answers.

use crate::error::DispatchError;
use crate::message::RequestMessage;

pub trait ProtocolEngine: Send + Sync {
    /// Engine name used in logs (e.g. "console", "journal").
    fn name(&self) -> &str;

    /// Take ownership of a fully built message and send it.
    fn send(&self, message: RequestMessage) -> std::result::Result<(), DispatchError>;
}
