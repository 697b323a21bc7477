//! The request builder: the heart of tradeprompt.
//!
//! Every operator action follows the same path:
//!
//! 1. **Prompt** for raw text (via any [`tradeprompt_core::Prompt`])
//! 2. **Decode** it into typed fields ([`codec`])
//! 3. **Assemble** header, body and repeating groups ([`assembler`])
//! 4. **Confirm** with the operator, then hand the message to the engine ([`gate`])
//!
//! Any prompt or codec error aborts the action in flight; [`session`]
//! decides whether to return to the menu.

pub mod assembler;
pub mod codec;
pub mod gate;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use assembler::{InstrumentSelector, RequestBuilder};
pub use gate::{BuildState, Dispatch, maybe_send};
pub use session::{Action, ActionOutcome, Session, SessionSummary};
