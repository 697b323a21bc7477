//! Confirmation gate and dispatcher.
//!
//! Nothing reaches the engine without an explicit "Y" from the operator.
//! Engine errors are passed through untouched; there is no retry.

use tradeprompt_core::{ProtocolEngine, Prompt, RequestMessage, Result};

/// Per-action lifecycle.
///
/// `Idle → Building → Confirmed → Dispatching → Done`, or
/// `Building → Declined → Discarded`, or `Building → Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Building,
    Confirmed,
    Dispatching,
    Done,
    Declined,
    Discarded,
    Aborted,
}

impl BuildState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildState::Done | BuildState::Discarded | BuildState::Aborted)
    }

    /// Move to `next`, tracing the transition.
    pub fn advance(&mut self, next: BuildState) {
        tracing::debug!(from = ?*self, to = ?next, "build state");
        *self = next;
    }
}

/// What the gate did with a built message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Sent,
    Declined,
}

impl Dispatch {
    pub fn is_sent(&self) -> bool {
        matches!(self, Dispatch::Sent)
    }
}

/// Ask `label?` and, on "Y", hand `message` to the engine.
///
/// `state` is advanced through the confirmation part of the lifecycle.
pub fn maybe_send<P: Prompt + ?Sized>(
    engine: &dyn ProtocolEngine,
    prompt: &mut P,
    message: RequestMessage,
    label: &str,
    state: &mut BuildState,
) -> Result<Dispatch> {
    if !prompt.read_confirmation(label)? {
        state.advance(BuildState::Declined);
        tracing::info!(msg_type = message.msg_type(), "{} discarded", message.name());
        state.advance(BuildState::Discarded);
        return Ok(Dispatch::Declined);
    }

    state.advance(BuildState::Confirmed);
    let name = message.name();
    state.advance(BuildState::Dispatching);
    engine.send(message)?;
    state.advance(BuildState::Done);
    tracing::info!(engine = engine.name(), "{name} handed to engine");
    Ok(Dispatch::Sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{RecordingEngine, sample_market_data, scripted};
    use tradeprompt_core::{DispatchError, Error};

    #[test]
    fn declining_never_calls_the_engine() {
        let engine = RecordingEngine::new();
        for input in ["n\n", "\n", "yes\n", ""] {
            let mut state = BuildState::Building;
            let outcome = maybe_send(
                &engine,
                &mut scripted(input),
                sample_market_data(),
                "Send MarketDataRequest",
                &mut state,
            )
            .unwrap();
            assert_eq!(outcome, Dispatch::Declined);
            assert_eq!(state, BuildState::Discarded);
        }
        assert_eq!(engine.call_count(), 0);
    }

    #[test]
    fn confirming_sends_exactly_once() {
        let engine = RecordingEngine::new();
        let mut state = BuildState::Building;
        let message = sample_market_data();
        let outcome = maybe_send(
            &engine,
            &mut scripted("y\n"),
            message.clone(),
            "Send MarketDataRequest",
            &mut state,
        )
        .unwrap();
        assert!(outcome.is_sent());
        assert_eq!(state, BuildState::Done);
        assert!(state.is_terminal());
        assert_eq!(engine.sent(), vec![message]);
    }

    #[test]
    fn engine_failure_is_surfaced_verbatim() {
        let engine = RecordingEngine::failing(DispatchError::Transport("socket closed".into()));
        let mut state = BuildState::Building;
        let err = maybe_send(
            &engine,
            &mut scripted("Y\n"),
            sample_market_data(),
            "Send MarketDataRequest",
            &mut state,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Dispatch(DispatchError::Transport(ref reason)) if reason == "socket closed"
        ));
        assert_eq!(state, BuildState::Dispatching);
        assert_eq!(engine.call_count(), 1);
    }
}
