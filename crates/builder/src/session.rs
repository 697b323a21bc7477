//! Action session: the operator menu loop.
//!
//! Each action starts from [`BuildState::Idle`] with a fresh message. Errors
//! abort only the action in flight; the loop returns to the menu unless the
//! input stream itself has failed.

use std::sync::Arc;
use tradeprompt_core::{ProtocolEngine, Prompt, RequestMessage, Result};

use crate::assembler::RequestBuilder;
use crate::gate::{self, BuildState, Dispatch};

/// Top-level menu entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RequestMarketData,
    RequestSecurityList,
    Quit,
    Unrecognized(String),
}

impl Action {
    pub const MENU: [(&'static str, &'static str); 3] = [
        ("1", "Request Market Data"),
        ("2", "Request Security List"),
        ("5", "Quit"),
    ];

    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Action::RequestMarketData,
            "2" => Action::RequestSecurityList,
            "5" => Action::Quit,
            other => Action::Unrecognized(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Dispatched(Dispatch),
    Quit,
    Unrecognized,
}

/// Tally of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub sent: usize,
    pub declined: usize,
    pub aborted: usize,
}

pub struct Session {
    builder: RequestBuilder,
    engine: Arc<dyn ProtocolEngine>,
}

impl Session {
    pub fn new(builder: RequestBuilder, engine: Arc<dyn ProtocolEngine>) -> Self {
        Self { builder, engine }
    }

    /// Render the menu and read the operator's action.
    /// End of input reads as [`Action::Quit`].
    pub fn query_action<P: Prompt + ?Sized>(&self, prompt: &mut P) -> Result<Action> {
        prompt.show("")?;
        for (key, label) in Action::MENU {
            prompt.show(&format!("{key}) {label}"))?;
        }
        Ok(match prompt.next_line("Action")? {
            Some(input) => Action::parse(&input),
            None => Action::Quit,
        })
    }

    /// Build one request for `action` and pass it through the gate.
    pub fn run_action<P: Prompt + ?Sized>(
        &mut self,
        action: &Action,
        prompt: &mut P,
    ) -> Result<ActionOutcome> {
        let mut state = BuildState::Idle;
        let built = match action {
            Action::Quit => return Ok(ActionOutcome::Quit),
            Action::Unrecognized(input) => {
                tracing::debug!(%input, "no recognized action");
                return Ok(ActionOutcome::Unrecognized);
            }
            Action::RequestMarketData => {
                state.advance(BuildState::Building);
                self.builder
                    .build_market_data_request(prompt)
                    .map(|m| (m, "Send MarketDataRequest"))
            }
            Action::RequestSecurityList => {
                state.advance(BuildState::Building);
                self.builder
                    .build_security_list_request(prompt)
                    .map(|m| (m, "Send Security List Request"))
            }
        };

        let (message, label): (RequestMessage, &str) = match built {
            Ok(built) => built,
            Err(e) => {
                state.advance(BuildState::Aborted);
                return Err(e);
            }
        };
        tracing::debug!(message = %message.to_tag_value('|'), "request assembled");

        let dispatch = gate::maybe_send(self.engine.as_ref(), prompt, message, label, &mut state)?;
        Ok(ActionOutcome::Dispatched(dispatch))
    }

    /// Menu loop until Quit or end of input. Only input failures end the
    /// loop with an error.
    pub fn run<P: Prompt + ?Sized>(&mut self, prompt: &mut P) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        loop {
            let action = self.query_action(prompt)?;
            match self.run_action(&action, prompt) {
                Ok(ActionOutcome::Quit) => break,
                Ok(ActionOutcome::Unrecognized) => continue,
                Ok(ActionOutcome::Dispatched(Dispatch::Sent)) => summary.sent += 1,
                Ok(ActionOutcome::Dispatched(Dispatch::Declined)) => summary.declined += 1,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(error = %e, ?action, "action aborted");
                    prompt.show(&e.to_string())?;
                    summary.aborted += 1;
                }
            }
        }
        tracing::info!(
            sent = summary.sent,
            declined = summary.declined,
            aborted = summary.aborted,
            "session finished"
        );
        Ok(summary)
    }
}
