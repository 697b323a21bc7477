//! Shared test helpers for builder tests.

use std::io::Cursor;
use std::sync::Mutex;
use tradeprompt_core::{
    DispatchError, Field, FieldWriter, MarketDataRequest, MdEntryType, MdEntryTypeEntry,
    ProtocolEngine, RelatedSymEntry, RequestMessage, SubscriptionRequestType, tag,
};
use tradeprompt_prompt::TerminalPrompt;

/// Prompt fed from a fixed script, capturing everything it writes.
pub fn scripted(input: &str) -> TerminalPrompt<Cursor<Vec<u8>>, Vec<u8>> {
    TerminalPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

/// A mock engine that records every message it is asked to send.
///
/// Optionally fails every call with a fixed error.
pub struct RecordingEngine {
    sent: Mutex<Vec<RequestMessage>>,
    call_count: Mutex<usize>,
    failure: Option<DispatchError>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
            failure: None,
        }
    }

    pub fn failing(error: DispatchError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn sent(&self) -> Vec<RequestMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl ProtocolEngine for RecordingEngine {
    fn name(&self) -> &str {
        "recording"
    }

    fn send(&self, message: RequestMessage) -> Result<(), DispatchError> {
        *self.call_count.lock().unwrap() += 1;
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// A complete MarketDataRequest from A to B.
pub fn sample_market_data() -> RequestMessage {
    let mut req =
        MarketDataRequest::new("MARKETDATAID", SubscriptionRequestType::SnapshotPlusUpdates, 0);
    req.entry_types.add(MdEntryTypeEntry {
        md_entry_type: MdEntryType::Bid,
    });
    req.related_sym.add(RelatedSymEntry {
        symbol: "US00084EAE86".into(),
    });
    req.set(Field::identifier(tag::SENDER_COMP_ID, "A"));
    req.set(Field::identifier(tag::TARGET_COMP_ID, "B"));
    RequestMessage::MarketData(req)
}
