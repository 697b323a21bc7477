//! Console engine: prints each message as a `tag=value` line.
//!
//! Useful for dry runs: nothing leaves the machine, but the operator sees
//! exactly what would have been handed to a session.

use std::io::Write;
use std::sync::Mutex;
use tradeprompt_core::{DispatchError, ProtocolEngine, RequestMessage};

pub struct ConsoleEngine {
    out: Mutex<Box<dyn Write + Send>>,
    delimiter: char,
}

impl ConsoleEngine {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            delimiter: '|',
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for ConsoleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine for ConsoleEngine {
    fn name(&self) -> &str {
        "console"
    }

    fn send(&self, message: RequestMessage) -> Result<(), DispatchError> {
        let line = message.to_tag_value(self.delimiter);
        let mut out = self
            .out
            .lock()
            .map_err(|_| DispatchError::Transport("console writer poisoned".into()))?;
        writeln!(out, "{line}")
            .and_then(|_| out.flush())
            .map_err(|e| DispatchError::Transport(e.to_string()))?;
        tracing::info!(msg_type = message.msg_type(), "{} written to console", message.name());
        Ok(())
    }
}
