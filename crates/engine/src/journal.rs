//! Journal engine: appends finished messages to a JSON-lines file.
//!
//! A separate engine process tails the file and owns everything from
//! there on (sessions, sequence numbers, transport).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tradeprompt_core::{DispatchError, ProtocolEngine, RequestMessage};

/// One line of the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub sent_at: DateTime<Utc>,
    pub engine: String,
    pub begin_string: String,
    pub msg_type: String,
    pub message: RequestMessage,
}

pub struct JournalEngine {
    path: PathBuf,
    // Serializes appends so lines never interleave.
    lock: Mutex<()>,
}

impl JournalEngine {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every entry written so far.
    pub fn entries(&self) -> Result<Vec<JournalEntry>, DispatchError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DispatchError::Transport(e.to_string())),
        };
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).map_err(|e| DispatchError::Transport(e.to_string()))
            })
            .collect()
    }
}

impl ProtocolEngine for JournalEngine {
    fn name(&self) -> &str {
        "journal"
    }

    fn send(&self, message: RequestMessage) -> Result<(), DispatchError> {
        let entry = JournalEntry {
            sent_at: Utc::now(),
            engine: self.name().to_string(),
            begin_string: message.begin_string().to_string(),
            msg_type: message.msg_type().to_string(),
            message,
        };
        let line = serde_json::to_string(&entry).map_err(|e| DispatchError::Rejected {
            engine: self.name().to_string(),
            reason: e.to_string(),
        })?;

        let _guard = self
            .lock
            .lock()
            .map_err(|_| DispatchError::Transport("journal lock poisoned".into()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DispatchError::Transport(e.to_string()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| DispatchError::Transport(format!("{}: {e}", self.path.display())))?;
        writeln!(file, "{line}").map_err(|e| DispatchError::Transport(e.to_string()))?;

        tracing::info!(
            path = %self.path.display(),
            msg_type = %entry.msg_type,
            "message journaled"
        );
        Ok(())
    }
}
