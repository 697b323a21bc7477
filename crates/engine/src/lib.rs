//! Protocol engine adapters for tradeprompt.
//!
//! The real FIX engine lives outside this workspace. These adapters are the
//! hand-off points selected by `[engine]` in the config:
//!
//! - **console**: print the `tag=value` rendering (dry run)
//! - **journal**: append JSON lines for an external engine process

pub mod console;
pub mod journal;

pub use console::ConsoleEngine;
pub use journal::{JournalEngine, JournalEntry};

use std::sync::Arc;
use tradeprompt_config::{EngineConfig, EngineKind};
use tradeprompt_core::{DispatchError, ProtocolEngine};

/// Build the engine described by `config`.
pub fn build_from_config(config: &EngineConfig) -> Result<Arc<dyn ProtocolEngine>, DispatchError> {
    let engine: Arc<dyn ProtocolEngine> = match config.kind {
        EngineKind::Console => Arc::new(ConsoleEngine::new()),
        EngineKind::Journal => {
            let path = config.journal_path.clone().ok_or_else(|| {
                DispatchError::NotConfigured("journal engine needs journal_path".into())
            })?;
            Arc::new(JournalEngine::new(path))
        }
    };
    tracing::debug!(engine = engine.name(), "engine ready");
    Ok(engine)
}

#[cfg(test)]
mod test_support {
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tradeprompt_core::{
        Field, FieldWriter, RequestMessage, SecurityListRequest, SecurityListRequestType, tag,
    };

    /// Cloneable in-memory writer for capturing console output.
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    pub fn sample_security_list() -> RequestMessage {
        let mut req = SecurityListRequest::new("SECURITYREQID", SecurityListRequestType::AllSecurities);
        req.set(Field::identifier(tag::SENDER_COMP_ID, "A"));
        req.set(Field::identifier(tag::TARGET_COMP_ID, "B"));
        RequestMessage::SecurityList(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn builds_console_by_default() {
        let engine = build_from_config(&EngineConfig::default()).unwrap();
        assert_eq!(engine.name(), "console");
    }

    #[test]
    fn journal_requires_path() {
        let config = EngineConfig {
            kind: EngineKind::Journal,
            journal_path: None,
        };
        assert!(matches!(
            build_from_config(&config),
            Err(DispatchError::NotConfigured(_))
        ));

        let config = EngineConfig {
            kind: EngineKind::Journal,
            journal_path: Some(PathBuf::from("/tmp/tradeprompt.jsonl")),
        };
        assert_eq!(build_from_config(&config).unwrap().name(), "journal");
    }
}
