//! Error types for the tradeprompt domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Prompt and codec
//! failures abort the request being built; only [`Error::Input`] is fatal
//! to the whole session.

use thiserror::Error;

/// The top-level error type for all tradeprompt operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Prompt errors ---
    #[error("Input error: {0}")]
    Input(String),

    #[error("Invalid {field}: {input}")]
    InvalidChoice { field: String, input: String },

    // --- Codec errors ---
    #[error("Invalid decimal for {field}: {input:?}")]
    DecimalParse { field: String, input: String },

    // --- Assembler errors ---
    #[error("No request builder for version {0}")]
    UnsupportedVersion(String),

    #[error("Incomplete message: {0}")]
    IncompleteMessage(String),

    // --- Engine errors ---
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Whether the error ends the interactive session rather than just the
    /// request being built.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Input(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Input(e.to_string())
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures reported by a protocol engine. Surfaced to the operator as-is.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("{engine} rejected the message: {reason}")]
    Rejected { engine: String, reason: String },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Engine not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_choice_displays_field_and_input() {
        let err = Error::InvalidChoice {
            field: "Side".into(),
            input: "9".into(),
        };
        assert_eq!(err.to_string(), "Invalid Side: 9");
    }

    #[test]
    fn dispatch_error_is_carried_verbatim() {
        let err: Error = DispatchError::Rejected {
            engine: "console".into(),
            reason: "session not logged on".into(),
        }
        .into();
        assert!(err.to_string().contains("session not logged on"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn only_input_errors_are_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(Error::from(io).is_fatal());
        assert!(!Error::UnsupportedVersion("FIX.4.2".into()).is_fatal());
        assert!(
            !Error::DecimalParse {
                field: "Price".into(),
                input: "abc".into()
            }
            .is_fatal()
        );
    }
}
