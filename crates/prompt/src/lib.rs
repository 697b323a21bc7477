//! Operator prompt implementations for tradeprompt.
//!
//! - **Terminal**: blocking line I/O over stdin/stdout or any
//!   `BufRead` + `Write` pair

pub mod terminal;

pub use terminal::TerminalPrompt;
