//! Terminal prompt: line-oriented operator input.
//!
//! Reads from any `BufRead` and writes prompts to any `Write`, so the same
//! type serves stdin/stdout in the binary and in-memory buffers in tests.

use std::io::{self, BufRead, StdinLock, Stdout, Write};
use tradeprompt_core::Prompt;
use tradeprompt_core::error::Result;

/// Blocking prompt over a reader/writer pair.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    /// Prompt bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn next_line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!(label, "end of input");
            return Ok(None);
        }

        // Strip the terminator only; interior whitespace is the operator's.
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        tracing::trace!(label, "read line");
        Ok(Some(line))
    }

    fn show(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}
