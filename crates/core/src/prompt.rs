//! Prompt trait: the abstraction over operator input.
//!
//! Implementations only provide line I/O (`next_line`, `show`); choice
//! parsing and confirmation rules are shared default methods so every
//! terminal behaves the same.

use crate::error::{Error, Result};

pub trait Prompt {
    /// Render `label: ` and read one line without its line terminator.
    /// Returns `None` at end of input.
    fn next_line(&mut self, label: &str) -> Result<Option<String>>;

    /// Write one line of display text.
    fn show(&mut self, text: &str) -> Result<()>;

    /// Read one line; end of input reads as empty text.
    fn read_line(&mut self, label: &str) -> Result<String> {
        Ok(self.next_line(label)?.unwrap_or_default())
    }

    /// List `labels` as a 1-based menu and return the chosen index.
    fn read_choice(&mut self, label: &str, labels: &[&str]) -> Result<usize> {
        for (i, choice) in labels.iter().enumerate() {
            self.show(&format!("{}) {}", i + 1, choice))?;
        }
        let input = self.read_line(label)?;
        parse_choice(&input, labels.len()).ok_or_else(|| Error::InvalidChoice {
            field: label.to_string(),
            input,
        })
    }

    /// Ask a yes/no question. Anything but "y"/"Y" is a no.
    fn read_confirmation(&mut self, label: &str) -> Result<bool> {
        self.show("")?;
        let input = self.read_line(&format!("{label}?"))?;
        Ok(is_affirmative(&input))
    }
}

/// Parse a 1-based menu choice, accepting only `1..=count`.
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=count).contains(&choice).then_some(choice)
}

pub fn is_affirmative(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_accepts_exactly_one_to_n() {
        for n in 1..=7 {
            for i in 1..=n {
                assert_eq!(parse_choice(&i.to_string(), n), Some(i));
            }
            assert_eq!(parse_choice("0", n), None);
            assert_eq!(parse_choice(&(n + 1).to_string(), n), None);
        }
    }

    #[test]
    fn choice_rejects_non_numeric_and_negative() {
        assert_eq!(parse_choice("", 3), None);
        assert_eq!(parse_choice("two", 3), None);
        assert_eq!(parse_choice("-1", 3), None);
        assert_eq!(parse_choice("1.0", 3), None);
        assert_eq!(parse_choice(" 2 ", 3), Some(2));
    }

    #[test]
    fn choice_with_no_labels_rejects_everything() {
        assert_eq!(parse_choice("1", 0), None);
    }

    #[test]
    fn only_y_confirms() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" y\r"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("YY"));
    }
}
