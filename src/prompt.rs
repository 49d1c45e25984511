//! Interactive yes/no prompting
//!
//! The whole tool is gated on `[Y/n]` questions. The question text itself is
//! emitted through the `Logger` (so it lands in the run log); the types here
//! only read and classify the answer. Reads are blocking with no timeout:
//! the tool is meant for interactive use only.

use std::io::{self, BufRead};

/// Classify one line of user input as affirmative or not.
///
/// Empty input, `y`, and `Y` affirm. Anything else, including `n`, `N`,
/// and arbitrary text, declines. Only the line terminator is stripped, the
/// way a shell `read` would leave the answer.
pub fn is_affirmative(line: &str) -> bool {
    matches!(line.trim_end_matches(['\r', '\n']), "" | "y" | "Y")
}

/// Source of yes/no decisions. Implemented by the interactive stdin reader
/// and by scripted fakes in tests.
pub trait Prompt {
    /// Block until one answer is available. End-of-input declines.
    fn read_decision(&mut self) -> bool;
}

/// Reads answers from standard input, one line per question.
pub struct StdinPrompter;

impl Prompt for StdinPrompter {
    fn read_decision(&mut self) -> bool {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // EOF: stdin is gone, nothing should be confirmed
            Ok(0) => false,
            Ok(_) => is_affirmative(&line),
            Err(_) => false,
        }
    }
}

/// Reads answers from any `BufRead`. Tests feed it a `Cursor` of scripted
/// replies.
pub struct ReaderPrompter<R: BufRead> {
    input: R,
}

impl<R: BufRead> ReaderPrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Prompt for ReaderPrompter<R> {
    fn read_decision(&mut self) -> bool {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => is_affirmative(&line),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_input_is_affirmative() {
        assert!(is_affirmative(""));
        assert!(is_affirmative("\n"));
        assert!(is_affirmative("\r\n"));
    }

    #[test]
    fn test_y_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("Y\n"));
        assert!(is_affirmative("y"));
    }

    #[test]
    fn test_everything_else_declines() {
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative("N\n"));
        assert!(!is_affirmative("yes\n"));
        assert!(!is_affirmative("no\n"));
        assert!(!is_affirmative(" y\n"));
        assert!(!is_affirmative("maybe\n"));
    }

    #[test]
    fn test_reader_prompter_consumes_lines_in_order() {
        let mut p = ReaderPrompter::new(Cursor::new("y\nn\n\nx\n"));
        assert!(p.read_decision());
        assert!(!p.read_decision());
        assert!(p.read_decision()); // blank line defaults to yes
        assert!(!p.read_decision());
        // exhausted input declines
        assert!(!p.read_decision());
    }

    proptest! {
        /// Anything other than "", "y", "Y" declines.
        #[test]
        fn non_affirmative_lines_decline(s in "[a-zA-Z0-9 ]{1,12}") {
            prop_assume!(s != "y" && s != "Y");
            let input = format!("{}\n", s);
            prop_assert!(!is_affirmative(&input));
        }
    }
}
