//! Command stream
//!
//! The characters still to be executed. `@` splices a string onto the front
//! (runs next), `\` onto the back (runs after everything already pending).
//! Loops and conditionals are built from these two splices alone, so the tape
//! doubles as program text and program counter.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    pending: VecDeque<char>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the next character
    pub fn next_char(&mut self) -> Option<char> {
        self.pending.pop_front()
    }

    /// Insert `program` so its first character is executed next
    pub fn splice_front(&mut self, program: &str) {
        for c in program.chars().rev() {
            self.pending.push_front(c);
        }
    }

    /// Append `program` after everything already pending
    pub fn splice_back(&mut self, program: &str) {
        self.pending.extend(program.chars());
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl From<&str> for Tape {
    fn from(program: &str) -> Self {
        Self {
            pending: program.chars().collect(),
        }
    }
}

/// The pending characters as program text
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pending.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumes_from_front() {
        let mut tape = Tape::from("ab");
        assert_eq!(tape.next_char(), Some('a'));
        assert_eq!(tape.next_char(), Some('b'));
        assert_eq!(tape.next_char(), None);
        assert!(tape.is_empty());
    }

    #[test]
    fn test_splice_front_runs_next_in_order() {
        let mut tape = Tape::from("xy");
        tape.next_char();
        tape.splice_front("12");
        assert_eq!(tape.to_string(), "12y");
    }

    #[test]
    fn test_splice_back_runs_last() {
        let mut tape = Tape::from("xy");
        tape.splice_back("12");
        assert_eq!(tape.to_string(), "xy12");
        assert_eq!(tape.len(), 4);
    }

    #[test]
    fn test_clear() {
        let mut tape = Tape::from("1 2+");
        tape.clear();
        assert!(tape.is_empty());
        assert_eq!(tape.to_string(), "");
    }
}
