//! Fatal Error Handling
//!
//! A `RuntimeError` ends the current run: the driver clears the tape and
//! reports the message. Soft errors never surface here; operators signal them
//! by pushing the empty-string sentinel instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An operator needed more values than the stack holds
    #[error("stack underflow: '{op}' needs {needed} operand(s), stack has {found}")]
    StackUnderflow {
        op: char,
        needed: usize,
        found: usize,
    },

    /// A literal under construction found the wrong kind of value on top
    #[error("{mode} construction: expected {expected} on top of stack, found {found}")]
    TypeViolation {
        mode: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Console read or write failed (end of input is not an error)
    #[error("console i/o failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::Io(err.to_string())
    }
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underflow_message() {
        let err = RuntimeError::StackUnderflow {
            op: '+',
            needed: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "stack underflow: '+' needs 2 operand(s), stack has 1"
        );
    }

    #[test]
    fn test_type_violation_message() {
        let err = RuntimeError::TypeViolation {
            mode: "integer",
            expected: "integer",
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "integer construction: expected integer on top of stack, found string"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: RuntimeError = io.into();
        assert_eq!(err, RuntimeError::Io("pipe closed".to_string()));
    }
}
