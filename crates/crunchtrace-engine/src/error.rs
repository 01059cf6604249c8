use crunchtrace_types::ExecutionCursor;
use std::fmt;

/// Result type for crunchtrace-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing the call stack
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Exit or line update requested on an empty call stack.
    ///
    /// Fatal for the trace run: enter/exit pairing upstream is broken and every
    /// later event would carry a corrupted stack.
    StackUnderflow {
        operation: &'static str,
        cursor: Option<ExecutionCursor>,
    },

    /// Downstream simulation sink rejected an occurrence
    Sink(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StackUnderflow {
                operation,
                cursor: Some(cursor),
            } => write!(
                f,
                "Call stack underflow: {} at {} with no active frame",
                operation, cursor
            ),
            Error::StackUnderflow {
                operation,
                cursor: None,
            } => write!(f, "Call stack underflow: {} with no active frame", operation),
            Error::Sink(msg) => write!(f, "Simulation sink error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
