use serde::{Deserialize, Serialize};
use std::fmt;

/// A (file, line) location inside the traced program.
///
/// Lines are 1-based; a cursor with line 0 is rejected when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCursor")]
pub struct ExecutionCursor {
    pub file: String,
    pub line: u32,
}

#[derive(Deserialize)]
struct RawCursor {
    file: String,
    line: u32,
}

impl TryFrom<RawCursor> for ExecutionCursor {
    type Error = String;

    fn try_from(raw: RawCursor) -> Result<Self, Self::Error> {
        if raw.line == 0 {
            return Err(format!("{}: line numbers start at 1", raw.file));
        }
        Ok(Self {
            file: raw.file,
            line: raw.line,
        })
    }
}

impl ExecutionCursor {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for ExecutionCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
