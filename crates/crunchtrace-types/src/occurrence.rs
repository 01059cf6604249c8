use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cursor::ExecutionCursor;
use crate::value::CapturedValue;

/// Kind of raw notification delivered by the host execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceKind {
    Call,
    Line,
    Return,
}

impl OccurrenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrenceKind::Call => "call",
            OccurrenceKind::Line => "line",
            OccurrenceKind::Return => "return",
        }
    }
}

impl fmt::Display for OccurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw call/line/return notification.
///
/// Locals are not part of the occurrence; the engine exposes them through a
/// separate provider so they are only scanned when the occurrence is traced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub kind: OccurrenceKind,
    pub cursor: ExecutionCursor,
    #[serde(default)]
    pub function_name: Option<String>,
    /// Only meaningful for `Return`.
    #[serde(default)]
    pub return_value: Option<CapturedValue>,
}

impl Occurrence {
    pub fn call(cursor: ExecutionCursor) -> Self {
        Self {
            kind: OccurrenceKind::Call,
            cursor,
            function_name: None,
            return_value: None,
        }
    }

    pub fn line(cursor: ExecutionCursor) -> Self {
        Self {
            kind: OccurrenceKind::Line,
            cursor,
            function_name: None,
            return_value: None,
        }
    }

    pub fn returning(cursor: ExecutionCursor, value: CapturedValue) -> Self {
        Self {
            kind: OccurrenceKind::Return,
            cursor,
            function_name: None,
            return_value: Some(value),
        }
    }

    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    pub fn file(&self) -> &str {
        &self.cursor.file
    }
}
