use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cursor::ExecutionCursor;
use crate::frame::StackSnapshot;
use crate::value::CapturedValue;
use crate::variables::{RETURN_VARIABLE, VariableSet};

/// Trace event recorded for one processed occurrence.
///
/// Each variant owns a snapshot of the call stack taken after the stack was
/// updated for that occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceEvent {
    MethodEnter(MethodEnterEvent),
    LineExecution(LineExecutionEvent),
    MethodExit(MethodExitEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodEnterEvent {
    pub cursor: ExecutionCursor,
    pub stack: StackSnapshot,
    /// Callee's initial bindings (its arguments at entry).
    pub locals: VariableSet,
    /// Name of the entered function, when the host engine reports one.
    pub function_name: Option<String>,
}

impl MethodEnterEvent {
    pub fn new(cursor: ExecutionCursor, stack: StackSnapshot) -> Self {
        Self {
            cursor,
            stack,
            locals: VariableSet::new(),
            function_name: None,
        }
    }

    pub fn input_variables(&self) -> &VariableSet {
        &self.locals
    }

    pub fn input_variables_mut(&mut self) -> &mut VariableSet {
        &mut self.locals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineExecutionEvent {
    pub cursor: ExecutionCursor,
    pub stack: StackSnapshot,
    pub locals: VariableSet,
}

impl LineExecutionEvent {
    pub fn new(cursor: ExecutionCursor, stack: StackSnapshot) -> Self {
        Self {
            cursor,
            stack,
            locals: VariableSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodExitEvent {
    pub cursor: ExecutionCursor,
    pub stack: StackSnapshot,
    pub locals: VariableSet,
    pub return_variables: VariableSet,
}

impl MethodExitEvent {
    pub fn new(cursor: ExecutionCursor, stack: StackSnapshot) -> Self {
        Self {
            cursor,
            stack,
            locals: VariableSet::new(),
            return_variables: VariableSet::new(),
        }
    }

    pub fn return_value(&self) -> Option<&CapturedValue> {
        self.return_variables.get(RETURN_VARIABLE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    MethodEnter,
    LineExecution,
    MethodExit,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::MethodEnter => "method_enter",
            EventKind::LineExecution => "line",
            EventKind::MethodExit => "method_exit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TraceEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TraceEvent::MethodEnter(_) => EventKind::MethodEnter,
            TraceEvent::LineExecution(_) => EventKind::LineExecution,
            TraceEvent::MethodExit(_) => EventKind::MethodExit,
        }
    }

    pub fn cursor(&self) -> &ExecutionCursor {
        match self {
            TraceEvent::MethodEnter(e) => &e.cursor,
            TraceEvent::LineExecution(e) => &e.cursor,
            TraceEvent::MethodExit(e) => &e.cursor,
        }
    }

    pub fn stack(&self) -> &StackSnapshot {
        match self {
            TraceEvent::MethodEnter(e) => &e.stack,
            TraceEvent::LineExecution(e) => &e.stack,
            TraceEvent::MethodExit(e) => &e.stack,
        }
    }

    pub fn locals(&self) -> &VariableSet {
        match self {
            TraceEvent::MethodEnter(e) => &e.locals,
            TraceEvent::LineExecution(e) => &e.locals,
            TraceEvent::MethodExit(e) => &e.locals,
        }
    }
}

impl From<MethodEnterEvent> for TraceEvent {
    fn from(event: MethodEnterEvent) -> Self {
        TraceEvent::MethodEnter(event)
    }
}

impl From<LineExecutionEvent> for TraceEvent {
    fn from(event: LineExecutionEvent) -> Self {
        TraceEvent::LineExecution(event)
    }
}

impl From<MethodExitEvent> for TraceEvent {
    fn from(event: MethodExitEvent) -> Self {
        TraceEvent::MethodExit(event)
    }
}
