//! Fluent builder for occurrence scripts.

use crunchtrace_runtime::{OccurrenceScript, ScriptStep};
use crunchtrace_types::{CapturedValue, ExecutionCursor, Occurrence, OccurrenceKind};

/// Builds an [`OccurrenceScript`] step by step.
///
/// `line` and `ret` reuse the file of the most recent `call`, which keeps
/// scenarios short:
///
/// ```
/// use crunchtrace_testing::ScriptBuilder;
///
/// let script = ScriptBuilder::new()
///     .call("a.py", 10)
///     .line(11)
///     .local("x", 1)
///     .ret(11, 42)
///     .build();
/// assert_eq!(script.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    steps: Vec<ScriptStep>,
    files: Vec<String>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call(mut self, file: &str, line: u32) -> Self {
        self.files.push(file.to_string());
        self.push(Occurrence::call(ExecutionCursor::new(file, line)))
    }

    pub fn line(self, line: u32) -> Self {
        let file = self.current_file();
        self.push(Occurrence::line(ExecutionCursor::new(file, line)))
    }

    pub fn ret(mut self, line: u32, value: impl Into<CapturedValue>) -> Self {
        let file = self.current_file();
        self.files.pop();
        self.push(Occurrence::returning(
            ExecutionCursor::new(file, line),
            value.into(),
        ))
    }

    /// Adds a local binding to the most recent step.
    pub fn local(mut self, name: &str, value: impl Into<CapturedValue>) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.locals.push((name.to_string(), value.into()));
        }
        self
    }

    /// Adds a prebuilt occurrence, e.g. a call carrying a function name.
    pub fn raw(mut self, occurrence: Occurrence) -> Self {
        match occurrence.kind {
            OccurrenceKind::Call => self.files.push(occurrence.cursor.file.clone()),
            OccurrenceKind::Return => {
                self.files.pop();
            }
            OccurrenceKind::Line => {}
        }
        self.push(occurrence)
    }

    pub fn build(self) -> OccurrenceScript {
        OccurrenceScript { steps: self.steps }
    }

    fn push(mut self, occurrence: Occurrence) -> Self {
        self.steps.push(ScriptStep {
            occurrence,
            locals: Vec::new(),
        });
        self
    }

    fn current_file(&self) -> String {
        self.files
            .last()
            .cloned()
            .unwrap_or_else(|| "<module>".to_string())
    }
}

/// `depth` nested calls, one line step in each, unwound in order.
///
/// Produces `3 * depth` steps.
pub fn nested_calls(file: &str, depth: u32) -> OccurrenceScript {
    let mut builder = ScriptBuilder::new();
    for level in 0..depth {
        builder = builder
            .call(file, level * 10 + 1)
            .local("level", level as i64)
            .line(level * 10 + 2)
            .local("level", level as i64);
    }
    for level in (0..depth).rev() {
        builder = builder.ret(level * 10 + 3, level as i64);
    }
    builder.build()
}
