//! Plain-text renderings of sessions, events and stacks.

use crunchtrace_runtime::HumanReadableByteSize;
use crunchtrace_types::{StackSnapshot, TraceEvent, TraceSessionMetadata, VariableSet};
use owo_colors::OwoColorize;
use std::fmt;
use std::path::Path;

pub struct MetadataView<'a> {
    pub directory: &'a Path,
    pub metadata: &'a TraceSessionMetadata,
    pub enable_color: bool,
}

impl<'a> fmt::Display for MetadataView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.metadata;
        let name = meta.name.as_deref().unwrap_or("(unnamed)");
        if self.enable_color {
            writeln!(f, "{} {}", "Session:".bold(), name.cyan())?;
        } else {
            writeln!(f, "Session: {}", name)?;
        }

        writeln!(f, "  Directory:   {}", self.directory.display())?;
        if let Some(start) = meta.start_time {
            writeln!(f, "  Started:     {}", start.to_rfc3339())?;
        }
        if let Some(end) = meta.end_time {
            writeln!(f, "  Finished:    {}", end.to_rfc3339())?;
        }
        if let Some(secs) = meta.duration_seconds() {
            writeln!(f, "  Duration:    {}s", secs)?;
        }
        match meta.events_in_session {
            Some(count) => writeln!(f, "  Events:      {}", count)?,
            None => writeln!(f, "  Events:      unknown")?,
        }
        if let Some(bytes) = meta.file_size_in_bytes {
            let human = meta
                .file_size_on_disk
                .clone()
                .unwrap_or_else(|| HumanReadableByteSize(bytes).to_string());
            writeln!(f, "  Recording:   {} ({} bytes)", human, bytes)?;
        }
        if let Some(dir) = &meta.working_directory {
            writeln!(f, "  Working dir: {}", dir)?;
        }

        write_file_list(f, "Files", meta.files_in_session.as_deref())?;
        write_file_list(f, "Excluded", meta.excluded_files.as_deref())
    }
}

fn write_file_list(f: &mut fmt::Formatter<'_>, label: &str, files: Option<&[String]>) -> fmt::Result {
    let Some(files) = files else {
        return Ok(());
    };
    writeln!(f, "  {} ({}):", label, files.len())?;
    for file in files {
        writeln!(f, "    {}", file)?;
    }
    Ok(())
}

/// One event per line: index, kind, cursor, depth and locals.
pub struct EventLineView<'a> {
    pub index: usize,
    pub event: &'a TraceEvent,
    pub enable_color: bool,
}

impl<'a> fmt::Display for EventLineView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = format!("{:<12}", self.event.kind().as_str());
        let depth = self.event.stack().depth();
        let indent = "  ".repeat(depth.saturating_sub(1));

        if self.enable_color {
            write!(
                f,
                "{:>5} {} {}{}",
                format!("#{}", self.index).bright_black(),
                kind.yellow(),
                indent,
                self.event.cursor()
            )?;
        } else {
            write!(
                f,
                "{:>5} {} {}{}",
                format!("#{}", self.index),
                kind,
                indent,
                self.event.cursor()
            )?;
        }
        if let TraceEvent::MethodEnter(enter) = self.event
            && let Some(function) = &enter.function_name
        {
            write!(f, " in {}()", function)?;
        }
        write!(f, " depth={}", depth)?;

        if let TraceEvent::MethodExit(exit) = self.event
            && let Some(value) = exit.return_value()
        {
            write!(f, " -> {}", value)?;
        }
        if !self.event.locals().is_empty() {
            write!(f, " [{}]", format_locals(self.event.locals()))?;
        }
        Ok(())
    }
}

pub fn format_locals(locals: &VariableSet) -> String {
    locals
        .iter()
        .map(|v| format!("{}={}", v.name, v.value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Innermost frame first, like a traceback read bottom-up.
pub struct StackView<'a> {
    pub stack: &'a StackSnapshot,
    pub enable_color: bool,
}

impl<'a> fmt::Display for StackView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stack.is_empty() {
            return writeln!(f, "  (empty stack)");
        }
        for (level, frame) in self.stack.walk_from_top().enumerate() {
            if self.enable_color && level == 0 {
                writeln!(f, "  #{} {}", level, frame.cursor.bold())?;
            } else {
                writeln!(f, "  #{} {}", level, frame.cursor)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crunchtrace_types::{
        CapturedValue, ExecutionCursor, LineExecutionEvent, MethodEnterEvent, StackFrame,
        StackSnapshot,
    };

    fn two_frames() -> StackSnapshot {
        StackSnapshot::from_frames(vec![
            StackFrame::new(None, ExecutionCursor::new("main.py", 3)),
            StackFrame::new(Some(0), ExecutionCursor::new("lib.py", 12)),
        ])
    }

    #[test]
    fn test_event_line_plain() {
        let mut line = LineExecutionEvent::new(ExecutionCursor::new("lib.py", 12), two_frames());
        line.locals.push_variable("n", CapturedValue::Int(3));
        let event = TraceEvent::LineExecution(line);

        let rendered = EventLineView {
            index: 4,
            event: &event,
            enable_color: false,
        }
        .to_string();

        assert!(rendered.contains("#4"));
        assert!(rendered.contains("line"));
        assert!(rendered.contains("  lib.py:12 depth=2"));
        assert!(rendered.ends_with("[n=3]"));
    }

    #[test]
    fn test_event_line_shows_entered_function() {
        let mut enter = MethodEnterEvent::new(ExecutionCursor::new("lib.py", 12), two_frames());
        enter.function_name = Some("parse".to_string());
        let event = TraceEvent::MethodEnter(enter);

        let rendered = EventLineView {
            index: 0,
            event: &event,
            enable_color: false,
        }
        .to_string();

        assert!(rendered.contains("lib.py:12 in parse() depth=2"));
    }

    #[test]
    fn test_stack_view_innermost_first() {
        let stack = two_frames();
        let rendered = StackView {
            stack: &stack,
            enable_color: false,
        }
        .to_string();

        assert_eq!(rendered, "  #0 lib.py:12\n  #1 main.py:3\n");
    }

    #[test]
    fn test_stack_view_empty() {
        let stack = StackSnapshot::default();
        let rendered = StackView {
            stack: &stack,
            enable_color: false,
        }
        .to_string();
        assert_eq!(rendered, "  (empty stack)\n");
    }

    #[test]
    fn test_metadata_view_without_optional_fields() {
        let meta = TraceSessionMetadata {
            events_in_session: Some(7),
            ..Default::default()
        };
        let rendered = MetadataView {
            directory: Path::new("/tmp/run"),
            metadata: &meta,
            enable_color: false,
        }
        .to_string();

        assert!(rendered.starts_with("Session: (unnamed)\n"));
        assert!(rendered.contains("Events:      7"));
        assert!(!rendered.contains("Files"));
    }
}
