//! Structural checks over recorded event sequences.

use crunchtrace_types::{EventKind, TraceEvent};

/// Stack depth recorded by each event, in order.
pub fn stack_depths(events: &[TraceEvent]) -> Vec<usize> {
    events.iter().map(|e| e.stack().depth()).collect()
}

pub fn count_kind(events: &[TraceEvent], kind: EventKind) -> usize {
    events.iter().filter(|e| e.kind() == kind).count()
}

/// Panics unless every prefix has at least as many enters as exits.
pub fn assert_prefix_balanced(events: &[TraceEvent]) {
    let mut open: i64 = 0;
    for (idx, event) in events.iter().enumerate() {
        match event.kind() {
            EventKind::MethodEnter => open += 1,
            EventKind::MethodExit => open -= 1,
            EventKind::LineExecution => {}
        }
        assert!(
            open >= 0,
            "more exits than enters after event #{} ({} at {})",
            idx,
            event.kind(),
            event.cursor()
        );
    }
}

/// Prefix balance plus equal enter/exit totals.
pub fn assert_well_nested(events: &[TraceEvent]) {
    assert_prefix_balanced(events);
    assert_eq!(
        count_kind(events, EventKind::MethodEnter),
        count_kind(events, EventKind::MethodExit),
        "enter/exit counts differ"
    );
}

/// Every snapshot's depth matches the number of currently open calls.
pub fn assert_depths_track_calls(events: &[TraceEvent]) {
    let mut open: usize = 0;
    for (idx, event) in events.iter().enumerate() {
        match event.kind() {
            EventKind::MethodEnter => open += 1,
            EventKind::MethodExit => open = open.saturating_sub(1),
            EventKind::LineExecution => {}
        }
        assert_eq!(
            event.stack().depth(),
            open,
            "event #{} ({}) recorded wrong stack depth",
            idx,
            event.kind()
        );
    }
}
