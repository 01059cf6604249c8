use crunchtrace_types::TraceEvent;
use parking_lot::Mutex;
use std::sync::Arc;

/// Append-only destination for trace events.
pub trait EventBuffer {
    fn push_event(&mut self, event: TraceEvent);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventBuffer for Vec<TraceEvent> {
    fn push_event(&mut self, event: TraceEvent) {
        self.push(event);
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Event buffer shared by processors running on different threads.
///
/// Each traced thread owns its own processor (and therefore its own call
/// stack) and a clone of this handle. Appends are serialized by the lock, so
/// events of one thread keep their relative order.
#[derive(Debug, Clone, Default)]
pub struct SharedEventBuffer {
    inner: Arc<Mutex<Vec<TraceEvent>>>,
}

impl SharedEventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the accumulated events out, leaving the buffer empty.
    pub fn take(&self) -> Vec<TraceEvent> {
        std::mem::take(&mut *self.inner.lock())
    }
}

impl EventBuffer for SharedEventBuffer {
    fn push_event(&mut self, event: TraceEvent) {
        self.inner.lock().push(event);
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crunchtrace_types::{ExecutionCursor, LineExecutionEvent, StackSnapshot};

    fn line_event(line: u32) -> TraceEvent {
        LineExecutionEvent::new(ExecutionCursor::new("a.py", line), StackSnapshot::default())
            .into()
    }

    #[test]
    fn test_clones_share_storage() {
        let buffer = SharedEventBuffer::new();
        let mut writer = buffer.clone();
        writer.push_event(line_event(1));
        writer.push_event(line_event(2));

        assert_eq!(buffer.len(), 2);
        let taken = buffer.take();
        assert_eq!(taken.len(), 2);
        assert!(writer.is_empty());
    }
}
