use crunchtrace_types::{ExecutionCursor, StackFrame, StackSnapshot};

use crate::{Error, Result};

/// Live call stack of one traced thread.
///
/// Frames are stored root first; each frame's `parent` is the index of the
/// frame below it. Only the top is ever popped, so parent indices of the
/// remaining frames stay valid.
#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<StackFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_frame(&mut self, cursor: ExecutionCursor) {
        let parent = self.frames.len().checked_sub(1);
        self.frames.push(StackFrame::new(parent, cursor));
    }

    pub fn exit_frame(&mut self) -> Result<StackFrame> {
        self.frames.pop().ok_or(Error::StackUnderflow {
            operation: "exit_frame",
            cursor: None,
        })
    }

    /// Moves the current frame to a new line within the same call.
    pub fn new_cursor_in_current_frame(&mut self, cursor: ExecutionCursor) -> Result<()> {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.cursor = cursor;
                Ok(())
            }
            None => Err(Error::StackUnderflow {
                operation: "new_cursor_in_current_frame",
                cursor: Some(cursor),
            }),
        }
    }

    pub fn current_frame(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Deep copy of the whole chain. The returned snapshot owns its frames and
    /// is unaffected by any later mutation of this stack.
    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot::from_frames(self.frames.clone())
    }
}
