use serde::{Deserialize, Serialize};

use crate::cursor::ExecutionCursor;

/// One call stack entry.
///
/// `parent` is the index of the enclosing frame within the same chain, `None`
/// for the outermost frame. Indices always point towards the root, so a chain
/// can never form a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    pub cursor: ExecutionCursor,
    pub parent: Option<usize>,
}

impl StackFrame {
    pub fn new(parent: Option<usize>, cursor: ExecutionCursor) -> Self {
        Self { cursor, parent }
    }
}

/// Owned copy of a call stack at one moment in time.
///
/// Frames are ordered root first. A snapshot shares nothing with the live
/// stack it was taken from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackSnapshot {
    frames: Vec<StackFrame>,
}

impl StackSnapshot {
    pub fn from_frames(frames: Vec<StackFrame>) -> Self {
        Self { frames }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Innermost frame.
    pub fn top(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn parent_of(&self, frame: &StackFrame) -> Option<&StackFrame> {
        frame.parent.and_then(|idx| self.frames.get(idx))
    }

    /// Walks from the innermost frame towards the root by following parent links.
    pub fn walk_from_top(&self) -> ParentChain<'_> {
        ParentChain {
            snapshot: self,
            next: self.top(),
        }
    }
}

pub struct ParentChain<'a> {
    snapshot: &'a StackSnapshot,
    next: Option<&'a StackFrame>,
}

impl<'a> Iterator for ParentChain<'a> {
    type Item = &'a StackFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.snapshot.parent_of(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> StackSnapshot {
        StackSnapshot::from_frames(vec![
            StackFrame::new(None, ExecutionCursor::new("main.py", 1)),
            StackFrame::new(Some(0), ExecutionCursor::new("lib.py", 20)),
            StackFrame::new(Some(1), ExecutionCursor::new("lib.py", 35)),
        ])
    }

    #[test]
    fn test_walk_from_top_follows_parent_links() {
        let snapshot = chain();
        let lines: Vec<u32> = snapshot.walk_from_top().map(|f| f.cursor.line).collect();
        assert_eq!(lines, vec![35, 20, 1]);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = StackSnapshot::default();
        assert_eq!(snapshot.depth(), 0);
        assert!(snapshot.top().is_none());
        assert_eq!(snapshot.walk_from_top().count(), 0);
    }

    #[test]
    fn test_root_has_no_parent() {
        let snapshot = chain();
        let root = &snapshot.frames()[0];
        assert!(snapshot.parent_of(root).is_none());
    }
}
