use crunchtrace_engine::{EventBuffer, FrameLocals, TraceDisposition, TraceProcessor};
use crunchtrace_types::{CapturedValue, Occurrence};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::{Error, Result};

/// One recorded occurrence together with the locals visible at that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(flatten)]
    pub occurrence: Occurrence,
    #[serde(default)]
    pub locals: Vec<(String, CapturedValue)>,
}

impl FrameLocals for ScriptStep {
    fn visit_locals(&self, visitor: &mut dyn FnMut(&str, &CapturedValue)) {
        self.locals.visit_locals(visitor)
    }
}

/// Sequence of occurrences as a host engine would have delivered them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurrenceScript {
    pub steps: Vec<ScriptStep>,
}

impl OccurrenceScript {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Decode(format!("{}: {}", path.display(), e)))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Outcome of feeding a script through a processor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub delivered: usize,
    pub ignored: usize,
}

/// Delivers every step to `processor` in order.
///
/// Stops at the first fatal trace error; events recorded before it stay in the
/// processor's buffer and can still be saved.
pub fn replay_script<B: EventBuffer>(
    script: &OccurrenceScript,
    processor: &mut TraceProcessor<B>,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for step in &script.steps {
        match processor.on_occurrence(&step.occurrence, step)? {
            TraceDisposition::Continue => summary.delivered += 1,
            TraceDisposition::Ignore => summary.ignored += 1,
            TraceDisposition::Detach => break,
        }
    }

    info!(
        delivered = summary.delivered,
        ignored = summary.ignored,
        events = processor.events().len(),
        "replayed occurrence script"
    );
    Ok(summary)
}
