use crunchtrace_types::{Occurrence, VariableSet};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::locals::{FrameLocals, push_traceable_variables};

/// Downstream consumer that receives a copy of every traced occurrence.
///
/// The processor logs and discards sink errors; a failing sink never affects
/// the event buffer.
pub trait SimulationSink {
    fn save_for_simulator(&mut self, occurrence: &Occurrence, locals: &dyn FrameLocals)
    -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SimulationSink for NullSink {
    fn save_for_simulator(
        &mut self,
        _occurrence: &Occurrence,
        _locals: &dyn FrameLocals,
    ) -> Result<()> {
        Ok(())
    }
}

/// Raw occurrence as seen by the sink, with its locals copied out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedOccurrence {
    pub occurrence: Occurrence,
    pub locals: VariableSet,
}

/// Keeps every raw occurrence in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    recorded: Vec<RecordedOccurrence>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> &[RecordedOccurrence] {
        &self.recorded
    }

    pub fn into_recorded(self) -> Vec<RecordedOccurrence> {
        self.recorded
    }
}

impl SimulationSink for RecordingSink {
    fn save_for_simulator(
        &mut self,
        occurrence: &Occurrence,
        locals: &dyn FrameLocals,
    ) -> Result<()> {
        let mut copied = VariableSet::new();
        push_traceable_variables(locals, &mut copied);
        self.recorded.push(RecordedOccurrence {
            occurrence: occurrence.clone(),
            locals: copied,
        });
        Ok(())
    }
}
