//! Temporary session directories and canned traces.

use anyhow::Result;
use crunchtrace_engine::{TraceEverything, TraceProcessor, TraceSession};
use crunchtrace_runtime::{
    LazyLoadedSession, OccurrenceScript, PersistedSession, replay_script,
};
use crunchtrace_types::TraceEvent;
use std::path::Path;
use tempfile::TempDir;

use crate::script::ScriptBuilder;

/// A session directory that lives as long as the fixture.
pub struct SessionFixture {
    dir: TempDir,
}

impl SessionFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn persisted(&self) -> PersistedSession {
        PersistedSession::new(self.dir.path())
    }

    pub fn lazy(&self) -> LazyLoadedSession {
        PersistedSession::load_from_directory(self.dir.path())
    }
}

/// `call a.py:10, line a.py:11, return a.py:11 -> 42`
pub fn call_line_return() -> OccurrenceScript {
    ScriptBuilder::new()
        .call("a.py", 10)
        .line(11)
        .local("x", 41)
        .ret(11, 42)
        .local("x", 41)
        .build()
}

/// Runs `script` with no file filtering and returns the events and session.
pub fn trace(script: &OccurrenceScript) -> Result<(Vec<TraceEvent>, TraceSession)> {
    let mut processor: TraceProcessor =
        TraceProcessor::new(Vec::new(), TraceEverything, TraceSession::new("fixture"));
    replay_script(script, &mut processor)?;
    Ok(processor.finish())
}
