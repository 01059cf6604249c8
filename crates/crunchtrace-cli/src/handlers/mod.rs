pub mod config;
pub mod record;
pub mod session_events;
pub mod session_show;
pub mod session_stack;

use anyhow::{Context, Result};
use crunchtrace_runtime::PersistedSession;
use crunchtrace_types::TraceEvent;
use std::path::Path;

/// Reads the full recording of the session stored in `dir`.
fn load_events(dir: &Path) -> Result<Vec<TraceEvent>> {
    let session = PersistedSession::load_from_directory(dir);
    session
        .load_buffer()
        .with_context(|| format!("failed to load recording {}", session.buffer_file().display()))
}
