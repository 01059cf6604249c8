use crate::context::ExecutionContext;
use anyhow::{Context, Result};
use chrono::Utc;
use crunchtrace_engine::{TraceProcessor, TraceSession};
use crunchtrace_runtime::{OccurrenceScript, PersistedSession, replay_script};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::{Path, PathBuf};

pub fn handle(
    ctx: &ExecutionContext,
    script_path: &Path,
    out: Option<PathBuf>,
    name: Option<String>,
) -> Result<()> {
    let config = ctx.config()?;
    let script = OccurrenceScript::load(script_path)
        .with_context(|| format!("failed to read script {}", script_path.display()))?;

    let name = name.unwrap_or_else(|| Utc::now().format("%Y%m%d-%H%M%S").to_string());
    let directory = out.unwrap_or_else(|| config.session_directory(ctx.data_dir(), &name));
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("failed to create {}", directory.display()))?;

    let mut processor: TraceProcessor = TraceProcessor::new(
        Vec::new(),
        config.filter.clone(),
        TraceSession::new(name.as_str()),
    );
    let outcome = replay_script(&script, &mut processor);
    let (events, session) = processor.finish();

    let metadata = PersistedSession::new(&directory)
        .save_trace(&events, &session)
        .with_context(|| format!("failed to save session to {}", directory.display()))?;

    // A partial recording is still written before the error is reported.
    let summary = outcome.with_context(|| {
        format!(
            "trace aborted after {} events; partial session saved to {}",
            events.len(),
            directory.display()
        )
    })?;

    if ctx.is_json() {
        let doc = json!({
            "session": session.name,
            "directory": directory.display().to_string(),
            "delivered": summary.delivered,
            "ignored": summary.ignored,
            "metadata": metadata,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let headline = format!("Recorded {} events", events.len());
    if ctx.enable_color {
        println!(
            "{} ({}) to {}",
            headline.green(),
            session.name.cyan(),
            directory.display()
        );
    } else {
        println!("{} ({}) to {}", headline, session.name, directory.display());
    }
    if summary.ignored > 0 {
        println!(
            "  {} occurrences skipped in {} excluded files",
            summary.ignored,
            session.excluded_files().count()
        );
    }
    Ok(())
}
