use super::load_events;
use crate::context::ExecutionContext;
use crate::views::StackView;
use anyhow::{Result, bail};
use serde_json::json;
use std::path::Path;

pub fn handle(ctx: &ExecutionContext, dir: &Path, index: usize) -> Result<()> {
    let events = load_events(dir)?;
    let Some(event) = events.get(index) else {
        bail!(
            "event index {} out of range (session has {} events)",
            index,
            events.len()
        );
    };
    let stack = event.stack();

    if ctx.is_json() {
        let frames: Vec<_> = stack
            .walk_from_top()
            .map(|frame| json!({ "file": frame.cursor.file, "line": frame.cursor.line }))
            .collect();
        let doc = json!({
            "index": index,
            "kind": event.kind().as_str(),
            "cursor": event.cursor().to_string(),
            "frames": frames,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("#{} {} at {}", index, event.kind(), event.cursor());
    print!(
        "{}",
        StackView {
            stack,
            enable_color: ctx.enable_color,
        }
    );
    Ok(())
}
