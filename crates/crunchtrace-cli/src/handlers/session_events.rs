use super::load_events;
use crate::context::ExecutionContext;
use crate::views::EventLineView;
use anyhow::Result;
use crunchtrace_types::TraceEvent;
use serde_json::json;
use std::path::Path;

pub fn handle(ctx: &ExecutionContext, dir: &Path, limit: Option<usize>) -> Result<()> {
    let events = load_events(dir)?;
    let shown = limit.unwrap_or(events.len()).min(events.len());

    if ctx.is_json() {
        let rows: Vec<_> = events
            .iter()
            .take(shown)
            .enumerate()
            .map(|(index, event)| {
                let function = match event {
                    TraceEvent::MethodEnter(enter) => enter.function_name.as_deref(),
                    _ => None,
                };
                let locals: Vec<_> = event
                    .locals()
                    .iter()
                    .map(|v| {
                        json!({
                            "name": v.name,
                            "type": v.value.type_name(),
                            "value": v.value,
                        })
                    })
                    .collect();
                json!({
                    "index": index,
                    "kind": event.kind().as_str(),
                    "file": event.cursor().file,
                    "line": event.cursor().line,
                    "function": function,
                    "depth": event.stack().depth(),
                    "locals": locals,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for (index, event) in events.iter().take(shown).enumerate() {
        println!(
            "{}",
            EventLineView {
                index,
                event,
                enable_color: ctx.enable_color,
            }
        );
    }
    if shown < events.len() {
        println!("... {} more events", events.len() - shown);
    }
    Ok(())
}
