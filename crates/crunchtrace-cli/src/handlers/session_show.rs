use crate::context::ExecutionContext;
use crate::views::MetadataView;
use anyhow::{Context, Result};
use crunchtrace_runtime::PersistedSession;
use std::path::Path;

pub fn handle(ctx: &ExecutionContext, dir: &Path) -> Result<()> {
    let session = PersistedSession::load_from_directory(dir);
    let metadata = session.load_metadata().with_context(|| {
        format!(
            "failed to load session metadata {}",
            session.metadata_file().display()
        )
    })?;

    if ctx.is_json() {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    print!(
        "{}",
        MetadataView {
            directory: dir,
            metadata: &metadata,
            enable_color: ctx.enable_color,
        }
    );
    Ok(())
}
