use crate::context::ExecutionContext;
use anyhow::{Context, Result, bail};
use crunchtrace_runtime::Config;

pub fn show(ctx: &ExecutionContext) -> Result<()> {
    let config = ctx.config()?;

    if ctx.is_json() {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    let path = ctx.config_path();
    if !path.exists() {
        println!("# {} not found, showing defaults", path.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

pub fn init(ctx: &ExecutionContext, force: bool) -> Result<()> {
    let path = ctx.config_path();
    if path.exists() && !force {
        bail!(
            "config already exists at {}; pass --force to overwrite",
            path.display()
        );
    }

    Config::recommended()
        .save_to(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
