use super::args::{Cli, Commands, ConfigCommand, SessionCommand};
use super::handlers;
use crate::context::ExecutionContext;
use crate::types::LogLevel;
use anyhow::Result;
use crunchtrace_runtime::resolve_data_dir;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let enable_color = !cli.no_color && std::io::stdout().is_terminal();
    let ctx = ExecutionContext::new(data_dir, cli.format, enable_color);

    match cli.command {
        Commands::Session { command } => match command {
            SessionCommand::Show { dir } => handlers::session_show::handle(&ctx, &dir),
            SessionCommand::Events { dir, limit } => {
                handlers::session_events::handle(&ctx, &dir, limit)
            }
            SessionCommand::Stack { dir, index } => {
                handlers::session_stack::handle(&ctx, &dir, index)
            }
        },

        Commands::Record { script, out, name } => {
            handlers::record::handle(&ctx, &script, out, name)
        }

        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&ctx),
            ConfigCommand::Init { force } => handlers::config::init(&ctx, force),
        },
    }
}

/// Installs the stderr subscriber; `RUST_LOG` wins over `--log-level`.
fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
