use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crunchtrace")]
#[command(about = "Record and inspect call-stack traces", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory holding config.toml and recorded sessions
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Replay a JSON occurrence script and save it as a session
    Record {
        script: PathBuf,

        /// Session directory (defaults to <sessions_root>/<name>)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long)]
        name: Option<String>,
    },

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Summarize a session from its metadata document
    Show { dir: PathBuf },

    /// List recorded events
    Events {
        dir: PathBuf,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the call stack captured by one event
    Stack { dir: PathBuf, index: usize },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,

    /// Write the recommended config.toml
    Init {
        #[arg(long)]
        force: bool,
    },
}
