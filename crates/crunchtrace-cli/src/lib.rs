mod args;
mod commands;
pub mod context;
mod handlers;
pub mod types;
pub mod views;

pub use args::{Cli, Commands, ConfigCommand, SessionCommand};
pub use commands::run;
