pub mod config;
pub mod error;
pub mod lazy;
pub mod persisted_session;
pub mod recording;
pub mod replay;
pub mod size;

pub use config::{Config, expand_tilde, resolve_data_dir};
pub use error::{Error, Result};
pub use lazy::LazyLoadedSession;
pub use persisted_session::{METADATA_FILENAME, PersistedSession, RECORDING_FILENAME};
pub use replay::{OccurrenceScript, ReplaySummary, ScriptStep, replay_script};
pub use size::HumanReadableByteSize;
