use crunchtrace_engine::PathFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CRUNCHTRACE_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.crunchtrace
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("CRUNCHTRACE_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("crunchtrace"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".crunchtrace"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Parent directory for new session directories.
    #[serde(default)]
    pub sessions_root: Option<PathBuf>,

    #[serde(default)]
    pub filter: PathFilter,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// Where a session named `name` is stored.
    pub fn session_directory(&self, data_dir: &Path, name: &str) -> PathBuf {
        self.sessions_root
            .clone()
            .unwrap_or_else(|| data_dir.join("sessions"))
            .join(name)
    }

    /// Starting point for `config init`: skip virtualenvs and the stdlib.
    pub fn recommended() -> Self {
        Self {
            sessions_root: None,
            filter: PathFilter::new()
                .exclude("site-packages")
                .exclude("dist-packages")
                .exclude("<frozen"),
        }
    }
}
