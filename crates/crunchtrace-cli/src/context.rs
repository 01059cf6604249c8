use crate::types::OutputFormat;
use anyhow::{Context, Result};
use crunchtrace_runtime::Config;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub struct ExecutionContext {
    data_dir: PathBuf,
    config: OnceCell<Config>,
    pub format: OutputFormat,
    pub enable_color: bool,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf, format: OutputFormat, enable_color: bool) -> Self {
        Self {
            data_dir,
            config: OnceCell::new(),
            format,
            enable_color,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        Config::path_in(&self.data_dir)
    }

    pub fn config(&self) -> Result<&Config> {
        self.config.get_or_try_init(|| {
            let path = self.config_path();
            Config::load_from(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
