//! Shared fixture for CLI integration tests.
#![allow(dead_code)]

use assert_cmd::Command;
use crunchtrace_runtime::OccurrenceScript;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct CliFixture {
    _temp_dir: TempDir,
    data_dir: PathBuf,
}

impl Default for CliFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CliFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".crunchtrace");
        fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            _temp_dir: temp_dir,
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("crunchtrace").expect("Failed to find crunchtrace binary");
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .env_remove("RUST_LOG")
            .env_remove("CRUNCHTRACE_PATH");
        cmd
    }

    pub fn write_script(&self, name: &str, script: &OccurrenceScript) -> PathBuf {
        let path = self.data_dir.join(name);
        let json = serde_json::to_string_pretty(script).expect("Failed to encode script");
        fs::write(&path, json).expect("Failed to write script");
        path
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.data_dir.join("config.toml"), content).expect("Failed to write config");
    }

    /// Runs `record` into `<data_dir>/<name>` and returns that directory.
    pub fn record(&self, script: &OccurrenceScript, name: &str) -> PathBuf {
        let script_path = self.write_script(&format!("{}.json", name), script);
        let out = self.data_dir.join(name);
        self.command()
            .arg("record")
            .arg(&script_path)
            .arg("--out")
            .arg(&out)
            .assert()
            .success();
        out
    }

    pub fn json_output(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .args(args)
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run crunchtrace");
        assert!(
            output.status.success(),
            "{:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Failed to parse JSON output")
    }
}
