//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated project root
//! - Tweaking and persisting its configuration
//! - Building recorders bound to that root
//! - Executing CLI commands against it

use anyhow::Result;
use assert_cmd::Command;
use callsnap_core::config::CONFIG_FILE;
use callsnap_core::{Config, DEFAULT_RUN_ID, Layout};
use callsnap_runtime::Recorder;
use callsnap_store::SnapshotStore;
use callsnap_types::{FunctionIdentity, Snapshot};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use callsnap_testing::{TestWorld, fixtures};
/// use callsnap_types::Snapshot;
/// use serde_json::json;
///
/// let world = TestWorld::new();
/// let recorder = world.recorder();
/// let math = fixtures::adder();
/// recorder.instrument(&math, Snapshot::template("M", "add"));
/// math.call("add", vec![json!(2), json!(3)]).unwrap();
///
/// assert_eq!(world.history("M", "add").len(), 1);
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config: Config,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated project root with default configuration and a
    /// pinned run id.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = Config {
            run_id: Some(DEFAULT_RUN_ID.to_string()),
            ..Default::default()
        };

        Self {
            temp_dir,
            config,
            env_vars: HashMap::new(),
        }
    }

    /// Adjust the configuration used by [`recorder`](Self::recorder) and
    /// written by [`write_config`](Self::write_config).
    pub fn with_config(mut self, f: impl FnOnce(&mut Config)) -> Self {
        f(&mut self.config);
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> Layout {
        Layout::from_config(self.root(), &self.config)
    }

    /// Persist the configuration as `callsnap.toml` in the project root.
    pub fn write_config(&self) -> Result<PathBuf> {
        let path = self.root().join(CONFIG_FILE);
        self.config.save_to(&path)?;
        Ok(path)
    }

    /// Recorder bound to this root and configuration.
    pub fn recorder(&self) -> Recorder {
        Recorder::from_config(self.root(), &self.config)
    }

    /// Read-side view over the same files the recorder writes.
    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::from_config(self.layout(), &self.config)
    }

    /// History of one function, newest first. Empty if absent or unreadable.
    pub fn history(&self, target: &str, function: &str) -> Vec<Snapshot> {
        self.store()
            .history(&FunctionIdentity::new(target, function))
            .unwrap_or_default()
    }

    /// Global index, most recently updated first. Empty if absent or
    /// unreadable.
    pub fn index(&self) -> Vec<Snapshot> {
        self.store().index().unwrap_or_default()
    }

    /// Index entry for one function.
    pub fn index_entry(&self, target: &str, function: &str) -> Option<Snapshot> {
        let identity = FunctionIdentity::new(target, function);
        self.index()
            .into_iter()
            .find(|entry| entry.identity() == identity)
    }

    /// Path of an archived output relative to the output directory.
    pub fn output_path(&self, relative: &str) -> PathBuf {
        self.layout().output_relative(relative)
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--root").arg(self.root()).arg("--format").arg("plain");
        cmd.current_dir(self.root());
        cmd.env_remove("CALLSNAP_ROOT")
            .env_remove("CALLSNAP_CONFIG")
            .env_remove("CALLSNAP_RUN_ID");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `callsnap` binary with the given arguments.
    ///
    /// Requires the binary to be built; cargo does this for the CLI crate's
    /// integration tests.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("callsnap")
            .map_err(|e| anyhow::anyhow!("Failed to find callsnap binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_pins_run_id() {
        let world = TestWorld::new();
        assert_eq!(world.recorder().run_id(), DEFAULT_RUN_ID);
    }

    #[test]
    fn test_write_config_round_trips() {
        let world = TestWorld::new().with_config(|c| c.history.cap = 3);
        let path = world.write_config().unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.history.cap, 3);
    }

    #[test]
    fn test_empty_world_reads_empty() {
        let world = TestWorld::new();
        assert!(world.index().is_empty());
        assert!(world.history("M", "add").is_empty());
        assert!(world.index_entry("M", "add").is_none());
    }
}
