//! TestWorld pattern for declarative CLI test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated temp directory with its own config file location
//! - Placing conversation captures as input files
//! - Executing the `chatdump` binary with that context

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use chatdump_testing::TestWorld;
///
/// let world = TestWorld::new().with_sample("conversation.json");
///
/// let result = world.run(&["markdown", "conversation.json"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(".chatdump").join("config.toml");

        Self {
            temp_dir,
            config_path,
        }
    }

    /// Config file location handed to the binary via `CHATDUMP_CONFIG`.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Absolute path of a file inside the sandbox.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Copy the checked-in sample capture into the sandbox under `dest_name`.
    pub fn with_sample(self, dest_name: &str) -> Self {
        std::fs::copy(fixtures::sample_path(), self.path(dest_name))
            .expect("Failed to copy sample conversation");
        self
    }

    /// Write a conversation capture into the sandbox.
    pub fn with_conversation(self, dest_name: &str, conversation: &Value) -> Self {
        self.write_file(dest_name, &conversation.to_string())
            .expect("Failed to write conversation");
        self
    }

    /// Write the config file the binary will pick up.
    pub fn with_config(self, toml: &str) -> Self {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create config dir");
        }
        std::fs::write(&self.config_path, toml).expect("Failed to write config");
        self
    }

    pub fn write_file(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read_file(&self, relative: impl AsRef<Path>) -> Result<String> {
        Ok(std::fs::read_to_string(self.path(relative))?)
    }

    /// Configure a command with the sandbox cwd and environment.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(self.temp_dir.path())
            .env("CHATDUMP_CONFIG", &self.config_path)
            .env_remove("RUST_LOG")
    }

    /// Run the `chatdump` binary with the given arguments.
    ///
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built, so it is only usable from the CLI crate's integration tests.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        self.run_with_stdin(args, None)
    }

    /// Run the binary, feeding `stdin` when given.
    #[allow(deprecated)]
    pub fn run_with_stdin(&self, args: &[&str], stdin: Option<&str>) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("chatdump")
            .map_err(|e| anyhow::anyhow!("Failed to find chatdump binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);
        if let Some(input) = stdin {
            cmd.write_stdin(input.to_string());
        }

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Captured result of one CLI invocation
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
