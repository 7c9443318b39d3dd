//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - A seeded floor plan (T01 seats 2, T02 and T03 seat 4)
//! - Helpers that book through the binary and parse its JSON output

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A date safely beyond the one-hour lead time for the life of these tests.
#[allow(dead_code)]
pub const FUTURE_DATE: &str = "2099-06-02";

/// Variables that would leak the developer's settings into a test run.
const ISOLATED_VARS: [&str; 9] = [
    "TABLEBOOK_DATA_DIR",
    "TABLEBOOK_BUSY_TIMEOUT",
    "TABLEBOOK_LOG_MODE",
    "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "TABLEBOOK_DISABLE_AUTOINIT",
    "TABLEBOOK_OUTPUT_FORMAT",
    "TABLEBOOK_DEFAULT_PER_PAGE",
    "TABLEBOOK_MAX_PER_PAGE",
    "TABLEBOOK_TABLES",
];

/// Test environment with isolated data directory.
///
/// Commands run with the temporary directory as their working directory,
/// so a `tablebook.yaml` written there is the project configuration.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the tablebook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; tablebook creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("tablebook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A test environment with the standard floor plan initialized.
    pub fn seeded() -> Self {
        let env = Self::new();
        env.write_project_config("floor_plan:\n  - T01:2\n  - T02:4\n  - T03:4\n");
        env.command().arg("init").assert().success();
        env
    }

    /// A command builder without `--data-dir`, isolated from the caller's
    /// environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("tablebook").expect("Failed to find tablebook binary");
        cmd.current_dir(&self.temp_path);
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("tablebook.db")
    }

    /// Write `tablebook.yaml` in the working directory.
    pub fn write_project_config(&self, content: &str) -> PathBuf {
        let path = self.temp_path.join("tablebook.yaml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Write a file under the temporary directory.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Run a command with `--format json` and parse its stdout.
    ///
    /// # Panics
    /// Panics if the command fails or prints invalid JSON.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .command()
            .args(args)
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run command");

        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }

    /// Book through the flag interface and return the reservation view.
    pub fn reserve(&self, phone: &str, pax: u32, time: &str) -> Value {
        self.json(&[
            "reserve",
            "--first-name",
            "Jane",
            "--last-name",
            "Smith",
            "--phone",
            phone,
            "--pax",
            &pax.to_string(),
            "--date",
            FUTURE_DATE,
            "--time",
            time,
        ])
    }

    /// The id of the table numbered `number`.
    pub fn table_id(&self, number: &str) -> i64 {
        self.table(number)["id"].as_i64().expect("table id")
    }

    /// The table numbered `number`, as JSON.
    pub fn table(&self, number: &str) -> Value {
        let tables = self.json(&["tables"]);
        tables
            .as_array()
            .expect("tables array")
            .iter()
            .find(|t| t["table_number"] == number)
            .cloned()
            .unwrap_or_else(|| panic!("table {number} not found"))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
