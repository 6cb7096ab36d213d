//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use vansanten_test_utils::{temp_dir, write_sample_translations};

const ENV_VARS: &[&str] = &[
    "VANSANTEN_CONFIG",
    "VANSANTEN_TRANSLATIONS",
    "VANSANTEN_LOCALE",
    "VANSANTEN_ENV",
    "VANSANTEN_LOG_LEVEL",
    "VANSANTEN_LOG_FORMAT",
    "VANSANTEN_LOG_FILE",
    "VANSANTEN_LOG_SOURCE",
    "RUST_LOG",
];

/// Test context with a temporary project directory
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: temp_dir(),
        }
    }

    /// Write `.vansanten/config.yaml`
    pub fn with_config(self, config: &str) -> Self {
        let dir = self.path().join(".vansanten");
        std::fs::create_dir_all(&dir).expect("Failed to create state dir");
        std::fs::write(dir.join("config.yaml"), config).expect("Failed to write config");
        self
    }

    /// Write the sample translations and return their path
    pub fn sample_translations(&self) -> PathBuf {
        write_sample_translations(&self.temp_dir)
    }

    /// Write a file relative to the project directory
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the default storage file
    pub fn storage_path(&self) -> PathBuf {
        self.path().join(".vansanten").join("storage.json")
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("vansanten").expect("Binary not found");
        cmd.current_dir(self.path()).env("NO_COLOR", "1");
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
