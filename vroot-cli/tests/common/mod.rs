//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - An isolated root directory and home directory per test
//! - Command builder helpers that ignore the caller's environment
//! - Helpers for writing fixture files

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads; cleared for every command.
const VROOT_ENV_VARS: &[&str] = &[
    "VROOT_ROOT",
    "VROOT_CONFIG",
    "VROOT_WORKING_DIR",
    "VROOT_TEMP_DIR",
    "VROOT_ALIASES",
    "VROOT_WATCH_PATH",
    "VROOT_WATCH_RECURSIVE",
    "VROOT_POLL_INTERVAL_US",
    "VROOT_LOG_MODE",
];

/// Test environment with an isolated root and home directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Root of the path space
    pub root: PathBuf,
    /// Stand-in home directory, so no user config is picked up
    pub home: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with empty `root/` and `home/`
    /// directories.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path().join("root");
        let home = temp_dir.path().join("home");
        std::fs::create_dir_all(&root).expect("Failed to create root");
        std::fs::create_dir_all(&home).expect("Failed to create home");

        Self {
            temp_dir,
            root,
            home,
        }
    }

    /// A command with a clean environment, run from the root, without
    /// `--root`.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("vroot").expect("Failed to find vroot binary");
        for var in VROOT_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.home).current_dir(&self.root);
        cmd
    }

    /// A command with `--root` pointing at this environment's root.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--root").arg(&self.root);
        cmd
    }

    /// The root as a string, as printed in internal paths.
    pub fn root_str(&self) -> String {
        self.root.to_str().expect("temp path is UTF-8").to_string()
    }

    /// Write a file below the root, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Create a directory below the root.
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Path of the temp directory holding `root/` and `home/`.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Split command output into trimmed, non-empty lines.
#[allow(dead_code)]
pub fn lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
