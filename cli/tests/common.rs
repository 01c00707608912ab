//! # ModRS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`module.rs`, `config.rs`,
//! `scenarios.rs`). Every `modrs` invocation made through `modrs_cmd` reads
//! and writes its user preferences in a throwaway location, so tests never
//! see (or touch) the preferences of the machine running them.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// # Get ModRS Command (`modrs_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `modrs` binary with
/// `MODRS_CONFIG` pointed at `config_dir/config.toml` and the working
/// directory set to `config_dir`.
pub fn modrs_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modrs").expect("Failed to find modrs binary for testing");
    cmd.env("MODRS_CONFIG", config_dir.join("config.toml"))
        .env_remove("RUST_LOG")
        .current_dir(config_dir);
    cmd
}

/// Creates a temporary Gradle project whose settings file holds `settings`.
pub fn gradle_project(settings_name: &str, settings: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp project");
    fs::write(dir.path().join(settings_name), settings).expect("Failed to write settings file");
    dir
}

/// Reads a file below `root`, panicking with the path on failure.
pub fn read(root: &Path, relative: &str) -> String {
    let path = root.join(relative);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

/// Number of regular files below `root`, the root's own settings files excluded.
pub fn count_files(root: &Path) -> usize {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.depth() > 1 || !e.file_name().to_string_lossy().starts_with("settings.gradle"))
        .count()
}
