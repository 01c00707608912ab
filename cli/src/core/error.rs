//! # ModRS Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout ModRS. Module creation
//! fails for a handful of well-understood reasons (bad input, a settings file
//! without an include block, filesystem trouble), and each of them gets its own
//! variant so callers can classify a failure without parsing messages.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ModrsError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover the stages of a module creation:
//! - Request validation errors
//! - Settings-file errors (missing file, no include block)
//! - Filesystem errors while laying out the module
//! - Preference (configuration) errors
//! - Template errors (unreadable template files)
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if leaf.is_empty() {
//!     return Err(ModrsError::Validation("Module name must not be empty".into()))?;
//! }
//!
//! // Classify a failure coming back from the orchestrator
//! match result {
//!     Err(e) if e.downcast_ref::<ModrsError>().map_or(false, |me| matches!(me, ModrsError::NoIncludeBlock { .. })) => {
//!         println!("Add at least one include(...) line to settings.gradle.kts first.");
//!     }
//!     other => other?,
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the ModRS application.
#[derive(Error, Debug)]
pub enum ModrsError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No include block found for '{keyword}(\"': the block is missing or starts on the first line")]
    NoIncludeBlock { keyword: String },

    #[error("No settings.gradle.kts or settings.gradle found in '{}'", root.display())]
    SettingsFileNotFound { root: PathBuf },

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
