//! # ModRS Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! ModRS scaffolds Gradle modules (Android, Kotlin, Kotlin-Multiplatform) into
//! an existing multi-module project: it inserts the `include(...)` statement
//! into `settings.gradle(.kts)` at its alphabetical position and lays out the
//! module's directories, build file, README and `.gitignore`.
//!
//! The `modrs` binary is a thin command-line front end over this library; the
//! scaffolding engine in `scaffold` has no dependency on it and can be driven
//! headlessly.
//!
//! ## Architecture
//!
//! - `core`: errors, preferences, template rendering
//! - `common`: filesystem helpers
//! - `scaffold`: request model, settings editor, layout builder, orchestrator
//! - `commands`: `modrs module ...` and `modrs config ...` handlers
//!
pub mod commands;
pub mod common;
pub mod core;
pub mod scaffold;
