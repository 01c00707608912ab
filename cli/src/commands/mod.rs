//! # ModRS Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Top-level command groups of the `modrs` CLI. Each group owns its clap
//! argument structs and a `handle_*` function that `main.rs` routes to.
//!
//! Subcommands (like `create` within `module`) are declared in their parent
//! group's own module, not here.
//!

/// Command group for reading and editing persisted preferences (`show`, `set`, `path`).
pub mod config;
/// Command group for Gradle modules (`create`, `include`).
pub mod module;
