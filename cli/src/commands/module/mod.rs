//! # ModRS Module Command Group
//!
//! File: cli/src/commands/module/mod.rs
//!
//! ## Overview
//!
//! Entry point and router for the `modrs module` command group:
//! - `create`: registers a new module in the settings file and lays it out
//! - `include`: only registers an existing module in the settings file
//!
//! ## Examples
//!
//! ```bash
//! # Create an Android library module
//! modrs module create :repository:database --type android
//!
//! # Split a module into api/impl/glue, previewing first
//! modrs module create :payments --strategy three-module --preview
//!
//! # Register a module that already exists on disk
//! modrs module include :legacy:billing
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Contains the handler and arguments for `modrs module create`.
pub mod create;
/// Contains the handler and arguments for `modrs module include`.
pub mod include;
/// Shared helpers for the module subcommands (tree printing).
pub mod utils;

/// # Module Command Group Arguments (`ModuleArgs`)
#[derive(Parser, Debug)]
pub struct ModuleArgs {
    #[command(subcommand)]
    command: ModuleCommand,
}

/// # Module Subcommands (`ModuleCommand`)
#[derive(Subcommand, Debug)]
enum ModuleCommand {
    /// Create a new module and register it in settings.gradle(.kts).
    #[command(alias = "c")]
    Create(create::CreateArgs),
    /// Register an existing module in settings.gradle(.kts).
    #[command(alias = "i")]
    Include(include::IncludeArgs),
}

/// # Handle Module Command (`handle_module`)
///
/// Dispatches to the handler of the chosen subcommand.
pub fn handle_module(args: ModuleArgs) -> Result<()> {
    match args.command {
        ModuleCommand::Create(args) => create::handle_create(args),
        ModuleCommand::Include(args) => include::handle_include(args),
    }
}

/// Resolves the project root: `--root` (with `~` expanded, relative paths
/// taken from the current directory) or the current directory itself.
pub(crate) fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Ok(match root {
        Some(path) => {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
            if expanded.is_absolute() {
                expanded
            } else {
                cwd.join(expanded)
            }
        }
        None => cwd,
    })
}
