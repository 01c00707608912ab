//! # ModRS Module Command Utilities
//!
//! File: cli/src/commands/module/utils/mod.rs
//!
//! Helpers shared by the `modrs module` subcommands.
//!
//! - `tree_printer`: draws a planned or created module as a `tree`-style listing.
//!

/// # Tree Printer (`tree_printer`)
///
/// Used by `modrs module create` to show the module before (preview) or after
/// (real run) creation.
pub mod tree_printer;
