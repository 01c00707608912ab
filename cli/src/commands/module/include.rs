//! # ModRS Module Include Command
//!
//! File: cli/src/commands/module/include.rs
//!
//! Implements `modrs module include`: registers a module that already exists
//! on disk by inserting its include statement(s) into the settings file. No
//! directories or files are created.
//!
//! ```bash
//! modrs module include :legacy:billing
//! modrs module include :payments --strategy three-module --include-path --dry-run
//! ```
//!
use crate::common::fs::io;
use crate::core::config;
use crate::core::error::{ModrsError, Result};
use crate::scaffold::orchestrator::include_request_for;
use crate::scaffold::request::{CreationStrategy, ModuleRequest};
use crate::scaffold::settings_editor::{self, InsertOutcome};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// # Include Module Arguments (`IncludeArgs`)
#[derive(Parser, Debug)]
pub struct IncludeArgs {
    /// Gradle path of the module, e.g. `:repository:database`.
    module_path: String,

    /// Project root containing settings.gradle(.kts). Defaults to the current directory.
    #[arg(long, short = 'r')]
    root: Option<PathBuf>,

    /// Register api/impl/glue sub-modules instead of the module itself.
    #[arg(long, short = 's', value_enum, default_value = "default")]
    strategy: CreationStrategy,

    /// Include keyword to use, overriding preferences and auto-detection.
    #[arg(long)]
    include_keyword: Option<String>,

    /// Emit `include(":a:b", "<root>/a/b")` with the module's directory.
    #[arg(long)]
    include_path: bool,

    /// Print the statements without modifying the settings file.
    #[arg(long)]
    dry_run: bool,
}

/// # Handle Module Include Command (`handle_include`)
pub fn handle_include(args: IncludeArgs) -> Result<()> {
    let prefs = config::load_preferences().context("Failed to load ModRS preferences")?;
    let root = super::resolve_root(args.root.as_deref())?;

    let mut request = ModuleRequest::new(&root, &args.module_path, "");
    request.creation_strategy = args.strategy;
    request.include_keyword = args.include_keyword;
    request.include_path_argument = args.include_path;
    request.module_path.validate()?;
    if let Some(keyword) = &request.include_keyword {
        if !config::is_identifier(keyword) {
            anyhow::bail!(ModrsError::Validation(format!(
                "Invalid include keyword '{}'",
                keyword
            )));
        }
    }

    let settings_file = settings_editor::find_settings_file(&root)?;
    let mut text = io::read_lines(&settings_file)?;
    let include = include_request_for(&request, &prefs, &text.lines);
    let edit = settings_editor::insert_module_include(&text.lines, &include)
        .with_context(|| format!("Cannot register module in {}", settings_file.display()))?;

    match edit.outcome {
        InsertOutcome::AlreadyIncluded => {
            println!(
                "'{}' is already included in {}",
                include.module_path,
                settings_file.display()
            );
        }
        InsertOutcome::Inserted { at, ref statements } => {
            if args.dry_run {
                println!("Would insert at line {}:", at + 1);
            } else {
                text.lines = edit.lines.clone();
                io::write_lines(&settings_file, &text)?;
                info!("Updated {}", settings_file.display());
                println!("Inserted at line {} of {}:", at + 1, settings_file.display());
            }
            for statement in statements {
                println!("  + {}", statement);
            }
        }
    }
    Ok(())
}
