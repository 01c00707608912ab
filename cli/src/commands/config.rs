//! # ModRS Config Command
//!
//! File: cli/src/commands/config.rs
//!
//! ## Overview
//!
//! Inspects and edits the persisted preferences that fill unset
//! `module create` options:
//! - `show`: prints the effective preferences (project over user over defaults)
//! - `set`: changes one key in the user file, or in the project `.modrs.toml`
//! - `path`: prints where the preference files live
//!
//! ## Examples
//!
//! ```bash
//! modrs config set package_name com.acme
//! modrs config set defaults.use_kts false --project
//! modrs config set templates.kotlin @./kotlin-build.gradle.kts
//! modrs config show
//! ```
//!
use crate::core::config::{self, FilePreferenceStore, PreferenceStore};
use crate::core::error::{ModrsError, Result};
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing::info;

/// # Config Command Group Arguments (`ConfigArgs`)
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective preferences as TOML.
    Show,
    /// Set one preference key, e.g. `package_name` or `defaults.add_readme`.
    Set(SetArgs),
    /// Print the user and project preference file locations.
    Path,
}

#[derive(Parser, Debug)]
struct SetArgs {
    /// Preference key (`package_name`, `defaults.use_kts`, `templates.api`, ...).
    key: String,
    /// New value. Template values starting with `@` are read from that file.
    value: String,
    /// Write to the project `.modrs.toml` instead of the user file.
    #[arg(long)]
    project: bool,
}

/// # Handle Config Command (`handle_config`)
pub fn handle_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(),
        ConfigCommand::Set(args) => set(args),
        ConfigCommand::Path => path(),
    }
}

fn show() -> Result<()> {
    let prefs = config::load_preferences()?;
    let rendered =
        toml::to_string_pretty(&prefs).map_err(|e| anyhow!(ModrsError::Config(e.to_string())))?;
    print!("{}", rendered);
    Ok(())
}

fn set(args: SetArgs) -> Result<()> {
    let target = if args.project {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        config::find_project_config_path(&cwd)
            .unwrap_or_else(|| cwd.join(config::PROJECT_CONFIG_FILENAME))
    } else {
        config::user_config_path().ok_or_else(|| {
            anyhow!(ModrsError::Config(
                "Could not determine user config directory".to_string()
            ))
        })?
    };

    let mut store = FilePreferenceStore::open(&target)?;
    let mut prefs = store.get();
    prefs.set_value(&args.key, &args.value)?;
    store.set(prefs)?;
    info!("Set '{}' in {}", args.key, store.path().display());
    println!("Set '{}' in {}", args.key, store.path().display());
    Ok(())
}

fn path() -> Result<()> {
    match config::user_config_path() {
        Some(p) => println!("user:    {}", p.display()),
        None => println!("user:    (no config directory on this platform)"),
    }
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    match config::find_project_config_path(&cwd) {
        Some(p) => println!("project: {}", p.display()),
        None => println!("project: (none, would be {})", cwd.join(config::PROJECT_CONFIG_FILENAME).display()),
    }
    Ok(())
}
