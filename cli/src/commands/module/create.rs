//! # ModRS Module Create Command
//!
//! File: cli/src/commands/module/create.rs
//!
//! ## Overview
//!
//! This module implements `modrs module create`, the data-collection surface
//! for module creation. It:
//! - Parses the command-line options
//! - Fills unset options from the user's preferences
//! - Builds one immutable `ModuleRequest`
//! - Hands it to the `ModuleCreator` with a console listener
//! - Prints the resulting (or, with `--preview`, the planned) module tree
//!
//! ## Examples
//!
//! ```bash
//! # Kotlin module at <root>/repository/database, package com.example.database
//! modrs module create :repository:database
//!
//! # Android module with Groovy build file and explicit package
//! modrs module create :feature:login --type android --groovy --package com.acme.login
//!
//! # Multiplatform module with custom source sets, preview only
//! modrs module create :shared --platform multiplatform \
//!     --source-set commonMain --source-set iosMain --preview
//! ```
//!
use super::utils::tree_printer;
use crate::core::config::{self, MemoryPreferenceStore, Preferences};
use crate::core::error::Result;
use crate::scaffold::orchestrator::{CreationListener, CreationReport, ModuleCreator};
use crate::scaffold::request::{
    CreationStrategy, ModulePath, ModuleRequest, ModuleType, PlatformType,
};
use crate::scaffold::settings_editor::InsertOutcome;
use anyhow::Context;
use clap::Parser;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// # Create Module Arguments (`CreateArgs`)
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Gradle path of the new module, e.g. `:repository:database`.
    module_path: String,

    /// Project root containing settings.gradle(.kts). Defaults to the current directory.
    #[arg(long, short = 'r')]
    root: Option<PathBuf>,

    /// Module flavor. Defaults to `kotlin`.
    #[arg(long = "type", short = 't', value_enum)]
    module_type: Option<ModuleType>,

    /// Single-platform or Kotlin-Multiplatform layout. Defaults to `single`.
    #[arg(long, value_enum)]
    platform: Option<PlatformType>,

    /// One module, or api/impl/glue siblings. Defaults to `default`.
    #[arg(long, short = 's', value_enum)]
    strategy: Option<CreationStrategy>,

    /// Write `.gradle` (Groovy) build files.
    #[arg(long, conflicts_with = "kts")]
    groovy: bool,

    /// Write `.gradle.kts` build files.
    #[arg(long)]
    kts: bool,

    /// Name the build file after the module (`database.gradle.kts`).
    #[arg(long)]
    named_build_file: bool,

    /// Package name. Defaults to the preferred base package plus the module name.
    #[arg(long, short = 'p')]
    package: Option<String>,

    /// Generate a README.md.
    #[arg(long, conflicts_with = "no_readme")]
    readme: bool,

    /// Do not generate a README.md.
    #[arg(long)]
    no_readme: bool,

    /// Generate a .gitignore.
    #[arg(long, conflicts_with = "no_gitignore")]
    gitignore: bool,

    /// Do not generate a .gitignore.
    #[arg(long)]
    no_gitignore: bool,

    /// Source set for multiplatform modules. Can be given multiple times.
    #[arg(long = "source-set", action = clap::ArgAction::Append)]
    source_sets: Vec<String>,

    /// Include keyword to use, overriding preferences and auto-detection.
    #[arg(long)]
    include_keyword: Option<String>,

    /// Emit `include(":a:b", "<root>/a/b")` with the module's directory.
    #[arg(long)]
    include_path: bool,

    /// Show what would be created without writing anything.
    #[arg(long)]
    preview: bool,
}

/// Prints outcome notifications to the terminal.
struct ConsoleListener {
    refresh_after_creation: bool,
}

impl CreationListener for ConsoleListener {
    fn on_success(&self) {
        if self.refresh_after_creation {
            println!("\n🔄 Sync the Gradle project in your IDE to pick up the new module.");
        }
    }

    fn on_error(&self) {
        eprintln!("❌ Module creation failed.");
    }
}

/// # Handle Module Create Command (`handle_create`)
pub fn handle_create(args: CreateArgs) -> Result<()> {
    info!("Handling module create command for '{}'", args.module_path);

    let prefs = config::load_preferences().context("Failed to load ModRS preferences")?;
    let root = super::resolve_root(args.root.as_deref())?;
    let request = build_request(&args, &prefs, &root);
    debug!("Module request: {:?}", request);

    let store = MemoryPreferenceStore::new(prefs.clone());
    let listener = ConsoleListener {
        refresh_after_creation: prefs.refresh_after_creation,
    };
    let mut creator = ModuleCreator::new(&store, &listener);
    let report = creator.create(&request)?;

    print_report(&request, &report)
}

/// Combines command-line options with preference defaults into a request.
fn build_request(args: &CreateArgs, prefs: &Preferences, root: &Path) -> ModuleRequest {
    let module_path = ModulePath::parse(&args.module_path);
    let package_name = args
        .package
        .clone()
        .unwrap_or_else(|| default_package(&prefs.package_name, module_path.leaf()));
    let source_sets = if args.source_sets.is_empty() {
        prefs.defaults.source_sets.iter().cloned().collect()
    } else {
        args.source_sets.iter().cloned().collect()
    };

    ModuleRequest {
        root_directory: root.to_path_buf(),
        module_path,
        module_type: args.module_type.unwrap_or(ModuleType::Kotlin),
        platform_type: args.platform.unwrap_or(PlatformType::Single),
        creation_strategy: args.strategy.unwrap_or(CreationStrategy::Default),
        use_kts_extension: flag(args.kts, args.groovy, prefs.defaults.use_kts),
        gradle_file_named_after_module: args.named_build_file
            || prefs.defaults.gradle_file_named_after_module,
        package_name,
        add_readme: flag(args.readme, args.no_readme, prefs.defaults.add_readme),
        add_gitignore: flag(args.gitignore, args.no_gitignore, prefs.defaults.add_gitignore),
        source_sets,
        include_keyword: args.include_keyword.clone(),
        include_path_argument: args.include_path,
        preview_mode: args.preview,
    }
}

/// `--x` forces on, `--no-x` forces off, otherwise the preference.
fn flag(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

/// `<base>.<leaf>`, with the leaf reduced to lowercase identifier characters.
/// A leaf starting with a digit gets a `_` prefix (`2fa` -> `_2fa`).
fn default_package(base: &str, leaf: &str) -> String {
    let mut leaf: String = leaf
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase();
    if leaf.starts_with(|c: char| c.is_ascii_digit()) {
        leaf.insert(0, '_');
    }
    match (base.is_empty(), leaf.is_empty()) {
        (_, true) => base.to_string(),
        (true, false) => leaf,
        (false, false) => format!("{}.{}", base, leaf),
    }
}

fn print_report(request: &ModuleRequest, report: &CreationReport) -> Result<()> {
    let gradle_path = request.module_path.gradle_path();
    let display_name = request.module_path.leaf();
    let settings_name = report
        .settings_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if report.preview {
        println!("\n🔍 Preview of '{}' (nothing has been written)", gradle_path);
    } else {
        println!("\n✅ Module '{}' created successfully!", gradle_path);
        println!("   Location: {}", relative_to_cwd(&report.module_root));
    }

    println!("\n{}:", settings_name);
    match &report.settings_outcome {
        InsertOutcome::Inserted { at, statements } => {
            for statement in statements {
                println!("  + {}", statement);
            }
            println!("  (at line {})", at + 1);
        }
        InsertOutcome::AlreadyIncluded => println!("  already included, left unchanged"),
    }

    println!();
    let tree = if report.preview {
        tree_printer::plan_tree_to_string(&report.module_root, display_name, &report.files)?
    } else {
        tree_printer::print_directory_tree_to_string(&report.module_root, display_name)?
    };
    print!("{}", tree);

    let file_count = report.files.iter().filter(|f| !f.is_dir()).count();
    let dir_count = report.files.len() - file_count;
    let verb = if report.preview { "would be" } else { "were" };
    println!(
        "\n{} directories and {} files {} created.",
        dir_count, file_count, verb
    );
    Ok(())
}

/// Relative path from the current directory when one exists, else absolute.
fn relative_to_cwd(path: &Path) -> String {
    match env::current_dir() {
        Ok(cwd) => pathdiff::diff_paths(path, &cwd)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| path.display().to_string()),
        Err(_) => path.display().to_string(),
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CreateArgs {
        let mut full = vec!["create"];
        full.extend_from_slice(args);
        CreateArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_create_args_parsing() {
        let args = parse(&[
            ":repository:database",
            "--type",
            "android",
            "--platform",
            "multiplatform",
            "--strategy",
            "three-module",
            "--groovy",
            "--source-set",
            "commonMain",
            "--source-set",
            "androidMain",
            "--preview",
        ]);
        assert_eq!(args.module_path, ":repository:database");
        assert_eq!(args.module_type, Some(ModuleType::Android));
        assert_eq!(args.platform, Some(PlatformType::Multiplatform));
        assert_eq!(args.strategy, Some(CreationStrategy::ThreeModule));
        assert!(args.groovy);
        assert_eq!(args.source_sets, vec!["commonMain", "androidMain"]);
        assert!(args.preview);
    }

    #[test]
    fn test_create_args_rejects_unknown_type_and_conflicts() {
        assert!(CreateArgs::try_parse_from(["create", ":a", "--type", "swift"]).is_err());
        assert!(CreateArgs::try_parse_from(["create", ":a", "--groovy", "--kts"]).is_err());
        assert!(CreateArgs::try_parse_from(["create", ":a", "--readme", "--no-readme"]).is_err());
        assert!(CreateArgs::try_parse_from(["create"]).is_err());
    }

    #[test]
    fn test_build_request_uses_preference_defaults() {
        let mut prefs = Preferences::default();
        prefs.package_name = "io.acme".into();
        prefs.defaults.use_kts = false;
        prefs.defaults.add_gitignore = true;

        let request = build_request(&parse(&[":feature:user-profile"]), &prefs, Path::new("/work"));
        assert_eq!(request.package_name, "io.acme.userprofile");
        assert!(!request.use_kts_extension);
        assert!(request.add_gitignore);
        assert!(request.add_readme);
        assert_eq!(request.module_type, ModuleType::Kotlin);
        assert_eq!(request.root_directory, PathBuf::from("/work"));
        assert!(request.source_sets.contains("commonMain"));

        let request = build_request(
            &parse(&[":feature", "--kts", "--no-gitignore", "--package", "x.y"]),
            &prefs,
            Path::new("/work"),
        );
        assert!(request.use_kts_extension);
        assert!(!request.add_gitignore);
        assert_eq!(request.package_name, "x.y");
    }

    #[test]
    fn test_default_package() {
        assert_eq!(default_package("com.example", "Database"), "com.example.database");
        assert_eq!(default_package("", "net"), "net");
        assert_eq!(default_package("com.example", ""), "com.example");
        assert_eq!(default_package("com.example", "2fa"), "com.example._2fa");
        assert!(crate::core::config::is_dotted_identifier(&default_package(
            "com.example",
            "2-factor"
        )));
    }
}
