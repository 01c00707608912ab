//! # Settings-File Editor
//!
//! File: cli/src/scaffold/settings_editor.rs
//!
//! ## Overview
//!
//! Registers a new module in a Gradle settings file by inserting
//! `include(":path")` statements into the file's include block at the
//! alphabetically correct position.
//!
//! The settings file is a general-purpose build script, so this is a
//! line-oriented text transformation rather than a parser:
//! 1. Pick the include keyword: an explicit override, else an alias found in
//!    the file (`includeProject(`, `includeBuild(`), else `include`.
//! 2. The include block spans from the first to the last line containing
//!    `<keyword>("`. No such line, or a block starting on the very first
//!    line (nothing precedes it), means there is nowhere to insert.
//! 3. The new statements go before the first non-blank block line that is
//!    greater than or equal to the first new statement (compared
//!    case-insensitively), or right after the block when there is none.
//!
//! Existing entries are assumed to be sorted already. The block is never
//! re-sorted; an unsorted block just gets a single insertion where the scan
//! stops.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let settings = settings_editor::find_settings_file(&root)?;
//! let lines = io::read_lines(&settings)?;
//! let edit = settings_editor::insert_module_include(&lines.lines, &IncludeRequest {
//!     module_path: ":repository:database".into(),
//!     keyword: "include".into(),
//!     strategy: CreationStrategy::Default,
//!     include_path: None,
//! })?;
//! ```
//!
use crate::core::error::{ModrsError, Result};
use crate::scaffold::request::{CreationStrategy, THREE_MODULE_SUFFIXES};
use anyhow::anyhow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The generic include keyword.
pub const DEFAULT_INCLUDE_KEYWORD: &str = "include";
/// Project-specific include functions preferred over `include` when present in the file.
pub const INCLUDE_KEYWORD_ALIASES: [&str; 2] = ["includeProject", "includeBuild"];
/// Settings file names, in lookup order.
pub const SETTINGS_FILE_NAMES: [&str; 2] = ["settings.gradle.kts", "settings.gradle"];

/// The statements to add for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeRequest {
    /// Gradle path with a leading colon, e.g. `:repository:database`.
    pub module_path: String,
    pub keyword: String,
    pub strategy: CreationStrategy,
    /// Second positional argument: the module's directory, forward slashes.
    pub include_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// `statements` now start at line index `at`.
    Inserted { at: usize, statements: Vec<String> },
    /// Every statement was already in the block; the lines are unchanged.
    AlreadyIncluded,
}

/// Result of an insertion: the full updated line sequence plus what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsEdit {
    pub lines: Vec<String>,
    pub outcome: InsertOutcome,
}

/// Returns `settings.gradle.kts` or `settings.gradle` under `root`, in that order.
pub fn find_settings_file(root: &Path) -> Result<PathBuf> {
    SETTINGS_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            anyhow!(ModrsError::SettingsFileNotFound {
                root: root.to_path_buf(),
            })
        })
}

/// Chooses the include keyword for `lines`. An explicit `preferred` keyword wins;
/// otherwise the first known alias used anywhere in the file; otherwise `include`.
pub fn detect_include_keyword(lines: &[String], preferred: Option<&str>) -> String {
    if let Some(keyword) = preferred {
        debug!("Using configured include keyword '{}'", keyword);
        return keyword.to_string();
    }
    INCLUDE_KEYWORD_ALIASES
        .iter()
        .find(|alias| {
            let call = format!("{}(", alias);
            lines.iter().any(|line| line.contains(&call))
        })
        .map(|alias| alias.to_string())
        .unwrap_or_else(|| DEFAULT_INCLUDE_KEYWORD.to_string())
}

/// Builds the exact lines to insert. The three-module strategy yields the
/// `api`, `impl` and `glue` statements, in that order.
pub fn include_statements(request: &IncludeRequest) -> Vec<String> {
    let statement = |module_path: &str, include_path: Option<&str>| match include_path {
        Some(path) => format!("{}(\"{}\", \"{}\")", request.keyword, module_path, path),
        None => format!("{}(\"{}\")", request.keyword, module_path),
    };

    match request.strategy {
        CreationStrategy::Default => {
            vec![statement(&request.module_path, request.include_path.as_deref())]
        }
        CreationStrategy::ThreeModule => THREE_MODULE_SUFFIXES
            .iter()
            .map(|suffix| {
                let path = request
                    .include_path
                    .as_ref()
                    .map(|base| format!("{}/{}", base, suffix));
                statement(&format!("{}:{}", request.module_path, suffix), path.as_deref())
            })
            .collect(),
    }
}

/// Inserts the include statements for `request` into `lines`.
///
/// Fails with `ModrsError::NoIncludeBlock` when no line contains
/// `<keyword>("`, or when the first such line is line 0; the input is never
/// modified in that case.
pub fn insert_module_include(lines: &[String], request: &IncludeRequest) -> Result<SettingsEdit> {
    let marker = format!("{}(\"", request.keyword);
    let first_index = lines.iter().position(|line| line.contains(&marker));
    let last_index = lines.iter().rposition(|line| line.contains(&marker));
    let (first_index, last_index) = match (first_index, last_index) {
        (Some(first), Some(last)) if first > 0 => (first, last),
        _ => {
            return Err(anyhow!(ModrsError::NoIncludeBlock {
                keyword: request.keyword.clone(),
            }))
        }
    };
    let block = &lines[first_index..=last_index];
    debug!(
        "Include block for '{}' spans lines {}..={}",
        request.keyword, first_index, last_index
    );

    // Skip statements whose module is already registered.
    let statements: Vec<String> = include_statements(request)
        .into_iter()
        .filter(|statement| !block_contains_module(block, &request.keyword, statement))
        .collect();
    if statements.is_empty() {
        info!("Module '{}' is already included", request.module_path);
        return Ok(SettingsEdit {
            lines: lines.to_vec(),
            outcome: InsertOutcome::AlreadyIncluded,
        });
    }

    let needle = statements[0].to_lowercase();
    let insertion_index = block
        .iter()
        .position(|line| {
            let candidate = line.trim();
            !candidate.is_empty() && candidate.to_lowercase() >= needle
        })
        .map(|offset| first_index + offset)
        .unwrap_or(last_index + 1);

    // New lines take the indentation of the block's first statement.
    let indent: String = lines[first_index]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();
    let mut updated = Vec::with_capacity(lines.len() + statements.len());
    updated.extend_from_slice(&lines[..insertion_index]);
    updated.extend(statements.iter().map(|s| format!("{}{}", indent, s)));
    updated.extend_from_slice(&lines[insertion_index..]);

    info!(
        "Inserting {} include statement(s) at line {}",
        statements.len(),
        insertion_index + 1
    );
    Ok(SettingsEdit {
        lines: updated,
        outcome: InsertOutcome::Inserted {
            at: insertion_index,
            statements,
        },
    })
}

/// True when a block line already includes the module named by `statement`.
fn block_contains_module(block: &[String], keyword: &str, statement: &str) -> bool {
    // `<keyword>("<module path>"` identifies the module regardless of a second argument.
    let prefix_len = keyword.len() + 2;
    let Some(path_end) = statement[prefix_len..].find('"') else {
        return false;
    };
    let key = &statement[..prefix_len + path_end + 1];
    block.iter().any(|line| line.contains(key))
}
