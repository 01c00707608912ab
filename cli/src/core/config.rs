//! # ModRS Preference System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the user preference record consumed by module
//! creation: the base package name, per-kind template overrides, the include
//! keyword override, and the defaults used when the command line leaves an
//! option unset. Preferences are plain data; they reach the scaffolding code
//! through the `PreferenceStore` trait, which is handed to the orchestrator at
//! construction time.
//!
//! ## Architecture
//!
//! Preference sources (in order of precedence):
//! 1. Project-specific `.modrs.toml` in the current directory or an ancestor
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `<config dir>/modrs/config.toml`
//! 3. Default values defined in the code
//!
//! Two stores implement `PreferenceStore`:
//! - `FilePreferenceStore`: backed by one TOML file, rewritten on `set`
//! - `MemoryPreferenceStore`: in-memory, used by tests and previews
//!
//! ## Examples
//!
//! ```rust,ignore
//! let prefs = config::load_preferences()?;
//! let base_package = &prefs.package_name;
//! let api_template = prefs.templates.for_kind(TemplateKind::Api);
//! ```
//!
use crate::core::error::{ModrsError, Result};
use crate::core::templating::TemplateKind;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The preference record, loaded from TOML files.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Preferences {
    /// Base package used when `--package` is not given (the leaf module name is appended).
    #[serde(default = "default_package_name")]
    pub package_name: String,
    /// Include keyword that overrides auto-detection (e.g. `includeBuild`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_keyword: Option<String>,
    /// Ask for a Gradle sync after a successful creation.
    #[serde(default = "default_true")]
    pub refresh_after_creation: bool,
    /// Emit `include(":a:b", "<root>/a/b")` instead of `include(":a:b")`.
    #[serde(default)]
    pub include_path_argument: bool,
    #[serde(default)]
    pub templates: TemplateOverrides,
    #[serde(default)]
    pub defaults: RequestDefaults,
}

/// User-saved template texts, one per template kind. Blank entries are ignored.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemplateOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kotlin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
    #[serde(rename = "impl", default, skip_serializing_if = "Option::is_none")]
    pub impl_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitignore: Option<String>,
}

impl TemplateOverrides {
    /// Returns the override for `kind` if one is saved and not blank.
    pub fn for_kind(&self, kind: TemplateKind) -> Option<&str> {
        let slot = match kind {
            TemplateKind::Android => &self.android,
            TemplateKind::Kotlin => &self.kotlin,
            TemplateKind::Api => &self.api,
            TemplateKind::Impl => &self.impl_,
            TemplateKind::Glue => &self.glue,
            TemplateKind::Gitignore => &self.gitignore,
        };
        slot.as_deref().filter(|text| !text.trim().is_empty())
    }

    fn slot_mut(&mut self, kind: TemplateKind) -> &mut Option<String> {
        match kind {
            TemplateKind::Android => &mut self.android,
            TemplateKind::Kotlin => &mut self.kotlin,
            TemplateKind::Api => &mut self.api,
            TemplateKind::Impl => &mut self.impl_,
            TemplateKind::Glue => &mut self.glue,
            TemplateKind::Gitignore => &mut self.gitignore,
        }
    }
}

/// Defaults applied to `modrs module create` options left unset on the command line.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RequestDefaults {
    #[serde(default = "default_true")]
    pub use_kts: bool,
    #[serde(default)]
    pub gradle_file_named_after_module: bool,
    #[serde(default = "default_true")]
    pub add_readme: bool,
    #[serde(default)]
    pub add_gitignore: bool,
    /// Source sets for multiplatform modules when none are given.
    #[serde(default = "default_source_sets")]
    pub source_sets: Vec<String>,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            use_kts: true,
            gradle_file_named_after_module: false,
            add_readme: true,
            add_gitignore: false,
            source_sets: default_source_sets(),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            package_name: default_package_name(),
            include_keyword: None,
            refresh_after_creation: true,
            include_path_argument: false,
            templates: TemplateOverrides::default(),
            defaults: RequestDefaults::default(),
        }
    }
}

fn default_package_name() -> String {
    "com.example".to_string()
}
fn default_true() -> bool {
    true
}
fn default_source_sets() -> Vec<String> {
    vec!["commonMain".to_string(), "commonTest".to_string()]
}

impl Preferences {
    /// Updates one preference addressed by a dotted key, as used by `modrs config set`.
    ///
    /// Template keys (`templates.<kind>`) accept the template text itself, or
    /// `@<path>` to read the text from a file. An empty value clears optional keys.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "package_name" => self.package_name = value.trim().to_string(),
            "include_keyword" => {
                self.include_keyword = non_empty(value);
            }
            "refresh_after_creation" => self.refresh_after_creation = parse_bool(key, value)?,
            "include_path_argument" => self.include_path_argument = parse_bool(key, value)?,
            "defaults.use_kts" => self.defaults.use_kts = parse_bool(key, value)?,
            "defaults.gradle_file_named_after_module" => {
                self.defaults.gradle_file_named_after_module = parse_bool(key, value)?
            }
            "defaults.add_readme" => self.defaults.add_readme = parse_bool(key, value)?,
            "defaults.add_gitignore" => self.defaults.add_gitignore = parse_bool(key, value)?,
            "defaults.source_sets" => {
                self.defaults.source_sets = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            other => {
                let kind = other
                    .strip_prefix("templates.")
                    .and_then(TemplateKind::from_key)
                    .ok_or_else(|| {
                        anyhow!(ModrsError::Config(format!(
                            "Unknown preference key '{}'",
                            other
                        )))
                    })?;
                let text = match value.strip_prefix('@') {
                    Some(path) => {
                        let expanded = shellexpand::tilde(path).into_owned();
                        fs::read_to_string(&expanded).map_err(|e| {
                            anyhow!(ModrsError::Template(format!(
                                "Failed to read template file '{}': {}",
                                expanded, e
                            )))
                        })?
                    }
                    None => value.to_string(),
                };
                *self.templates.slot_mut(kind) = non_empty(&text);
            }
        }
        validate_preferences(self)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(anyhow!(ModrsError::Config(format!(
            "Preference '{}' expects a boolean, got '{}'",
            key, value
        )))),
    }
}

/// Read/write access to the preference record.
pub trait PreferenceStore {
    /// Returns a snapshot of the current preferences.
    fn get(&self) -> Preferences;
    /// Replaces the stored preferences.
    fn set(&mut self, prefs: Preferences) -> Result<()>;
}

/// Preference store backed by a single TOML file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    prefs: Preferences,
}

impl FilePreferenceStore {
    /// Opens the store at `path`. A missing file yields default preferences;
    /// the file is only created on the first `set`.
    pub fn open(path: &Path) -> Result<Self> {
        let prefs = if path.is_file() {
            load_preferences_from_path(path)?
        } else {
            debug!("Preference file {} does not exist yet", path.display());
            Preferences::default()
        };
        Ok(Self {
            path: path.to_path_buf(),
            prefs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self) -> Preferences {
        self.prefs.clone()
    }

    fn set(&mut self, prefs: Preferences) -> Result<()> {
        validate_preferences(&prefs)?;
        let content = toml::to_string_pretty(&prefs)
            .map_err(|e| anyhow!(ModrsError::Config(e.to_string())))?;
        crate::common::fs::io::write_string_to_file(&self.path, &content)
            .with_context(|| format!("Failed to save preferences to {}", self.path.display()))?;
        info!("Saved preferences to {}", self.path.display());
        self.prefs = prefs;
        Ok(())
    }
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    prefs: Preferences,
}

impl MemoryPreferenceStore {
    pub fn new(prefs: Preferences) -> Self {
        Self { prefs }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self) -> Preferences {
        self.prefs.clone()
    }

    fn set(&mut self, prefs: Preferences) -> Result<()> {
        validate_preferences(&prefs)?;
        self.prefs = prefs;
        Ok(())
    }
}

// --- Loading ---

pub const PROJECT_CONFIG_FILENAME: &str = ".modrs.toml";

/// Loads the effective preferences: project file over user file over defaults.
pub fn load_preferences() -> Result<Preferences> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let user = match user_config_path() {
        Some(path) if path.is_file() => {
            info!("Loading user preferences from: {}", path.display());
            Some(load_preference_layer(&path)?)
        }
        Some(path) => {
            debug!("User preference file not found at {}", path.display());
            None
        }
        None => {
            warn!("Could not determine user config directory.");
            None
        }
    };
    let project = match find_project_config_path(&cwd) {
        Some(path) => {
            info!("Loading project preferences from: {}", path.display());
            Some(load_preference_layer(&path)?)
        }
        None => None,
    };
    let merged = merge_preferences(user, project)?;
    validate_preferences(&merged).context("Preference validation failed")?;
    debug!("Effective preferences: {:?}", merged);
    Ok(merged)
}

/// Environment variable that relocates the user preference file.
pub const CONFIG_PATH_ENV: &str = "MODRS_CONFIG";

/// Location of the user preference file: `$MODRS_CONFIG` if set, else
/// `config.toml` in the platform config directory (if there is one).
pub fn user_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(
            shellexpand::tilde(&path.to_string_lossy()).into_owned(),
        ));
    }
    ProjectDirs::from("com", "ModRS", "modrs").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Walks from `start` towards the filesystem root looking for `.modrs.toml`,
/// stopping at the first directory that holds a `.git` directory.
pub fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project preference search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

pub fn load_preferences_from_path(path: &Path) -> Result<Preferences> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preference file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Reads one preference file as a raw TOML table, keeping only the keys the
/// file actually sets. The table is checked against `Preferences` so typos
/// are reported against the file they occur in.
pub fn load_preference_layer(path: &Path) -> Result<toml::Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preference file: {}", path.display()))?;
    let table: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    toml::Value::Table(table.clone())
        .try_into::<Preferences>()
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    Ok(table)
}

/// Layers the project table over the user table, key by key (nested tables
/// are merged, not replaced), then fills whatever neither sets from defaults.
fn merge_preferences(
    user: Option<toml::Table>,
    project: Option<toml::Table>,
) -> Result<Preferences> {
    let mut merged = user.unwrap_or_default();
    if let Some(project) = project {
        overlay_table(&mut merged, project);
    }
    toml::Value::Table(merged)
        .try_into::<Preferences>()
        .map_err(|e| anyhow!(ModrsError::Config(e.to_string())))
}

fn overlay_table(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(nested) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                overlay_table(existing, nested);
                continue;
            }
            base.insert(key, toml::Value::Table(nested));
        } else {
            base.insert(key, value);
        }
    }
}

/// Checks that the package name is a dotted identifier and the include
/// keyword override, when present, is a bare identifier.
pub fn validate_preferences(prefs: &Preferences) -> Result<()> {
    if !prefs.package_name.is_empty() && !is_dotted_identifier(&prefs.package_name) {
        return Err(anyhow!(ModrsError::Config(format!(
            "Invalid package name '{}'. Expected a dotted identifier such as 'com.example'.",
            prefs.package_name
        ))));
    }
    if let Some(keyword) = &prefs.include_keyword {
        if !is_identifier(keyword) {
            return Err(anyhow!(ModrsError::Config(format!(
                "Invalid include keyword '{}'. Expected an identifier such as 'includeBuild'.",
                keyword
            ))));
        }
    }
    if prefs.defaults.source_sets.iter().any(|s| !is_identifier(s)) {
        return Err(anyhow!(ModrsError::Config(format!(
            "Invalid source set list {:?}",
            prefs.defaults.source_sets
        ))));
    }
    Ok(())
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

pub fn is_dotted_identifier(s: &str) -> bool {
    s.split('.').all(is_identifier)
}
