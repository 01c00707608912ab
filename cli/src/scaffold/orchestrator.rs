//! # Module Creation Orchestrator
//!
//! File: cli/src/scaffold/orchestrator.rs
//!
//! ## Overview
//!
//! Drives one module creation from a `ModuleRequest` to a finished module:
//!
//! ```text
//! Idle -> Validating -> EditingSettings -> BuildingLayout -> Succeeded
//!              \               \                 \
//!               +---------------+-----------------+--> Failed
//! ```
//!
//! 1. **Validating**: the request is checked before anything is touched.
//! 2. **EditingSettings**: the settings file is read, the include statements
//!    are computed, and the whole file is rewritten in one write.
//! 3. **BuildingLayout**: directories and files are created. This only starts
//!    once the settings file has been handled, so a layout failure never
//!    leaves a half-edited settings file behind.
//!
//! The outcome reaches the outside world through `CreationListener`: exactly
//! one of `on_success` / `on_error` is called per real run. A preview run
//! computes the same report (settings lines that would be added, full file
//! list) without writing anything and only reports errors.
//!
//! The first failed file write aborts the layout step and is reported as an
//! error; remaining files are not attempted.
//!
use crate::common::fs::io;
use crate::core::config::{PreferenceStore, Preferences};
use crate::core::error::Result;
use crate::scaffold::layout::{self, GeneratedFile};
use crate::scaffold::request::ModuleRequest;
use crate::scaffold::settings_editor::{self, IncludeRequest, InsertOutcome};
use anyhow::Context;
use std::path::PathBuf;
use tracing::{error, info};

/// Notifications fired at the end of a creation run.
pub trait CreationListener {
    /// Files were written; the host should refresh/sync the project.
    fn on_success(&self);
    /// The run failed at some stage.
    fn on_error(&self);
}

/// Listener that ignores both notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentListener;

impl CreationListener for SilentListener {
    fn on_success(&self) {}
    fn on_error(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationState {
    Idle,
    Validating,
    EditingSettings,
    BuildingLayout,
    Succeeded,
    Failed,
}

/// What a creation run did (or, in preview mode, would do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationReport {
    pub preview: bool,
    pub module_root: PathBuf,
    pub settings_file: PathBuf,
    pub settings_outcome: InsertOutcome,
    pub files: Vec<GeneratedFile>,
}

impl CreationReport {
    /// Include statements added to the settings file (empty if already included).
    pub fn added_statements(&self) -> &[String] {
        match &self.settings_outcome {
            InsertOutcome::Inserted { statements, .. } => statements,
            InsertOutcome::AlreadyIncluded => &[],
        }
    }
}

/// Creates modules using injected preferences and an outcome listener.
pub struct ModuleCreator<'a> {
    preferences: &'a dyn PreferenceStore,
    listener: &'a dyn CreationListener,
    state: CreationState,
}

impl<'a> ModuleCreator<'a> {
    pub fn new(preferences: &'a dyn PreferenceStore, listener: &'a dyn CreationListener) -> Self {
        Self {
            preferences,
            listener,
            state: CreationState::Idle,
        }
    }

    pub fn state(&self) -> CreationState {
        self.state
    }

    /// Runs one creation. Errors are returned after `on_error` has been called.
    pub fn create(&mut self, request: &ModuleRequest) -> Result<CreationReport> {
        match self.run(request) {
            Ok(report) => {
                self.transition(CreationState::Succeeded);
                if !report.preview {
                    self.listener.on_success();
                }
                Ok(report)
            }
            Err(e) => {
                error!("Module creation failed: {:?}", e);
                self.transition(CreationState::Failed);
                self.listener.on_error();
                Err(e)
            }
        }
    }

    fn run(&mut self, request: &ModuleRequest) -> Result<CreationReport> {
        let prefs = self.preferences.get();

        self.transition(CreationState::Validating);
        request.validate().context("Invalid module request")?;

        self.transition(CreationState::EditingSettings);
        let (settings_file, settings_outcome) = edit_settings(request, &prefs)?;

        self.transition(CreationState::BuildingLayout);
        let files = layout::build_module(request, &prefs).context("Failed to lay out module")?;

        Ok(CreationReport {
            preview: request.preview_mode,
            module_root: request.module_root(),
            settings_file,
            settings_outcome,
            files,
        })
    }

    fn transition(&mut self, next: CreationState) {
        info!("Module creation: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Builds the include request for `request`, resolving the keyword
/// (request override, then preference, then detection from `lines`) and the
/// optional include-path argument.
pub fn include_request_for(
    request: &ModuleRequest,
    prefs: &Preferences,
    lines: &[String],
) -> IncludeRequest {
    let preferred = request
        .include_keyword
        .as_deref()
        .or(prefs.include_keyword.as_deref());
    let include_path = (request.include_path_argument || prefs.include_path_argument).then(|| {
        let root = request.root_directory.to_string_lossy().replace('\\', "/");
        format!(
            "{}/{}",
            root.trim_end_matches('/'),
            request.module_path.slash_path()
        )
    });
    IncludeRequest {
        module_path: request.module_path.gradle_path(),
        keyword: settings_editor::detect_include_keyword(lines, preferred),
        strategy: request.creation_strategy,
        include_path,
    }
}

fn edit_settings(request: &ModuleRequest, prefs: &Preferences) -> Result<(PathBuf, InsertOutcome)> {
    let settings_file = settings_editor::find_settings_file(&request.root_directory)?;
    let mut text = io::read_lines(&settings_file)?;
    let include = include_request_for(request, prefs, &text.lines);
    let edit = settings_editor::insert_module_include(&text.lines, &include)
        .with_context(|| format!("Cannot register module in {}", settings_file.display()))?;

    if request.preview_mode {
        info!("Preview mode: {} left untouched", settings_file.display());
    } else if let InsertOutcome::Inserted { .. } = edit.outcome {
        text.lines = edit.lines;
        io::write_lines(&settings_file, &text)?;
        info!("Updated {}", settings_file.display());
    }
    Ok((settings_file, edit.outcome))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MemoryPreferenceStore;
    use std::cell::Cell;
    use std::fs;
    use tempfile::tempdir;

    #[derive(Default)]
    struct CountingListener {
        successes: Cell<u32>,
        errors: Cell<u32>,
    }

    impl CreationListener for CountingListener {
        fn on_success(&self) {
            self.successes.set(self.successes.get() + 1);
        }
        fn on_error(&self) {
            self.errors.set(self.errors.get() + 1);
        }
    }

    #[test]
    fn test_create_edits_settings_then_builds() -> Result<()> {
        let root = tempdir()?;
        fs::write(
            root.path().join("settings.gradle.kts"),
            "rootProject.name = \"demo\"\ninclude(\":app\")\n",
        )?;
        let prefs = MemoryPreferenceStore::default();
        let listener = CountingListener::default();
        let mut creator = ModuleCreator::new(&prefs, &listener);

        let report = creator.create(&ModuleRequest::new(root.path(), ":repository", "com.example"))?;

        assert_eq!(creator.state(), CreationState::Succeeded);
        assert_eq!(listener.successes.get(), 1);
        assert_eq!(listener.errors.get(), 0);
        assert_eq!(report.added_statements(), ["include(\":repository\")"]);
        assert_eq!(
            fs::read_to_string(root.path().join("settings.gradle.kts"))?,
            "rootProject.name = \"demo\"\ninclude(\":app\")\ninclude(\":repository\")\n"
        );
        assert!(root.path().join("repository/build.gradle.kts").is_file());
        Ok(())
    }

    #[test]
    fn test_crlf_settings_keep_their_line_endings() -> Result<()> {
        let root = tempdir()?;
        fs::write(
            root.path().join("settings.gradle.kts"),
            "rootProject.name = \"demo\"\r\ninclude(\":app\")\r\n",
        )?;
        let prefs = MemoryPreferenceStore::default();
        let mut creator = ModuleCreator::new(&prefs, &SilentListener);

        creator.create(&ModuleRequest::new(root.path(), ":core", "com.example.core"))?;

        assert_eq!(creator.state(), CreationState::Succeeded);
        assert_eq!(
            fs::read_to_string(root.path().join("settings.gradle.kts"))?,
            "rootProject.name = \"demo\"\r\ninclude(\":app\")\r\ninclude(\":core\")\r\n"
        );
        assert!(!root.path().join("settings.gradle.kts.modrs.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_missing_include_block_stops_before_layout() -> Result<()> {
        let root = tempdir()?;
        let settings = "rootProject.name = \"demo\"\n";
        fs::write(root.path().join("settings.gradle"), settings)?;
        let prefs = MemoryPreferenceStore::default();
        let listener = CountingListener::default();
        let mut creator = ModuleCreator::new(&prefs, &listener);

        let result = creator.create(&ModuleRequest::new(root.path(), ":repository", "com.example"));

        assert!(result.is_err());
        assert_eq!(creator.state(), CreationState::Failed);
        assert_eq!(listener.errors.get(), 1);
        assert_eq!(fs::read_to_string(root.path().join("settings.gradle"))?, settings);
        assert!(!root.path().join("repository").exists());
        Ok(())
    }

    #[test]
    fn test_preference_keyword_and_path_argument() -> Result<()> {
        let root = tempdir()?;
        fs::write(root.path().join("settings.gradle.kts"), "include(\":app\")\n")?;
        let mut prefs = Preferences::default();
        prefs.include_keyword = Some("includeModule".into());
        prefs.include_path_argument = true;

        let request = ModuleRequest::new(root.path(), ":lib", "com.example");
        let include = include_request_for(&request, &prefs, &["include(\":app\")".to_string()]);
        assert_eq!(include.keyword, "includeModule");
        let expected_path = format!(
            "{}/lib",
            root.path().to_string_lossy().replace('\\', "/")
        );
        assert_eq!(include.include_path.as_deref(), Some(expected_path.as_str()));

        // The request's own keyword beats the preference.
        let mut request = request;
        request.include_keyword = Some("include".into());
        let include = include_request_for(&request, &prefs, &[]);
        assert_eq!(include.keyword, "include");
        Ok(())
    }

    #[test]
    fn test_preview_reports_without_notifying_success() -> Result<()> {
        let root = tempdir()?;
        let settings = "rootProject.name = \"demo\"\ninclude(\":app\")\n";
        fs::write(root.path().join("settings.gradle.kts"), settings)?;
        let prefs = MemoryPreferenceStore::default();
        let listener = CountingListener::default();
        let mut creator = ModuleCreator::new(&prefs, &listener);

        let mut request = ModuleRequest::new(root.path(), ":zeta", "com.example");
        request.preview_mode = true;
        let report = creator.create(&request)?;

        assert!(report.preview);
        assert_eq!(report.added_statements(), ["include(\":zeta\")"]);
        assert_eq!(listener.successes.get() + listener.errors.get(), 0);
        assert_eq!(fs::read_to_string(root.path().join("settings.gradle.kts"))?, settings);
        assert!(!root.path().join("zeta").exists());
        Ok(())
    }
}
