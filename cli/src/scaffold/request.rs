//! # Module Request
//!
//! File: cli/src/scaffold/request.rs
//!
//! ## Overview
//!
//! `ModuleRequest` is the single immutable value handed from the data-entry
//! surface (the CLI) to the orchestrator. It describes one module to create:
//! where, of which flavor, with which build-file naming and which optional
//! files. Validation happens here, before anything touches the disk.
//!
//! Module paths use Gradle notation: `:repository:database` (the leading colon
//! is optional on input). The last segment is the leaf module name.
//!
use crate::core::config::{is_dotted_identifier, is_identifier};
use crate::core::error::{ModrsError, Result};
use anyhow::anyhow;
use clap::ValueEnum;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Gradle module flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModuleType {
    Android,
    Kotlin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformType {
    Single,
    Multiplatform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CreationStrategy {
    /// One module directory.
    Default,
    /// Three sibling modules: `api`, `impl`, `glue`.
    ThreeModule,
}

/// Sub-modules produced by the three-module strategy, in generation order.
pub const THREE_MODULE_SUFFIXES: [&str; 3] = ["api", "impl", "glue"];

/// A colon-delimited Gradle module path, e.g. `:repository:database`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    /// Splits `input` on `:`. A single leading colon is ignored. No validation
    /// is done here, so `repository:` parses to a path with an empty leaf.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix(':').unwrap_or(trimmed);
        Self {
            segments: body.split(':').map(|s| s.trim().to_string()).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment (the module's own name). Empty when the path ends in `:`.
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Gradle notation with a leading colon: `:repository:database`.
    pub fn gradle_path(&self) -> String {
        format!(":{}", self.segments.join(":"))
    }

    /// Directory of the module relative to the project root: `repository/database`.
    pub fn relative_dir(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Forward-slash form used inside settings files: `repository/database`.
    pub fn slash_path(&self) -> String {
        self.segments.join("/")
    }

    pub fn validate(&self) -> Result<()> {
        if self.leaf().is_empty() {
            return Err(anyhow!(ModrsError::Validation(
                "Module name must not be empty (the module path ends without a name)".into()
            )));
        }
        for segment in &self.segments {
            if segment.is_empty() {
                return Err(anyhow!(ModrsError::Validation(format!(
                    "Module path '{}' contains an empty segment",
                    self.gradle_path()
                ))));
            }
            if segment == "." || segment == ".." || segment.contains(['/', '\\']) {
                return Err(anyhow!(ModrsError::Validation(format!(
                    "Module path segment '{}' is not a valid directory name",
                    segment
                ))));
            }
        }
        Ok(())
    }
}

/// Everything needed to create one module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRequest {
    pub root_directory: PathBuf,
    pub module_path: ModulePath,
    pub module_type: ModuleType,
    pub platform_type: PlatformType,
    pub creation_strategy: CreationStrategy,
    pub use_kts_extension: bool,
    pub gradle_file_named_after_module: bool,
    pub package_name: String,
    pub add_readme: bool,
    pub add_gitignore: bool,
    /// Only used for multiplatform modules.
    pub source_sets: BTreeSet<String>,
    /// Overrides both the preference and auto-detection when set.
    pub include_keyword: Option<String>,
    /// Emit the two-argument include form with the module's directory.
    pub include_path_argument: bool,
    pub preview_mode: bool,
}

impl ModuleRequest {
    /// A single-platform Kotlin module with `.gradle.kts` build files, README on.
    pub fn new(root_directory: &Path, module_path: &str, package_name: &str) -> Self {
        Self {
            root_directory: root_directory.to_path_buf(),
            module_path: ModulePath::parse(module_path),
            module_type: ModuleType::Kotlin,
            platform_type: PlatformType::Single,
            creation_strategy: CreationStrategy::Default,
            use_kts_extension: true,
            gradle_file_named_after_module: false,
            package_name: package_name.to_string(),
            add_readme: true,
            add_gitignore: false,
            source_sets: BTreeSet::new(),
            include_keyword: None,
            include_path_argument: false,
            preview_mode: false,
        }
    }

    /// Root directory of the module being created.
    pub fn module_root(&self) -> PathBuf {
        self.root_directory.join(self.module_path.relative_dir())
    }

    /// Rejects requests that must not reach the disk. A preview run tolerates
    /// an empty package name; a real run does not.
    pub fn validate(&self) -> Result<()> {
        self.module_path.validate()?;

        if !self.root_directory.is_absolute() {
            return Err(anyhow!(ModrsError::Validation(format!(
                "Root directory '{}' must be an absolute path",
                self.root_directory.display()
            ))));
        }
        if !self.root_directory.is_dir() {
            return Err(anyhow!(ModrsError::Validation(format!(
                "Root directory '{}' does not exist or is not a directory",
                self.root_directory.display()
            ))));
        }

        if self.package_name.is_empty() {
            if !self.preview_mode {
                return Err(anyhow!(ModrsError::Validation(
                    "Package name must not be empty".into()
                )));
            }
        } else if !is_dotted_identifier(&self.package_name) {
            return Err(anyhow!(ModrsError::Validation(format!(
                "Invalid package name '{}'",
                self.package_name
            ))));
        }

        if let Some(keyword) = &self.include_keyword {
            if !is_identifier(keyword) {
                return Err(anyhow!(ModrsError::Validation(format!(
                    "Invalid include keyword '{}'",
                    keyword
                ))));
            }
        }

        if self.platform_type == PlatformType::Multiplatform {
            if self.source_sets.is_empty() {
                return Err(anyhow!(ModrsError::Validation(
                    "A multiplatform module needs at least one source set".into()
                )));
            }
            if let Some(bad) = self.source_sets.iter().find(|s| !is_identifier(s)) {
                return Err(anyhow!(ModrsError::Validation(format!(
                    "Invalid source set name '{}'",
                    bad
                ))));
            }
        }
        Ok(())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_module_path_parsing() {
        let path = ModulePath::parse(":repository:database");
        assert_eq!(path.segments(), ["repository", "database"]);
        assert_eq!(path.leaf(), "database");
        assert_eq!(path.gradle_path(), ":repository:database");
        assert_eq!(path.slash_path(), "repository/database");
        assert_eq!(
            path.relative_dir(),
            PathBuf::from("repository").join("database")
        );

        // Leading colon is optional.
        assert_eq!(ModulePath::parse("repository:database"), path);
    }

    #[test]
    fn test_module_path_validation() {
        assert!(ModulePath::parse(":repository").validate().is_ok());

        for bad in ["", ":", "repository:", ":a::b", ":a:..", "a/b"] {
            let err = ModulePath::parse(bad).validate().unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<ModrsError>(),
                    Some(ModrsError::Validation(_))
                ),
                "expected validation error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_request_validation() {
        let root = tempdir().unwrap();
        let mut request = ModuleRequest::new(root.path(), ":feature:login", "com.example");
        assert!(request.validate().is_ok());

        request.package_name = String::new();
        assert!(request.validate().is_err());
        request.preview_mode = true;
        assert!(request.validate().is_ok());

        request.package_name = "com.1example".into();
        assert!(request.validate().is_err());
        request.package_name = "com.example".into();

        request.platform_type = PlatformType::Multiplatform;
        assert!(request.validate().is_err());
        request.source_sets.insert("commonMain".into());
        assert!(request.validate().is_ok());

        request.include_keyword = Some("include Build".into());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_relative_root_rejected() {
        let request = ModuleRequest::new(Path::new("relative/root"), ":app", "com.example");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }
}
