//! # ModRS Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the filesystem operations needed to lay out a new
//! module and to rewrite a Gradle settings file:
//! - **`ensure_dir_exists`**: `mkdir -p` that is happy when the directory is
//!   already there, and refuses when a file sits at the path.
//! - **`read_lines`** / **`write_lines`**: a text file as an ordered sequence of
//!   lines, remembering whether the file ended with a newline so a rewrite
//!   keeps the file's conventions (`\n` or `\r\n`, final newline or not).
//!   The rewrite goes through a temporary sibling file and a rename.
//! - **`write_string_to_file`**: writes a whole file at once, creating parent
//!   directories first and overwriting any existing file.
//!
//! Every error carries the offending path as context.
//!
use crate::core::error::{ModrsError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Line separator used by a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// `CrLf` when the content's first line break is `\r\n`, else `Lf`.
    pub fn detect(content: &str) -> Self {
        match content.find('\n') {
            Some(index) if content[..index].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// The lines of a text file plus its line-ending and trailing-newline conventions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLines {
    pub lines: Vec<String>,
    pub line_ending: LineEnding,
    pub trailing_newline: bool,
}

impl TextLines {
    /// Joins the lines back into file content with the file's own separator.
    pub fn to_content(&self) -> String {
        let separator = self.line_ending.as_str();
        let mut content = self.lines.join(separator);
        if self.trailing_newline && !self.lines.is_empty() {
            content.push_str(separator);
        }
        content
    }
}

/// Ensures that a directory exists at the specified path, creating parents as
/// needed. An existing directory is not an error; an existing file is.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ModrsError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads a UTF-8 text file into its lines. Both `\n` and `\r\n` endings are accepted.
pub fn read_lines(path: &Path) -> Result<TextLines> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))?;
    Ok(TextLines {
        lines: content.lines().map(String::from).collect(),
        line_ending: LineEnding::detect(&content),
        trailing_newline: content.ends_with('\n'),
    })
}

/// Rewrites a text file from its lines. The content goes to a sibling
/// temporary file first, which is then renamed over `path`, so readers see
/// either the old or the new file, never a truncated one.
pub fn write_lines(path: &Path, lines: &TextLines) -> Result<()> {
    write_string_atomic(path, &lines.to_content())
}

/// Writes `content` to `<path>.modrs.tmp` and renames it onto `path`.
/// The temporary file is removed if the rename fails.
pub fn write_string_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_sibling(path)?;
    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temporary file {:?}", temp_path))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to replace file {:?}", path));
    }
    info!("Atomically rewrote file: {:?}", path);
    Ok(())
}

fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        anyhow::anyhow!(ModrsError::FileSystem(format!(
            "Path has no file name: {:?}",
            path
        )))
    })?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".modrs.tmp");
    Ok(path.with_file_name(temp_name))
}

/// Writes string content to a file, creating parent directories first and
/// overwriting the file if it exists.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir_exists(parent)?;
        }
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        // Second call is a no-op.
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_lines_keep_trailing_newline() -> Result<()> {
        let base_dir = tempdir()?;
        let with_newline = base_dir.path().join("a.gradle.kts");
        let without_newline = base_dir.path().join("b.gradle.kts");
        fs::write(&with_newline, "include(\":app\")\ninclude(\":core\")\n")?;
        fs::write(&without_newline, "include(\":app\")")?;

        let lines = read_lines(&with_newline)?;
        assert_eq!(lines.lines, vec!["include(\":app\")", "include(\":core\")"]);
        assert_eq!(lines.line_ending, LineEnding::Lf);
        assert!(lines.trailing_newline);
        write_lines(&with_newline, &lines)?;
        assert_eq!(
            fs::read_to_string(&with_newline)?,
            "include(\":app\")\ninclude(\":core\")\n"
        );

        let lines = read_lines(&without_newline)?;
        assert!(!lines.trailing_newline);
        write_lines(&without_newline, &lines)?;
        assert_eq!(fs::read_to_string(&without_newline)?, "include(\":app\")");
        Ok(())
    }

    #[test]
    fn test_crlf_line_endings_survive_a_rewrite() -> Result<()> {
        let base_dir = tempdir()?;
        let settings = base_dir.path().join("settings.gradle.kts");
        fs::write(&settings, "rootProject.name = \"x\"\r\ninclude(\":app\")\r\n")?;

        let mut lines = read_lines(&settings)?;
        assert_eq!(lines.line_ending, LineEnding::CrLf);
        assert_eq!(lines.lines[1], "include(\":app\")");
        lines.lines.push("include(\":core\")".to_string());
        write_lines(&settings, &lines)?;

        assert_eq!(
            fs::read_to_string(&settings)?,
            "rootProject.name = \"x\"\r\ninclude(\":app\")\r\ninclude(\":core\")\r\n"
        );
        Ok(())
    }

    #[test]
    fn test_atomic_rewrite_leaves_old_or_new_content() -> Result<()> {
        let base_dir = tempdir()?;
        let settings = base_dir.path().join("settings.gradle");
        fs::write(&settings, "include(\":old\")\n")?;

        write_string_atomic(&settings, "include(\":new\")\n")?;
        assert_eq!(fs::read_to_string(&settings)?, "include(\":new\")\n");
        assert!(!base_dir.path().join("settings.gradle.modrs.tmp").exists());

        // A directory squatting on the temporary path makes the write fail
        // before the target is touched.
        fs::create_dir(base_dir.path().join("settings.gradle.modrs.tmp"))?;
        assert!(write_string_atomic(&settings, "truncated").is_err());
        assert_eq!(fs::read_to_string(&settings)?, "include(\":new\")\n");
        Ok(())
    }

    #[test]
    fn test_line_ending_detection() {
        assert_eq!(LineEnding::detect("a\r\nb"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("single line"), LineEnding::Lf);
    }

    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let base_dir = tempdir()?;
        assert!(read_lines(&base_dir.path().join("missing.gradle")).is_err());
        Ok(())
    }
}
