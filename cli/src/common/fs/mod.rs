//! # ModRS Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Entry point for filesystem helpers. Everything currently lives in `io`:
//! directory creation, whole-file writes, and line-oriented reads/writes used
//! by the settings-file editor.
//!
//! ```rust,ignore
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(&module_root)?;
//! let settings = io::read_lines(&settings_path)?;
//! ```
//!

/// Basic file I/O operations (`ensure_dir_exists`, `read_lines`, `write_lines`, `write_string_to_file`).
pub mod io;
