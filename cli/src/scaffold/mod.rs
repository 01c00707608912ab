//! # ModRS Scaffolding Engine
//!
//! File: cli/src/scaffold/mod.rs
//!
//! ## Overview
//!
//! Everything needed to add a Gradle module to a project, independent of any
//! front end:
//! - `request`: the immutable `ModuleRequest` and its validation
//! - `settings_editor`: inserts `include(...)` statements into the settings file
//! - `layout`: plans and writes the module's directories and files
//! - `templates`: built-in build-file, README and `.gitignore` templates
//! - `orchestrator`: runs validation, settings edit and layout in order and
//!   reports the outcome through a `CreationListener`
//!
//! ```rust,ignore
//! let store = MemoryPreferenceStore::default();
//! let mut creator = ModuleCreator::new(&store, &SilentListener);
//! let report = creator.create(&ModuleRequest::new(&root, ":repository", "com.example"))?;
//! ```
//!
pub mod layout;
pub mod orchestrator;
pub mod request;
pub mod settings_editor;
pub mod templates;
