//! # ModRS Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by the scaffolding engine
//! and the command handlers:
//! - `config`: Preference record, preference stores, and TOML loading
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Placeholder substitution for generated files
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::core::config::{self, PreferenceStore};
//! use crate::core::error::{ModrsError, Result};
//! use crate::core::templating::{self, TemplateContext};
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
