//! # ModRS Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared, cross-cutting helpers used by both the scaffolding engine
//! (`scaffold::`) and the command handlers (`commands::`). At the moment this
//! is only filesystem I/O.
//!
//! - **`fs`**: Directory creation, whole-file writes, line-oriented reads/writes.
//!

pub mod fs;
