//! # ModRS Template Renderer
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module renders the text templates used for generated build files,
//! READMEs and `.gitignore` files. Templates are free-form user text (Gradle
//! scripts in Groovy or Kotlin), so rendering is a literal substitution of
//! known `{{ name }}` placeholders and nothing else:
//! - Known placeholders are replaced everywhere they occur
//! - Unknown placeholders are left exactly as written
//! - Gradle's own `${...}` interpolation is never touched
//!
//! ## Architecture
//!
//! - `TemplateKind`: which per-kind template slot a build file draws from
//! - `TemplateContext`: placeholder name to substitution value
//! - `render`: pure substitution, in memory
//!
//! ## Examples
//!
//! ```rust,ignore
//! let context = TemplateContext::for_package("com.example.api");
//! let text = templating::render("namespace = \"{{ packageName }}\"", &context);
//! assert_eq!(text, "namespace = \"com.example.api\"");
//! ```
//!
use std::collections::BTreeMap;
use tracing::debug;

/// Placeholder substituted with the module's package name.
pub const PACKAGE_NAME_KEY: &str = "packageName";
/// Placeholder substituted with the module's leaf name (README only).
pub const MODULE_NAME_KEY: &str = "moduleName";

/// Template slots that users can override in their preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Android,
    Kotlin,
    Api,
    Impl,
    Glue,
    Gitignore,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 6] = [
        TemplateKind::Android,
        TemplateKind::Kotlin,
        TemplateKind::Api,
        TemplateKind::Impl,
        TemplateKind::Glue,
        TemplateKind::Gitignore,
    ];

    /// The preference key for this slot (`templates.<key>`).
    pub fn key(self) -> &'static str {
        match self {
            TemplateKind::Android => "android",
            TemplateKind::Kotlin => "kotlin",
            TemplateKind::Api => "api",
            TemplateKind::Impl => "impl",
            TemplateKind::Glue => "glue",
            TemplateKind::Gitignore => "gitignore",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Values available to a template while it is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for build files: only `packageName` is set.
    pub fn for_package(package_name: &str) -> Self {
        let mut context = Self::new();
        context.insert(PACKAGE_NAME_KEY, package_name);
        context
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Substitutes every known `{{ key }}` placeholder (whitespace inside the
/// braces is optional) and leaves everything else untouched.
pub fn render(template: &str, context: &TemplateContext) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let inner_start = &rest[open + 2..];
        let Some(close) = inner_start.find("}}") else {
            // Unterminated placeholder; keep the remainder verbatim.
            output.push_str(&rest[open..]);
            return output;
        };
        let key = inner_start[..close].trim();
        match context.get(key) {
            Some(value) => output.push_str(value),
            None => {
                debug!("Leaving unknown placeholder '{}' as written", key);
                output.push_str(&rest[open..open + 2 + close + 2]);
            }
        }
        rest = &inner_start[close + 2..];
    }

    output.push_str(rest);
    output
}
