//! # Module Layout Builder
//!
//! File: cli/src/scaffold/layout.rs
//!
//! ## Overview
//!
//! Turns a validated `ModuleRequest` into the directories and files of the new
//! module. The work is split in two so that preview and real runs share one
//! code path:
//! - `plan_module`: pure. Computes every directory and rendered file.
//! - `materialize`: creates all directories first, then writes each file once.
//!
//! ## Layouts
//!
//! Default strategy (`<root>/<a>/<b>` for `:a:b`):
//!
//! ```text
//! b/
//! ├── build.gradle.kts        (or b.gradle.kts, or .gradle)
//! ├── README.md               (optional)
//! ├── .gitignore              (optional)
//! └── src/main/kotlin/com/example/b
//! ```
//!
//! Multiplatform modules get `src/<sourceSet>/kotlin/<package>` per source set
//! instead of `src/main/kotlin/<package>`.
//!
//! Three-module strategy: `api/`, `impl/` and `glue/` under the module root, each
//! laid out as above with its own build file (template kinds `api`, `impl`,
//! `glue`) and package suffixed with `.api`, `.impl` or `.glue`. Only `api/`
//! gets a README.
//!
use crate::common::fs::io;
use crate::core::config::Preferences;
use crate::core::error::Result;
use crate::core::templating::{self, TemplateContext, TemplateKind, MODULE_NAME_KEY};
use crate::scaffold::request::{
    CreationStrategy, ModuleRequest, ModuleType, PlatformType, THREE_MODULE_SUFFIXES,
};
use crate::scaffold::templates;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One entry slated for creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedFile {
    Directory { path: PathBuf },
    File { path: PathBuf, contents: String },
}

impl GeneratedFile {
    pub fn path(&self) -> &Path {
        match self {
            GeneratedFile::Directory { path } | GeneratedFile::File { path, .. } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, GeneratedFile::Directory { .. })
    }
}

/// Plans the module and, unless the request is a preview, writes it to disk.
/// Returns the planned entries either way.
pub fn build_module(request: &ModuleRequest, prefs: &Preferences) -> Result<Vec<GeneratedFile>> {
    let plan = plan_module(request, prefs);
    if request.preview_mode {
        info!("Preview mode: {} entries planned, nothing written", plan.len());
    } else {
        materialize(&plan)?;
    }
    Ok(plan)
}

/// Computes every directory and file for `request` without touching the disk.
pub fn plan_module(request: &ModuleRequest, prefs: &Preferences) -> Vec<GeneratedFile> {
    let module_root = request.module_root();
    let leaf = request.module_path.leaf();
    let mut plan = vec![GeneratedFile::Directory {
        path: module_root.clone(),
    }];

    match request.creation_strategy {
        CreationStrategy::Default => {
            let unit = LayoutUnit {
                root: module_root,
                name: leaf.to_string(),
                readme_name: leaf.to_string(),
                package_name: request.package_name.clone(),
                template_kind: match request.module_type {
                    ModuleType::Android => TemplateKind::Android,
                    ModuleType::Kotlin => TemplateKind::Kotlin,
                },
                with_readme: request.add_readme,
            };
            plan_unit(&unit, request, prefs, &mut plan);
        }
        CreationStrategy::ThreeModule => {
            for suffix in THREE_MODULE_SUFFIXES {
                let sub_root = module_root.join(suffix);
                plan.push(GeneratedFile::Directory {
                    path: sub_root.clone(),
                });
                let unit = LayoutUnit {
                    root: sub_root,
                    name: suffix.to_string(),
                    readme_name: format!("{}-{}", leaf, suffix),
                    package_name: suffixed_package(&request.package_name, suffix),
                    template_kind: match suffix {
                        "api" => TemplateKind::Api,
                        "impl" => TemplateKind::Impl,
                        _ => TemplateKind::Glue,
                    },
                    with_readme: request.add_readme && suffix == "api",
                };
                plan_unit(&unit, request, prefs, &mut plan);
            }
        }
    }

    debug!("Planned {} entries for {}", plan.len(), request.module_path.gradle_path());
    plan
}

/// Creates every planned directory (existing ones are fine), then writes
/// every planned file, overwriting. Stops at the first failure.
pub fn materialize(plan: &[GeneratedFile]) -> Result<()> {
    for entry in plan {
        if let GeneratedFile::Directory { path } = entry {
            io::ensure_dir_exists(path)?;
        }
    }
    for entry in plan {
        if let GeneratedFile::File { path, contents } = entry {
            io::write_string_to_file(path, contents)
                .with_context(|| format!("Failed to generate '{}'", path.display()))?;
        }
    }
    info!("Materialized {} entries", plan.len());
    Ok(())
}

/// One buildable directory: the module itself, or one of api/impl/glue.
struct LayoutUnit {
    root: PathBuf,
    /// Used for `<name>.gradle[.kts]` build-file naming.
    name: String,
    readme_name: String,
    package_name: String,
    template_kind: TemplateKind,
    with_readme: bool,
}

fn plan_unit(
    unit: &LayoutUnit,
    request: &ModuleRequest,
    prefs: &Preferences,
    plan: &mut Vec<GeneratedFile>,
) {
    let template = templates::resolve_build_template(
        prefs,
        unit.template_kind,
        request.module_type,
        request.platform_type,
        request.use_kts_extension,
    );
    plan.push(GeneratedFile::File {
        path: unit.root.join(build_file_name(request, &unit.name)),
        contents: templating::render(&template, &TemplateContext::for_package(&unit.package_name)),
    });

    if unit.with_readme {
        let mut context = TemplateContext::new();
        context.insert(MODULE_NAME_KEY, &unit.readme_name);
        plan.push(GeneratedFile::File {
            path: unit.root.join("README.md"),
            contents: templating::render(templates::README_TEMPLATE, &context),
        });
    }

    if request.add_gitignore {
        plan.push(GeneratedFile::File {
            path: unit.root.join(".gitignore"),
            contents: templates::resolve_gitignore(prefs),
        });
    }

    let package_dir = package_path(&unit.package_name);
    match request.platform_type {
        PlatformType::Single => plan.push(GeneratedFile::Directory {
            path: unit.root.join("src/main/kotlin").join(&package_dir),
        }),
        PlatformType::Multiplatform => {
            for source_set in &request.source_sets {
                plan.push(GeneratedFile::Directory {
                    path: unit
                        .root
                        .join("src")
                        .join(source_set)
                        .join("kotlin")
                        .join(&package_dir),
                });
            }
        }
    }
}

/// `build.gradle[.kts]`, or `<name>.gradle[.kts]` when named after the module.
fn build_file_name(request: &ModuleRequest, name: &str) -> String {
    let extension = if request.use_kts_extension {
        "gradle.kts"
    } else {
        "gradle"
    };
    if request.gradle_file_named_after_module {
        format!("{}.{}", name, extension)
    } else {
        format!("build.{}", extension)
    }
}

/// `com.example` -> `com/example`. Empty package -> empty path.
fn package_path(package_name: &str) -> PathBuf {
    package_name
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn suffixed_package(package_name: &str, suffix: &str) -> String {
    if package_name.is_empty() {
        suffix.to_string()
    } else {
        format!("{}.{}", package_name, suffix)
    }
}
