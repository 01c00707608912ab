//! # ModRS Built-in Templates
//!
//! File: cli/src/scaffold/templates.rs
//!
//! ## Overview
//!
//! Built-in templates used when no user override is saved.
//!
//! Build-file templates are chosen by module type, platform and script
//! dialect (`.gradle.kts` vs `.gradle`). Each one carries the
//! `{{ packageName }}` placeholder.
//!

use crate::core::config::Preferences;
use crate::core::templating::TemplateKind;
use crate::scaffold::request::{ModuleType, PlatformType};

const ANDROID_KTS: &str = r#"plugins {
    id("com.android.library")
    kotlin("android")
}

android {
    namespace = "{{ packageName }}"
    compileSdk = 34

    defaultConfig {
        minSdk = 24
    }
}

dependencies {
}
"#;

const ANDROID_GROOVY: &str = r#"plugins {
    id 'com.android.library'
    id 'org.jetbrains.kotlin.android'
}

android {
    namespace '{{ packageName }}'
    compileSdk 34

    defaultConfig {
        minSdk 24
    }
}

dependencies {
}
"#;

const KOTLIN_KTS: &str = r#"plugins {
    kotlin("jvm")
}

group = "{{ packageName }}"

dependencies {
}
"#;

const KOTLIN_GROOVY: &str = r#"plugins {
    id 'org.jetbrains.kotlin.jvm'
}

group = '{{ packageName }}'

dependencies {
}
"#;

const ANDROID_MULTIPLATFORM_KTS: &str = r#"plugins {
    kotlin("multiplatform")
    id("com.android.library")
}

kotlin {
    androidTarget()

    sourceSets {
        commonMain.dependencies {
        }
    }
}

android {
    namespace = "{{ packageName }}"
    compileSdk = 34

    defaultConfig {
        minSdk = 24
    }
}
"#;

const ANDROID_MULTIPLATFORM_GROOVY: &str = r#"plugins {
    id 'org.jetbrains.kotlin.multiplatform'
    id 'com.android.library'
}

kotlin {
    androidTarget()
}

android {
    namespace '{{ packageName }}'
    compileSdk 34

    defaultConfig {
        minSdk 24
    }
}
"#;

const KOTLIN_MULTIPLATFORM_KTS: &str = r#"plugins {
    kotlin("multiplatform")
}

group = "{{ packageName }}"

kotlin {
    jvm()

    sourceSets {
        commonMain.dependencies {
        }
    }
}
"#;

const KOTLIN_MULTIPLATFORM_GROOVY: &str = r#"plugins {
    id 'org.jetbrains.kotlin.multiplatform'
}

group = '{{ packageName }}'

kotlin {
    jvm()
}
"#;

/// README written into new modules (only `api` for the three-module strategy).
pub const README_TEMPLATE: &str = r#"# {{ moduleName }}

## Overview

Describe what the `{{ moduleName }}` module provides.

## Usage

Describe how other modules depend on `{{ moduleName }}`.
"#;

/// `.gitignore` written verbatim when the user has no override.
pub const DEFAULT_GITIGNORE: &str = "/build
*.iml
.gradle
/local.properties
/.idea
.DS_Store
/captures
.externalNativeBuild
.cxx
";

/// Built-in build-file template for the given module flavor.
pub fn default_build_template(
    module_type: ModuleType,
    platform: PlatformType,
    use_kts: bool,
) -> &'static str {
    match (module_type, platform, use_kts) {
        (ModuleType::Android, PlatformType::Single, true) => ANDROID_KTS,
        (ModuleType::Android, PlatformType::Single, false) => ANDROID_GROOVY,
        (ModuleType::Kotlin, PlatformType::Single, true) => KOTLIN_KTS,
        (ModuleType::Kotlin, PlatformType::Single, false) => KOTLIN_GROOVY,
        (ModuleType::Android, PlatformType::Multiplatform, true) => ANDROID_MULTIPLATFORM_KTS,
        (ModuleType::Android, PlatformType::Multiplatform, false) => ANDROID_MULTIPLATFORM_GROOVY,
        (ModuleType::Kotlin, PlatformType::Multiplatform, true) => KOTLIN_MULTIPLATFORM_KTS,
        (ModuleType::Kotlin, PlatformType::Multiplatform, false) => KOTLIN_MULTIPLATFORM_GROOVY,
    }
}

/// Resolves the build-file template: a non-blank saved override for `kind`,
/// else the built-in template for the flavor.
pub fn resolve_build_template(
    prefs: &Preferences,
    kind: TemplateKind,
    module_type: ModuleType,
    platform: PlatformType,
    use_kts: bool,
) -> String {
    prefs
        .templates
        .for_kind(kind)
        .unwrap_or_else(|| default_build_template(module_type, platform, use_kts))
        .to_string()
}

/// Resolves the `.gitignore` content: saved override or the built-in block.
pub fn resolve_gitignore(prefs: &Preferences) -> String {
    prefs
        .templates
        .for_kind(TemplateKind::Gitignore)
        .unwrap_or(DEFAULT_GITIGNORE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::templating::PACKAGE_NAME_KEY;

    #[test]
    fn test_every_build_template_has_package_placeholder() {
        for module_type in [ModuleType::Android, ModuleType::Kotlin] {
            for platform in [PlatformType::Single, PlatformType::Multiplatform] {
                for use_kts in [true, false] {
                    let template = default_build_template(module_type, platform, use_kts);
                    assert!(
                        template.contains(&format!("{{{{ {} }}}}", PACKAGE_NAME_KEY)),
                        "{:?}/{:?}/{} lacks the placeholder",
                        module_type,
                        platform,
                        use_kts
                    );
                }
            }
        }
    }

    #[test]
    fn test_override_wins_unless_blank() {
        let mut prefs = Preferences::default();
        let kind = TemplateKind::Api;
        assert_eq!(
            resolve_build_template(&prefs, kind, ModuleType::Kotlin, PlatformType::Single, true),
            KOTLIN_KTS
        );

        prefs.templates.api = Some("  \n".into());
        assert_eq!(
            resolve_build_template(&prefs, kind, ModuleType::Kotlin, PlatformType::Single, true),
            KOTLIN_KTS
        );

        prefs.templates.api = Some("api {{ packageName }}".into());
        assert_eq!(
            resolve_build_template(&prefs, kind, ModuleType::Android, PlatformType::Single, false),
            "api {{ packageName }}"
        );
        assert_eq!(resolve_gitignore(&prefs), DEFAULT_GITIGNORE);
    }
}
