//! # ModRS Headless Scenario Tests
//!
//! File: cli/tests/scenarios.rs
//!
//! ## Overview
//!
//! Drives the `modrs` library directly, without the binary: requests are
//! built in code, preferences come from an in-memory store and outcome
//! notifications are counted by a test listener.
//!

use modrs::core::config::{MemoryPreferenceStore, PreferenceStore, Preferences};
use modrs::core::error::ModrsError;
use modrs::scaffold::orchestrator::{CreationListener, CreationState, ModuleCreator};
use modrs::scaffold::request::{CreationStrategy, ModuleRequest};
use std::cell::Cell;
use std::fs;
use tempfile::tempdir;

const SETTINGS: &str = "rootProject.name = \"demo\"\ninclude(\":app\")\n";

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
fn test_three_module_split_gets_suffixed_packages() -> anyhow::Result<()> {
    let root = tempdir()?;
    fs::write(root.path().join("settings.gradle.kts"), SETTINGS)?;
    let store = MemoryPreferenceStore::default();
    let listener = CountingListener::default();

    let mut request = ModuleRequest::new(root.path(), ":repository", "com.example");
    request.creation_strategy = CreationStrategy::ThreeModule;
    let report = ModuleCreator::new(&store, &listener).create(&request)?;

    assert_eq!(
        report.added_statements(),
        [
            "include(\":repository:api\")",
            "include(\":repository:impl\")",
            "include(\":repository:glue\")",
        ]
    );
    for suffix in ["api", "impl", "glue"] {
        let build = fs::read_to_string(
            root.path()
                .join("repository")
                .join(suffix)
                .join("build.gradle.kts"),
        )?;
        assert!(build.contains(&format!("com.example.{}", suffix)));
    }
    assert!(root.path().join("repository/api/README.md").is_file());
    assert!(!root.path().join("repository/impl/README.md").exists());
    assert!(!root.path().join("repository/glue/README.md").exists());
    assert_eq!(listener.successes.get(), 1);
    Ok(())
}

#[test]
fn test_custom_keyword_with_include_path() -> anyhow::Result<()> {
    let root = tempdir()?;
    let settings = "rootProject.name = \"demo\"\nincludeBuild(\":app\")\nincludeBuild(\":zeta\")\n";
    fs::write(root.path().join("settings.gradle.kts"), settings)?;
    let mut prefs = Preferences::default();
    prefs.include_path_argument = true;
    let mut store = MemoryPreferenceStore::default();
    store.set(prefs)?;
    let listener = CountingListener::default();

    let request = ModuleRequest::new(root.path(), ":repository:network", "com.example.network");
    ModuleCreator::new(&store, &listener).create(&request)?;

    let root_path = root.path().to_string_lossy().replace('\\', "/");
    let expected = format!(
        "rootProject.name = \"demo\"\nincludeBuild(\":app\")\nincludeBuild(\":repository:network\", \"{}/repository/network\")\nincludeBuild(\":zeta\")\n",
        root_path.trim_end_matches('/')
    );
    assert_eq!(fs::read_to_string(root.path().join("settings.gradle.kts"))?, expected);
    assert!(root.path().join("repository/network/build.gradle.kts").is_file());
    Ok(())
}

#[test]
fn test_empty_leaf_name_is_rejected_before_any_write() -> anyhow::Result<()> {
    let root = tempdir()?;
    let settings = SETTINGS;
    fs::write(root.path().join("settings.gradle.kts"), settings)?;
    let store = MemoryPreferenceStore::default();
    let listener = CountingListener::default();
    let mut creator = ModuleCreator::new(&store, &listener);

    let request = ModuleRequest::new(root.path(), ":repository:", "com.example");
    let error = creator.create(&request).unwrap_err();

    assert!(matches!(
        error.downcast_ref::<ModrsError>(),
        Some(ModrsError::Validation(_))
    ));
    assert_eq!(creator.state(), CreationState::Failed);
    assert_eq!(listener.errors.get(), 1);
    assert_eq!(listener.successes.get(), 0);
    assert_eq!(fs::read_to_string(root.path().join("settings.gradle.kts"))?, settings);
    assert_eq!(fs::read_dir(root.path())?.count(), 1);
    Ok(())
}
