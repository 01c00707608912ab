//! # ModRS Directory Tree Printer
//!
//! File: cli/src/commands/module/utils/tree_printer.rs
//!
//! ## Overview
//!
//! Formats a module layout as a `tree`-style listing. Two sources feed it:
//! - the planned entries of a preview run (nothing exists on disk yet)
//! - the module directory on disk after a real run, walked with `walkdir`
//!
//! Both are reduced to a list of relative paths and drawn the same way:
//! directories first, then files, each group sorted by name.
//!
//! ```text
//! database/
//! ├── src/
//! │   └── main/
//! │       └── kotlin/
//! ├── README.md
//! └── build.gradle.kts
//! ```
//!
use crate::core::error::Result;
use crate::scaffold::layout::GeneratedFile;
use anyhow::Context;
use std::{
    collections::BTreeMap,
    fmt::Write as FmtWrite,
    path::{Path, PathBuf},
};
use tracing::warn;
use walkdir::WalkDir;

// --- Constants for Tree Drawing ---

/// Connector for intermediate items in a directory listing ("T" shape).
const TEE: &str = "├── ";
/// Connector for the last item in a directory listing ("L" shape).
const ELBOW: &str = "└── ";
/// Vertical line used for ongoing indentation levels.
const PIPE: &str = "│   ";
/// Spacer used for indentation levels after the last item has been printed.
const SPACER: &str = "    ";

#[derive(Default)]
struct Node {
    is_dir: bool,
    children: BTreeMap<String, Node>,
}

impl Node {
    fn insert(&mut self, relative: &Path, is_dir: bool) {
        let mut node = self;
        let components: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let count = components.len();
        for (index, name) in components.into_iter().enumerate() {
            node.is_dir = true;
            node = node.children.entry(name).or_default();
            if index + 1 < count || is_dir {
                node.is_dir = true;
            }
        }
    }
}

/// Draws the planned entries below `module_root`.
pub fn plan_tree_to_string(
    module_root: &Path,
    display_name: &str,
    plan: &[GeneratedFile],
) -> Result<String> {
    let entries: Vec<(PathBuf, bool)> = plan
        .iter()
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(module_root).ok()?;
            (!relative.as_os_str().is_empty()).then(|| (relative.to_path_buf(), entry.is_dir()))
        })
        .collect();
    render_tree(display_name, &entries)
}

/// Walks `root_path` on disk and draws everything below it.
pub fn print_directory_tree_to_string(root_path: &Path, display_name: &str) -> Result<String> {
    if !root_path.is_dir() {
        anyhow::bail!(
            "Cannot print tree: Path '{}' is not a directory.",
            root_path.display()
        );
    }

    let mut entries = Vec::new();
    for entry_result in WalkDir::new(root_path).min_depth(1) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    "Failed to access entry during walk in '{}': {}",
                    root_path.display(),
                    e
                );
                continue;
            }
        };
        let relative = entry
            .path()
            .strip_prefix(root_path)
            .context("Walked entry outside of tree root")?;
        entries.push((relative.to_path_buf(), entry.file_type().is_dir()));
    }
    render_tree(display_name, &entries)
}

/// Draws relative `(path, is_dir)` entries under a root labelled `display_name`.
pub fn render_tree(display_name: &str, entries: &[(PathBuf, bool)]) -> Result<String> {
    let mut root = Node {
        is_dir: true,
        ..Default::default()
    };
    for (path, is_dir) in entries {
        root.insert(path, *is_dir);
    }

    let mut output = String::new();
    writeln!(output, "{}/", display_name)?;
    write_children(&root, &mut String::new(), &mut output)?;
    Ok(output)
}

fn write_children(node: &Node, prefix: &mut String, output: &mut String) -> Result<()> {
    // Directories first, then files; BTreeMap already orders each group by name.
    let mut children: Vec<(&String, &Node)> = node.children.iter().collect();
    children.sort_by_key(|(_, child)| !child.is_dir);

    let count = children.len();
    for (index, (name, child)) in children.into_iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { ELBOW } else { TEE };
        if child.is_dir {
            writeln!(output, "{}{}{}/", prefix, connector, name)?;
            let component = if is_last { SPACER } else { PIPE };
            prefix.push_str(component);
            write_children(child, prefix, output)?;
            prefix.truncate(prefix.len() - component.len());
        } else {
            writeln!(output, "{}{}{}", prefix, connector, name)?;
        }
    }
    Ok(())
}
