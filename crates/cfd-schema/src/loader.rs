//! # Definition Source Loading
//!
//! Discovers every variable-definition source under a repository root and
//! merges them into one definitions map for the validator.
//!
//! A source is any file named `variable_definitions.json`,
//! `variable_definitions.yaml`, or `variable_definitions.yml`, at any depth.
//! Discovery sorts paths so the merge is deterministic. When two sources
//! declare the same variable, the later path in sort order wins and the
//! collision is logged — the deploy repositories this tool targets keep
//! variable names disjoint per template, so a collision is almost always an
//! authoring mistake worth surfacing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cfd_core::VariableDefinition;
use thiserror::Error;

/// Filenames recognized as variable-definition sources.
const SOURCE_FILENAMES: &[&str] = &[
    "variable_definitions.json",
    "variable_definitions.yaml",
    "variable_definitions.yml",
];

/// Error loading definition sources. Always fatal: validation cannot
/// proceed without a complete input map.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No definition source exists under the root.
    #[error("no variable definition sources found under '{root}'")]
    NoSourcesFound {
        /// The repository root that was scanned.
        root: String,
    },

    /// A discovered source could not be read.
    #[error("cannot read definition source '{path}': {reason}")]
    Unreadable {
        /// Path to the source file.
        path: String,
        /// Underlying IO failure.
        reason: String,
    },

    /// A discovered source could not be parsed.
    #[error("cannot parse definition source '{path}': {reason}")]
    Parse {
        /// Path to the source file.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Recursively find all definition sources under `dir`, sorted by path.
pub fn find_definition_files(dir: &Path) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                sources.extend(find_definition_files(&path));
            } else if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| SOURCE_FILENAMES.contains(&n))
            {
                sources.push(path);
            }
        }
    }
    sources.sort();
    sources
}

/// Load and merge every definition source under `repo_root`.
///
/// # Errors
///
/// Returns [`LoadError::NoSourcesFound`] when the scan comes up empty, and
/// [`LoadError::Unreadable`] / [`LoadError::Parse`] for a broken source.
pub fn load_definitions(
    repo_root: &Path,
) -> Result<BTreeMap<String, VariableDefinition>, LoadError> {
    let sources = find_definition_files(repo_root);
    if sources.is_empty() {
        return Err(LoadError::NoSourcesFound {
            root: repo_root.display().to_string(),
        });
    }

    let mut definitions = BTreeMap::new();
    for path in &sources {
        let parsed = load_source(path)?;
        for (name, def) in parsed {
            if definitions.insert(name.clone(), def).is_some() {
                tracing::warn!(
                    variable = %name,
                    source = %path.display(),
                    "duplicate variable definition; the later source wins"
                );
            }
        }
    }
    Ok(definitions)
}

/// Parse one source file, dispatching on its extension.
fn load_source(path: &Path) -> Result<BTreeMap<String, VariableDefinition>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| LoadError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
        _ => serde_json::from_str(&content).map_err(|e| LoadError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}
