//! Filesystem discovery of token source files.
//!
//! Routes each file under the source root into a collection based on the
//! directory it lives in, and assigns it a mode label up front. Directory
//! iteration order is filesystem-dependent, so entries are sorted by name
//! before any merging happens; precedence between files is therefore
//! lexicographic and reproducible across machines.

use crate::error::TokenError;
use crate::registry::{CollectionRegistry, TOKEN_FILE_EXT};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One discovered token source file, with its mode already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub filename: String,
    pub mode: String,
}

/// Discovered files grouped by collection key, in deterministic order.
#[derive(Debug, Clone, Default)]
pub struct CollectionSources {
    pub collections: BTreeMap<String, Vec<SourceFile>>,
}

/// Enumerate the source root and classify every token file.
///
/// Subdirectories with no registry mapping are ignored, as are entries that
/// are not regular `.json` files. A missing root is fatal: nothing can be
/// generated without input.
pub fn discover(
    root: &Path,
    registry: &CollectionRegistry,
) -> Result<CollectionSources, TokenError> {
    if !root.is_dir() {
        return Err(TokenError::MissingRoot(root.to_path_buf()));
    }

    let mut sources = CollectionSources::default();

    for dir in sorted_entries(root)? {
        if !dir.is_dir() {
            continue;
        }
        let Some(dir_name) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(collection) = registry.collection_for_directory(dir_name) else {
            tracing::debug!("Ignoring unmapped directory {:?}", dir_name);
            continue;
        };

        let files = sources
            .collections
            .entry(collection.to_string())
            .or_default();

        for file in sorted_entries(&dir)? {
            if !file.is_file() {
                continue;
            }
            if file.extension().and_then(|e| e.to_str()) != Some(TOKEN_FILE_EXT) {
                continue;
            }
            let Some(filename) = file.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let mode = registry.mode_for_file(collection, filename).to_string();
            if let Some(previous) = files.iter().find(|f| f.mode == mode) {
                tracing::warn!(
                    "Files {:?} and {:?} in {} both resolve to mode {:?}; \
                     the later file's values win for that mode",
                    previous.filename,
                    filename,
                    collection,
                    mode
                );
            }

            files.push(SourceFile {
                path: file.clone(),
                filename: filename.to_string(),
                mode,
            });
        }
    }

    Ok(sources)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, TokenError> {
    let entries = std::fs::read_dir(dir).map_err(|source| TokenError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();
    Ok(paths)
}
