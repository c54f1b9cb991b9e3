//! The generate pipeline: discovery, snapshot restore, merge, alias
//! resolution, emission.
//!
//! One linear, synchronous pass. All accumulation state (the in-progress
//! document, the top-level name registry, the identifier map) is threaded
//! explicitly through the stages; nothing is module-global. The only
//! best-effort stage is the snapshot load; every other failure aborts the
//! run before any output is written.

use crate::alias::{AliasResolver, NameRegistry};
use crate::discovery::{discover, SourceFile};
use crate::document::{SourceTree, TokenDocument};
use crate::error::TokenError;
use crate::merge::merge_source_tree;
use crate::registry::CollectionRegistry;
use crate::snapshot::{load_id_map, Baseline};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Root directory containing one subdirectory per collection.
    pub root: PathBuf,
    /// Where the previous generation is read from for identifier reuse.
    pub baseline: Baseline,
    pub registry: CollectionRegistry,
}

impl GenerateOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            baseline: Baseline::Disabled,
            registry: CollectionRegistry::standard(),
        }
    }

    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Run the full pipeline and return the unified document.
pub fn generate(options: &GenerateOptions) -> Result<TokenDocument, TokenError> {
    let sources = discover(&options.root, &options.registry)?;
    let ids = load_id_map(&options.baseline);
    debug!("Restored {} token ids from baseline", ids.len());

    let mut document = TokenDocument::default();
    let mut names = NameRegistry::new();

    for (collection, files) in &sources.collections {
        let tree = document.collections.entry(collection.clone()).or_default();

        for file in files {
            let source = parse_source_file(file)?;
            info!(
                "Merging {:?} into {} as mode {:?}",
                file.filename, collection, file.mode
            );

            for name in &source.top_level_names {
                names.insert(name.clone(), collection.clone());
            }

            merge_source_tree(tree, &source.nodes, &file.mode, collection, &ids);
        }
    }

    AliasResolver::new(&names, &options.registry).resolve(&mut document);

    Ok(document)
}

fn parse_source_file(file: &SourceFile) -> Result<SourceTree, TokenError> {
    let content = std::fs::read_to_string(&file.path).map_err(|source| TokenError::Io {
        path: file.path.clone(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| TokenError::Parse {
        path: file.path.clone(),
        source,
    })?;

    SourceTree::from_value(&value).ok_or_else(|| TokenError::InvalidSource {
        path: file.path.clone(),
        reason: "document root is not an object".to_string(),
    })
}
