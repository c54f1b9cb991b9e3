//! Recursive merge of source file trees into the unified document.
//!
//! Each source file contributes one mode's values for one collection. The
//! merger folds every file into the same destination tree: groups nest,
//! tokens accumulate a `modes` entry per contributing file, and `$value` is
//! chosen by an explicit precedence rule rather than by file order.
//!
//! # Default-value precedence
//!
//! Among the modes contributing to a token, `$value` is taken from:
//!
//! 1. `"default"` — always wins when present;
//! 2. `"sds_light"` — wins over any non-default label;
//! 3. otherwise, the first arbitrary mode processed keeps the slot.
//!
//! A later file resolving to the *same* mode as the current holder still
//! refreshes `$value`, consistent with its `modes` entry being overwritten.

use crate::document::{SourceNode, SourceToken, TokenNode, TokenTree, TokenTreeNode};
use crate::naming::sanitize_key;
use crate::registry::{DEFAULT_MODE, LIGHT_MODE};
use crate::snapshot::IdMap;
use std::collections::BTreeMap;

/// Merge one parsed source file into a collection's destination tree.
///
/// `base_path` is the dot-path of `dest` (the collection key at the top
/// level); it grows with each sanitized key and is used to look up restored
/// external identifiers in `ids`.
pub fn merge_source_tree(
    dest: &mut TokenTree,
    source: &BTreeMap<String, SourceNode>,
    mode: &str,
    base_path: &str,
    ids: &IdMap,
) {
    for (name, node) in source {
        let key = sanitize_key(name);
        if key.is_empty() {
            tracing::warn!("Skipping token name {:?}: sanitizes to empty key", name);
            continue;
        }
        let path = format!("{}.{}", base_path, key);

        match node {
            SourceNode::Group(children) => {
                let entry = dest
                    .entry(key)
                    .or_insert_with(|| TokenTreeNode::Group(TokenTree::new()));
                match entry {
                    TokenTreeNode::Group(subtree) => {
                        merge_source_tree(subtree, children, mode, &path, ids);
                    }
                    TokenTreeNode::Token(_) => {
                        tracing::warn!(
                            "Shape conflict at {}: token already present, skipping group from mode {}",
                            path,
                            mode
                        );
                    }
                }
            }
            SourceNode::Token(source_token) => {
                let entry = dest
                    .entry(key)
                    .or_insert_with(|| TokenTreeNode::Token(TokenNode::default()));
                match entry {
                    TokenTreeNode::Token(token) => {
                        merge_token(token, source_token, mode, &path, ids);
                    }
                    TokenTreeNode::Group(_) => {
                        tracing::warn!(
                            "Shape conflict at {}: group already present, skipping token from mode {}",
                            path,
                            mode
                        );
                    }
                }
            }
        }
    }
}

fn merge_token(token: &mut TokenNode, source: &SourceToken, mode: &str, path: &str, ids: &IdMap) {
    // Metadata is last-writer-wins, including overwriting with absent.
    token.token_type = source.token_type.clone();
    token.description = source.description.clone();

    if let Some(id) = ids.get(path) {
        token.extensions.sds.figma_id = Some(id.clone());
    }

    token
        .extensions
        .sds
        .modes
        .insert(mode.to_string(), source.value.clone());

    let adopt = match &token.default_mode {
        None => true,
        Some(current) => mode == current || mode_rank(mode) > mode_rank(current),
    };
    if adopt {
        token.value = Some(source.value.clone());
        token.default_mode = Some(mode.to_string());
    }
}

fn mode_rank(mode: &str) -> u8 {
    match mode {
        DEFAULT_MODE => 2,
        LIGHT_MODE => 1,
        _ => 0,
    }
}
