//! Rewriting of symbolic token references into collection-prefixed paths.
//!
//! Source values reference other tokens by their original top-level name,
//! e.g. `"{Slate.100}"`. Downstream styling systems need fully-qualified
//! paths (`"{sds-color.Slate.100}"`), so after the merge completes every
//! string leaf is scanned and each reference whose top-level name was
//! declared by a known collection gets that collection's alias prefix.
//! References to unregistered names are left byte-for-byte untouched: the
//! referent may be defined by an external library, so this is not an error.

use crate::document::{TokenDocument, TokenTreeNode};
use crate::registry::CollectionRegistry;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;

/// Original (unsanitized) top-level name -> collection key that declared it.
pub type NameRegistry = BTreeMap<String, String>;

pub struct AliasResolver<'a> {
    names: &'a NameRegistry,
    registry: &'a CollectionRegistry,
    reference: Regex,
}

impl<'a> AliasResolver<'a> {
    pub fn new(names: &'a NameRegistry, registry: &'a CollectionRegistry) -> Self {
        Self {
            names,
            registry,
            // Fixed pattern, cannot fail to compile.
            reference: Regex::new(r"\{([^}]+)\}").unwrap(),
        }
    }

    /// Rewrite every reference in the document in place.
    ///
    /// Covers `$value`, each `modes` entry (recursing through arrays and
    /// nested objects), and `$description`. External identifiers are never
    /// touched; they must survive regeneration verbatim.
    pub fn resolve(&self, document: &mut TokenDocument) {
        for tree in document.collections.values_mut() {
            for node in tree.values_mut() {
                self.resolve_node(node);
            }
        }
    }

    fn resolve_node(&self, node: &mut TokenTreeNode) {
        match node {
            TokenTreeNode::Group(subtree) => {
                for child in subtree.values_mut() {
                    self.resolve_node(child);
                }
            }
            TokenTreeNode::Token(token) => {
                if let Some(value) = &mut token.value {
                    self.rewrite_value(value);
                }
                for value in token.extensions.sds.modes.values_mut() {
                    self.rewrite_value(value);
                }
                if let Some(description) = &mut token.description {
                    *description = self.rewrite_str(description);
                }
            }
        }
    }

    fn rewrite_value(&self, value: &mut Value) {
        match value {
            Value::String(s) => *s = self.rewrite_str(s),
            Value::Array(items) => {
                for item in items {
                    self.rewrite_value(item);
                }
            }
            Value::Object(members) => {
                for member in members.values_mut() {
                    self.rewrite_value(member);
                }
            }
            _ => {}
        }
    }

    fn rewrite_str(&self, s: &str) -> String {
        self.reference
            .replace_all(s, |caps: &Captures| {
                let alias = &caps[1];
                let top_level = alias.split('.').next().unwrap_or(alias);
                match self.names.get(top_level) {
                    Some(collection) => {
                        format!("{{{}.{}}}", self.registry.alias_prefix(collection), alias)
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}
