//! Unified token document model and source-file parsing.
//!
//! Two shapes live here:
//!
//! - The **output** side ([`TokenDocument`], [`TokenTree`], [`TokenNode`]):
//!   the unified multi-mode document written to `tokens.json` and read back
//!   as the identifier baseline. Serde attributes pin the wire format
//!   (`$type`, `$value`, `$extensions."com.figma.sds"`).
//! - The **input** side ([`SourceNode`], [`SourceToken`]): one Figma export
//!   file. Whether a node is a token or a group is decided exactly once,
//!   when the file is parsed: an object carrying a `$value` member is a
//!   token, anything else is a group.
//!
//! All maps are `BTreeMap` so serialization order is deterministic and the
//! generated document diffs cleanly across runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::registry::METADATA_MARKER;

/// A nested group of tokens, keyed by sanitized name.
pub type TokenTree = BTreeMap<String, TokenTreeNode>;

/// The unified multi-mode document, keyed by collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDocument {
    pub collections: BTreeMap<String, TokenTree>,
}

impl TokenDocument {
    /// Serialize with two-space indentation and stable key order.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Visit every token in the document depth-first, in key order, with
    /// its dot-joined path (collection key included).
    pub fn visit_tokens<'a>(&'a self, mut visit: impl FnMut(&str, &'a TokenNode)) {
        fn walk<'a>(
            tree: &'a TokenTree,
            path: &str,
            visit: &mut impl FnMut(&str, &'a TokenNode),
        ) {
            for (key, node) in tree {
                let child_path = format!("{}.{}", path, key);
                match node {
                    TokenTreeNode::Token(token) => visit(&child_path, token),
                    TokenTreeNode::Group(subtree) => walk(subtree, &child_path, visit),
                }
            }
        }

        for (collection, tree) in &self.collections {
            walk(tree, collection, &mut visit);
        }
    }
}

/// Either a single token or a nested group.
///
/// Untagged: a token is recognized by its reserved `$`-prefixed members
/// (`deny_unknown_fields` on [`TokenNode`] keeps groups, whose keys are
/// never `$`-prefixed, from matching the token shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenTreeNode {
    Token(TokenNode),
    Group(TokenTree),
}

impl TokenTreeNode {
    pub fn as_token(&self) -> Option<&TokenNode> {
        match self {
            TokenTreeNode::Token(token) => Some(token),
            TokenTreeNode::Group(_) => None,
        }
    }
}

/// One design value with its per-mode variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenNode {
    /// Declared value category (color, dimension, ...), carried through
    /// from the source unchanged. Last contributing file wins.
    #[serde(rename = "$type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Optional human description. Last contributing file wins.
    #[serde(rename = "$description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "$extensions")]
    pub extensions: Extensions,

    /// The value used when no mode is requested; see the merge precedence
    /// rule for how it is chosen among modes.
    #[serde(rename = "$value", skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Mode label that currently supplied `value`. Merge bookkeeping only,
    /// never serialized.
    #[serde(skip)]
    pub(crate) default_mode: Option<String>,
}

/// `$extensions` envelope; only the `com.figma.sds` namespace is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extensions {
    #[serde(rename = "com.figma.sds")]
    pub sds: SdsExtension,
}

/// Per-mode values and the stable external identifier for one token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SdsExtension {
    /// Mode label -> raw value as authored in that mode's source file.
    pub modes: BTreeMap<String, Value>,

    /// Figma variable id restored from the previous generation; absent for
    /// tokens that did not exist at the baseline's path.
    #[serde(rename = "figmaId", skip_serializing_if = "Option::is_none")]
    pub figma_id: Option<String>,
}

/// A node of a parsed source file: token or group, decided at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceNode {
    Token(SourceToken),
    Group(BTreeMap<String, SourceNode>),
}

/// Value-bearing fields of a source token.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceToken {
    pub token_type: Option<String>,
    pub description: Option<String>,
    pub value: Value,
}

/// One parsed token source file: its tree plus the original (unsanitized)
/// top-level names, which feed the alias name registry.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTree {
    pub nodes: BTreeMap<String, SourceNode>,
    pub top_level_names: Vec<String>,
}

impl SourceTree {
    /// Classify a parsed JSON document into tokens and groups.
    ///
    /// Returns `None` when the document root is not an object.
    pub fn from_value(root: &Value) -> Option<Self> {
        let object = root.as_object()?;
        let mut top_level_names = Vec::new();
        let mut nodes = BTreeMap::new();

        for (name, value) in object {
            if name.starts_with(METADATA_MARKER) {
                continue;
            }
            top_level_names.push(name.clone());
            if let Some(node) = SourceNode::from_value(value) {
                nodes.insert(name.clone(), node);
            }
        }

        Some(Self {
            nodes,
            top_level_names,
        })
    }
}

impl SourceNode {
    /// Classify one source member. Objects with a `$value` member are
    /// tokens; other objects are groups. Scalar members of a group are not
    /// tokens at all and are dropped with a debug log.
    fn from_value(value: &Value) -> Option<Self> {
        let object = match value.as_object() {
            Some(object) => object,
            None => {
                tracing::debug!("Skipping non-object source member: {}", value);
                return None;
            }
        };

        if let Some(token_value) = object.get("$value") {
            return Some(SourceNode::Token(SourceToken {
                token_type: object
                    .get("$type")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                description: object
                    .get("$description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                value: token_value.clone(),
            }));
        }

        let mut children = BTreeMap::new();
        for (key, child) in object {
            if key.starts_with(METADATA_MARKER) {
                continue;
            }
            if let Some(node) = SourceNode::from_value(child) {
                children.insert(key.clone(), node);
            }
        }
        Some(SourceNode::Group(children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_source_tree_classification() {
        let raw = json!({
            "$schema": "ignored",
            "Slate": {
                "100": { "$type": "color", "$value": "#f1f5f9" },
                "$meta": { "$value": "skipped" },
                "Deep": {
                    "900": { "$value": "#0f172a", "$description": "darkest" }
                }
            },
            "stray": "not a node"
        });

        let tree = SourceTree::from_value(&raw).unwrap();
        assert_eq!(tree.top_level_names, vec!["Slate", "stray"]);

        let slate = match &tree.nodes["Slate"] {
            SourceNode::Group(children) => children,
            SourceNode::Token(_) => panic!("Slate is a group"),
        };
        // "$meta" skipped even though it carries a $value.
        assert_eq!(slate.len(), 2);

        match &slate["100"] {
            SourceNode::Token(token) => {
                assert_eq!(token.token_type.as_deref(), Some("color"));
                assert_eq!(token.value, json!("#f1f5f9"));
            }
            SourceNode::Group(_) => panic!("100 is a token"),
        }

        // Scalar member dropped entirely.
        assert!(!tree.nodes.contains_key("stray"));
    }

    #[test]
    fn test_source_tree_rejects_non_object_root() {
        assert!(SourceTree::from_value(&json!(["not", "an", "object"])).is_none());
        assert!(SourceTree::from_value(&json!("scalar")).is_none());
    }

    #[test]
    fn test_token_node_round_trip() {
        let raw = json!({
            "@color": {
                "background": {
                    "default": {
                        "$type": "color",
                        "$extensions": {
                            "com.figma.sds": {
                                "modes": {
                                    "sds_light": "{White.1000}",
                                    "sds_dark": "{Slate.1000}"
                                },
                                "figmaId": "VariableID:2:2080"
                            }
                        },
                        "$value": "{sds-color.White.1000}"
                    }
                }
            }
        });

        let document: TokenDocument = serde_json::from_value(raw.clone()).unwrap();
        let tree = &document.collections["@color"];
        let background = match &tree["background"] {
            TokenTreeNode::Group(children) => children,
            TokenTreeNode::Token(_) => panic!("background is a group"),
        };
        let token = background["default"].as_token().unwrap();
        assert_eq!(token.token_type.as_deref(), Some("color"));
        assert_eq!(
            token.extensions.sds.figma_id.as_deref(),
            Some("VariableID:2:2080")
        );
        assert_eq!(token.extensions.sds.modes.len(), 2);

        let back = serde_json::to_value(&document).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_visit_tokens_paths() {
        let raw = json!({
            "@size": {
                "depth": {
                    "depth-100": {
                        "$extensions": { "com.figma.sds": { "modes": { "default": 4 } } },
                        "$value": 4
                    },
                    "depth-200": {
                        "$extensions": { "com.figma.sds": { "modes": { "default": 8 } } },
                        "$value": 8
                    }
                }
            }
        });

        let document: TokenDocument = serde_json::from_value(raw).unwrap();
        let mut paths = Vec::new();
        document.visit_tokens(|path, _| paths.push(path.to_string()));
        assert_eq!(paths, vec!["@size.depth.depth-100", "@size.depth.depth-200"]);
    }

    #[test]
    fn test_emit_is_deterministic() {
        let mut document = TokenDocument::default();
        let mut tree = TokenTree::new();
        let mut token = TokenNode::default();
        token
            .extensions
            .sds
            .modes
            .insert("default".to_string(), json!("#fff"));
        token.value = Some(json!("#fff"));
        tree.insert("white".to_string(), TokenTreeNode::Token(token));
        document.collections.insert("@color".to_string(), tree);

        assert_eq!(
            document.to_json_pretty().unwrap(),
            document.to_json_pretty().unwrap()
        );
    }
}
