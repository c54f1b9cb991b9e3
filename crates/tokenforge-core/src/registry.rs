//! Registry of token collections and their file/mode/alias tables.
//!
//! The registry is the single authority for how source directories map to
//! collection keys, how filenames inside a collection map to mode labels,
//! and which alias prefix each collection contributes to rewritten
//! references. It is built once and passed by value through the pipeline;
//! there is no global mutable table.

use std::collections::BTreeMap;

/// Extensions namespace carrying per-mode values and external identifiers.
pub const EXTENSION_NAMESPACE: &str = "com.figma.sds";

/// Mode label used when a file declares no explicit mode.
pub const DEFAULT_MODE: &str = "default";

/// Conventional filename that resolves to [`DEFAULT_MODE`].
pub const DEFAULT_MODE_FILE: &str = "Default.json";

/// Light-theme mode label, privileged by the default-value selection rule.
pub const LIGHT_MODE: &str = "sds_light";

/// Extension of token source files.
pub const TOKEN_FILE_EXT: &str = "json";

/// Leading marker of reserved metadata keys inside token files.
pub const METADATA_MARKER: char = '$';

/// Collection, mode, and alias-prefix tables for a token source tree.
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    /// Source subdirectory name -> collection key (e.g. "Color" -> "@color").
    directories: BTreeMap<String, String>,
    /// (collection key, filename) -> mode label.
    modes: BTreeMap<String, BTreeMap<String, String>>,
    /// Collection key -> alias prefix used when rewriting references.
    alias_prefixes: BTreeMap<String, String>,
}

impl CollectionRegistry {
    /// The SDS token library layout: six collections, explicit mode tables
    /// for the themed color files and the typography mode file.
    pub fn standard() -> Self {
        let mut registry = Self::default();

        registry.register_directory("Color", "@color");
        registry.register_directory("Color Primitives", "@color_primitives");
        registry.register_directory("Size", "@size");
        registry.register_directory("Typography", "@typography");
        registry.register_directory("Typography Primitives", "@typography_primitives");
        registry.register_directory("Responsive", "@responsive");

        registry.register_mode("@color", "SDS Light.json", LIGHT_MODE);
        registry.register_mode("@color", "SDS Dark.json", "sds_dark");
        registry.register_mode("@typography", "Mode 1.json", DEFAULT_MODE);

        registry.register_alias_prefix("@color_primitives", "sds-color");
        registry.register_alias_prefix("@color", "sds-color");
        registry.register_alias_prefix("@size", "sds-size");
        registry.register_alias_prefix("@typography", "sds-typography");
        registry.register_alias_prefix("@typography_primitives", "sds-typography");
        registry.register_alias_prefix("@responsive", "sds-responsive");

        registry
    }

    pub fn register_directory(&mut self, directory: &str, collection: &str) {
        self.directories
            .insert(directory.to_string(), collection.to_string());
    }

    pub fn register_mode(&mut self, collection: &str, filename: &str, mode: &str) {
        self.modes
            .entry(collection.to_string())
            .or_default()
            .insert(filename.to_string(), mode.to_string());
    }

    pub fn register_alias_prefix(&mut self, collection: &str, prefix: &str) {
        self.alias_prefixes
            .insert(collection.to_string(), prefix.to_string());
    }

    /// Collection key for a source subdirectory, or `None` when the
    /// directory is not part of the token library and should be ignored.
    pub fn collection_for_directory(&self, directory: &str) -> Option<&str> {
        self.directories.get(directory).map(String::as_str)
    }

    /// Resolve the mode label for a file within a collection.
    ///
    /// Precedence: explicit (collection, filename) table entry, then the
    /// conventional `Default.json` name, then `"default"` as a catch-all.
    /// Two unmapped files in one collection therefore collide into the same
    /// mode; discovery warns when that happens.
    pub fn mode_for_file(&self, collection: &str, filename: &str) -> &str {
        if let Some(mode) = self
            .modes
            .get(collection)
            .and_then(|table| table.get(filename))
        {
            return mode;
        }
        DEFAULT_MODE
    }

    /// Alias prefix contributed by a collection when references to its
    /// top-level names are rewritten. Falls back to the collection key with
    /// its leading `@` stripped when no prefix is registered.
    pub fn alias_prefix<'a>(&'a self, collection: &'a str) -> &'a str {
        match self.alias_prefixes.get(collection) {
            Some(prefix) => prefix,
            None => collection.trim_start_matches('@'),
        }
    }
}
