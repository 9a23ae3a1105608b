//! Item-metadata collaborator.
//!
//! Crafting needs an item's numeric identifier, which depends on the
//! world-data version the session speaks. [`ItemCatalog`] is that lookup;
//! [`StaticItemCatalog`] is a table-backed implementation that can be
//! loaded from JSON shaped as `{ "<version>": { "<item name>": <id> } }`.

use std::collections::BTreeMap;
use std::path::Path;

/// Maps item names to numeric identifiers for a world-data version.
pub trait ItemCatalog: Send + Sync {
    /// Numeric identifier of `name` in `version`, if known.
    fn item_id(&self, version: &str, name: &str) -> Option<u32>;
}

/// Errors that can occur when loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read item catalog: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The catalog content is not valid JSON of the expected shape.
    #[error("failed to parse item catalog JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// An [`ItemCatalog`] backed by in-memory tables, one per version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticItemCatalog {
    versions: BTreeMap<String, BTreeMap<String, u32>>,
}

impl StaticItemCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) one entry, builder style.
    #[must_use]
    pub fn with_item(mut self, version: &str, name: &str, id: u32) -> Self {
        self.versions
            .entry(String::from(version))
            .or_default()
            .insert(String::from(name), id);
        self
    }

    /// Parse a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the string is not a
    /// version-to-table object.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let versions = serde_json::from_str(json)?;
        Ok(Self { versions })
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or
    /// [`CatalogError::Json`] if its content is malformed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Number of entries across all versions.
    pub fn len(&self) -> usize {
        self.versions.values().map(BTreeMap::len).sum()
    }

    /// Whether the catalog has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.versions.values().all(BTreeMap::is_empty)
    }
}

impl ItemCatalog for StaticItemCatalog {
    fn item_id(&self, version: &str, name: &str) -> Option<u32> {
        self.versions.get(version)?.get(name).copied()
    }
}
