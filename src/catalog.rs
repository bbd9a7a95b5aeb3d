//! The read-only set of names a query is matched against.
//!
//! A catalog is built once (from records, plain names or a `maps.json` style
//! file) and then shared behind an `Arc`; it is never mutated afterwards.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One record of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Lowercase name matched against queries
    pub name: String,
    /// Secondary sort key, compared as a string (`T4` < `T5` < ...)
    #[serde(default)]
    pub tier: String,
    /// Free-form category; not used for matching
    #[serde(default, alias = "type", alias = "map_type")]
    pub category: String,
}

impl CatalogEntry {
    /// Creates an entry without category
    pub fn new(name: impl Into<String>, tier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tier: tier.into(),
            category: String::new(),
        }
    }

    /// Sets the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Errors raised while building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("could not read catalog {}: {source}", path.display())]
    Io {
        /// Path of the catalog file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The catalog is not a JSON array of records
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A record has an empty or whitespace-only name
    #[error("catalog entry {index} has a blank name")]
    BlankName {
        /// Position of the record in the input
        index: usize,
    },
}

/// Immutable, ordered list of catalog entries
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Arc<CatalogEntry>>,
}

impl Catalog {
    /// Builds a catalog, trimming and lowercasing every name.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(index, mut entry)| {
                let name = entry.name.trim();
                if name.is_empty() {
                    return Err(CatalogError::BlankName { index });
                }
                entry.name = name.to_lowercase();
                Ok(Arc::new(entry))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("catalog built with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Builds a catalog of names without tier or category.
    pub fn from_names<I, S>(names: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(|name| CatalogEntry::new(name, "")).collect())
    }

    /// Reads a JSON array of `{"name", "tier", "type"}` records.
    ///
    /// Unknown fields are ignored.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
        Self::new(entries)
    }

    /// Same as [`Catalog::from_json_reader`] for an in-memory string.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Loads a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loading catalog from {}", path.display());
        Self::from_json_reader(BufReader::new(file))
    }

    /// All entries, in input order
    pub fn entries(&self) -> &[Arc<CatalogEntry>] {
        &self.entries
    }

    /// Iterates over the entries in input order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CatalogEntry>> {
        self.entries.iter()
    }

    /// Iterates over the names in input order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Looks an entry up by exact (case-insensitive) name, for callers that
    /// already hold a name, e.g. one picked from earlier results
    pub fn get(&self, name: &str) -> Option<&Arc<CatalogEntry>> {
        let name = name.trim().to_lowercase();
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
