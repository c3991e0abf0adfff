//! The flag catalog: a fixed, validated collection of flag records.
//!
//! A catalog is built once from an injected source and never mutated
//! afterwards. Sources are a plain `Vec`, a JSON or TOML document, a file on
//! disk, or the builtin sample set.
//!
//! JSON catalogs are either a bare array of records or an object with a
//! `flags` array. TOML catalogs use an array of tables:
//!
//! ```toml
//! [[flags]]
//! id = 1
//! name = "dark_mode"
//! displayName = "Dark Mode"
//! description = "Night theme"
//! enabled = true
//! environment = "staging"
//! createdBy = "ana.lee"
//! createdAt = "2024-09-01"
//! lastModified = "2024-09-02"
//! type = "ui"
//! tags = ["theme"]
//! rolloutPercentage = 40
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::flag::{Environment, FlagRecord, FlagType};
use crate::sample::sample_flags;

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    flags: Vec<FlagRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Bare(Vec<FlagRecord>),
    Document(CatalogDocument),
}

/// Immutable, validated set of flag records in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagCatalog {
    flags: Vec<FlagRecord>,
}

impl FlagCatalog {
    /// Build a catalog, rejecting duplicate ids or names.
    pub fn new(flags: Vec<FlagRecord>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::with_capacity(flags.len());
        let mut names = HashSet::with_capacity(flags.len());
        for flag in &flags {
            if !ids.insert(flag.id) {
                return Err(CatalogError::DuplicateId(flag.id));
            }
            if !names.insert(flag.name.as_str()) {
                return Err(CatalogError::DuplicateName(flag.name.clone()));
            }
        }
        Ok(Self { flags })
    }

    /// The builtin media-pipeline sample catalog.
    pub fn sample() -> Self {
        Self {
            flags: sample_flags(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let flags = match serde_json::from_str::<JsonCatalog>(json)? {
            JsonCatalog::Bare(flags) => flags,
            JsonCatalog::Document(doc) => doc.flags,
        };
        Self::new(flags)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = toml::from_str(toml_str)?;
        Self::new(doc.flags)
    }

    /// Load a catalog file, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = match extension.as_deref() {
            Some("json") => Self::from_json(&contents)?,
            Some("toml") => Self::from_toml(&contents)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::info!("Loaded {} flags from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Serialize to the JSON document form accepted by [`Self::from_json`].
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.flags)
    }

    pub fn flags(&self) -> &[FlagRecord] {
        &self.flags
    }

    pub fn get(&self, id: u64) -> Option<&FlagRecord> {
        self.flags.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Distinct environments in first-seen order.
    pub fn environments(&self) -> Vec<Environment> {
        distinct(self.flags.iter().map(|f| &f.environment))
    }

    /// Distinct flag types in first-seen order.
    pub fn flag_types(&self) -> Vec<FlagType> {
        distinct(self.flags.iter().map(|f| &f.flag_type))
    }
}

fn distinct<'a, T>(values: impl Iterator<Item = &'a T>) -> Vec<T>
where
    T: Clone + Eq + std::hash::Hash + 'a,
{
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).cloned().collect()
}
