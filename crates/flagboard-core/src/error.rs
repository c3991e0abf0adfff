//! Error types for flagboard-core

use std::path::PathBuf;

use thiserror::Error;

use crate::flag::RolloutError;

/// Result type alias for flagboard operations
pub type Result<T> = std::result::Result<T, FlagboardError>;

/// Main error type for flagboard operations
#[derive(Error, Debug)]
pub enum FlagboardError {
    /// Catalog loading or validation failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration loading or validation failed
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A filter expression could not be parsed
    #[error("Query error: {0}")]
    Query(#[from] QueryParseError),
}

/// Errors raised while building a [`crate::FlagCatalog`].
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("duplicate flag id {0}")]
    DuplicateId(u64),

    #[error("duplicate flag name '{0}'")]
    DuplicateName(String),

    #[error(transparent)]
    Rollout(#[from] RolloutError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported catalog format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// Errors raised while loading or validating [`crate::BoardConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

/// Errors raised by [`crate::parse_query`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryParseError {
    #[error("unknown sort field '{0}'")]
    UnknownSortField(String),

    #[error("unknown status '{0}' (expected enabled, disabled or all)")]
    UnknownStatus(String),

    #[error("empty value for '{0}:'")]
    EmptyValue(String),
}
