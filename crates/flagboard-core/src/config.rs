//! Configuration for flagboard
//!
//! Loaded from `<config dir>/flagboard/config.toml` unless a path is given.
//!
//! ```toml
//! catalog_path = "/srv/flags/catalog.json"
//!
//! [view]
//! default_sort = "rolloutPercentage"
//! default_order = "desc"
//! rollout_bar_width = 12
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::FlagCatalog;
use crate::error::{ConfigError, Result};
use crate::query::QueryState;
use crate::sort::{SortField, SortOrder, SortState};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Catalog file (`.json` or `.toml`); the builtin sample when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Listing presentation settings
    pub view: ViewConfig,
}

/// Listing presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub default_sort: SortField,
    pub default_order: SortOrder,
    /// Cells in a full rollout bar
    pub rollout_bar_width: u16,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_sort: SortField::Name,
            default_order: SortOrder::Asc,
            rollout_bar_width: 10,
        }
    }
}

impl BoardConfig {
    pub const MAX_BAR_WIDTH: u16 = 40;

    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/flagboard/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flagboard").join("config.toml"))
    }

    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_json(json_str: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Read a config file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_toml(&contents)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given (missing file is an error), otherwise the
    /// default location (missing file means defaults).
    pub fn resolve(explicit: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                tracing::debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            None => {
                tracing::warn!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let width = self.view.rollout_bar_width;
        if width == 0 || width > Self::MAX_BAR_WIDTH {
            return Err(ConfigError::OutOfRange(format!(
                "rollout_bar_width must be between 1 and {}, got {}",
                Self::MAX_BAR_WIDTH,
                width
            )));
        }
        Ok(())
    }

    /// Initial query: defaults with the configured sort.
    pub fn initial_query(&self) -> QueryState {
        QueryState::with_sort(SortState::new(
            self.view.default_sort,
            self.view.default_order,
        ))
    }

    /// The configured catalog, or the builtin sample.
    pub fn load_catalog(&self) -> Result<FlagCatalog> {
        match &self.catalog_path {
            Some(path) => Ok(FlagCatalog::load(path)?),
            None => Ok(FlagCatalog::sample()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_query(), QueryState::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = BoardConfig::from_toml(
            r#"
[view]
default_sort = "rolloutPercentage"
default_order = "desc"
"#,
        )
        .unwrap();
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.view.rollout_bar_width, 10);
        assert_eq!(
            config.initial_query().sort,
            SortState::new(SortField::Rollout, SortOrder::Desc)
        );
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = BoardConfig::default();
        config.view.default_sort = SortField::LastModified;
        let toml_str = config.to_toml().unwrap();
        assert_eq!(BoardConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_out_of_range_width() {
        let mut config = BoardConfig::default();
        config.view.rollout_bar_width = 0;
        assert!(config.validate().is_err());
        config.view.rollout_bar_width = 41;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_file_and_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("flags.json");
        std::fs::write(&catalog_path, FlagCatalog::sample().to_json().unwrap()).unwrap();

        let config_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "catalog_path = {:?}", catalog_path.to_str().unwrap()).unwrap();

        let config = BoardConfig::load(&config_path).unwrap();
        assert_eq!(config.load_catalog().unwrap(), FlagCatalog::sample());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            BoardConfig::resolve(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }
}
