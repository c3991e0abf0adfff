//! Core flag record types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deployment stage a flag is scoped to.
///
/// The known stages get their own variants; anything else is kept verbatim so
/// catalogs with custom stages still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Environment {
    Production,
    Staging,
    Development,
    Other(String),
}

impl Environment {
    /// Machine value as stored in catalogs.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Environment> for String {
    fn from(value: Environment) -> Self {
        match value {
            Environment::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical tag describing what kind of change a flag gates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlagType {
    Release,
    Experiment,
    Feature,
    Performance,
    Ui,
    Other(String),
}

impl FlagType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Release => "release",
            Self::Experiment => "experiment",
            Self::Feature => "feature",
            Self::Performance => "performance",
            Self::Ui => "ui",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for FlagType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "release" => Self::Release,
            "experiment" => Self::Experiment,
            "feature" => Self::Feature,
            "performance" => Self::Performance,
            "ui" => Self::Ui,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for FlagType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<FlagType> for String {
    fn from(value: FlagType) -> Self {
        match value {
            FlagType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rollout value outside `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rollout percentage must be within 0..=100, got {0}")]
pub struct RolloutError(pub u32);

/// Share of the target population receiving the enabled behavior, in percent.
///
/// Independent of [`FlagRecord::enabled`]: a disabled flag may still carry a
/// non-zero rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Rollout(u8);

impl Rollout {
    pub const MAX: u8 = 100;

    pub fn new(percent: u32) -> Result<Self, RolloutError> {
        if percent > u32::from(Self::MAX) {
            return Err(RolloutError(percent));
        }
        Ok(Self(percent as u8))
    }

    /// Build from a percentage, saturating at 100.
    pub fn clamped(percent: u8) -> Self {
        Self(percent.min(Self::MAX))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Fraction of the population (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<u32> for Rollout {
    type Error = RolloutError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rollout> for u32 {
    fn from(value: Rollout) -> Self {
        u32::from(value.0)
    }
}

impl fmt::Display for Rollout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A single feature flag as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagRecord {
    pub id: u64,
    /// Machine key, lowercase with underscores.
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub enabled: bool,
    pub environment: Environment,
    pub created_by: String,
    pub created_at: NaiveDate,
    pub last_modified: NaiveDate,
    #[serde(rename = "type")]
    pub flag_type: FlagType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "rolloutPercentage")]
    pub rollout: Rollout,
}

impl FlagRecord {
    /// Text fields searched by the free-text filter, tags excluded.
    pub fn searchable_text(&self) -> [&str; 3] {
        [&self.name, &self.display_name, &self.description]
    }
}
