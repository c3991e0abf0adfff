//! Sort keys, direction, and the header-click toggle.
//!
//! [`SortField`] is the dispatch table from a column to a typed comparison.
//! Sorting is stable, so records with equal keys keep catalog order in both
//! directions.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueryParseError;
use crate::flag::FlagRecord;

/// A field the listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    #[default]
    Name,
    DisplayName,
    /// Enabled sorts after disabled when ascending.
    Enabled,
    Environment,
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "rolloutPercentage")]
    Rollout,
    LastModified,
    CreatedAt,
    CreatedBy,
}

impl SortField {
    /// Fields bound to clickable column headers, left to right.
    pub const COLUMNS: [SortField; 6] = [
        SortField::Name,
        SortField::Enabled,
        SortField::Environment,
        SortField::Type,
        SortField::Rollout,
        SortField::LastModified,
    ];

    /// Compare two records by this field in ascending order.
    pub fn compare(&self, a: &FlagRecord, b: &FlagRecord) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => cmp_text(&a.name, &b.name),
            Self::DisplayName => cmp_text(&a.display_name, &b.display_name),
            Self::Enabled => u8::from(a.enabled).cmp(&u8::from(b.enabled)),
            Self::Environment => cmp_text(a.environment.as_str(), b.environment.as_str()),
            Self::Type => cmp_text(a.flag_type.as_str(), b.flag_type.as_str()),
            Self::Rollout => a.rollout.cmp(&b.rollout),
            Self::LastModified => a.last_modified.cmp(&b.last_modified),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::CreatedBy => cmp_text(&a.created_by, &b.created_by),
        }
    }

    /// Machine key, matching the catalog's field names.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::Enabled => "enabled",
            Self::Environment => "environment",
            Self::Type => "type",
            Self::Rollout => "rolloutPercentage",
            Self::LastModified => "lastModified",
            Self::CreatedAt => "createdAt",
            Self::CreatedBy => "createdBy",
        }
    }

    /// Column header label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Flag Name",
            Self::DisplayName => "Display Name",
            Self::Enabled => "Status",
            Self::Environment => "Environment",
            Self::Type => "Type",
            Self::Rollout => "Rollout",
            Self::LastModified => "Last Modified",
            Self::CreatedAt => "Created",
            Self::CreatedBy => "Created By",
        }
    }

    /// Parse a field name or one of its short aliases (case insensitive).
    pub fn parse(input: &str) -> Result<Self, QueryParseError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "display" | "displayname" | "display_name" => Ok(Self::DisplayName),
            "status" | "enabled" => Ok(Self::Enabled),
            "env" | "environment" => Ok(Self::Environment),
            "type" => Ok(Self::Type),
            "rollout" | "rolloutpercentage" => Ok(Self::Rollout),
            "modified" | "lastmodified" | "last_modified" => Ok(Self::LastModified),
            "created" | "createdat" | "created_at" => Ok(Self::CreatedAt),
            "author" | "createdby" | "created_by" => Ok(Self::CreatedBy),
            other => Err(QueryParseError::UnknownSortField(other.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Header arrow for the active column.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Header click: re-clicking the active column flips direction, any other
    /// column becomes active in ascending order.
    pub fn click(&mut self, field: SortField) {
        if self.field == field {
            self.order = self.order.toggled();
        } else {
            self.field = field;
            self.order = SortOrder::Asc;
        }
    }

    /// Directed comparison used by the pipeline.
    pub fn compare(&self, a: &FlagRecord, b: &FlagRecord) -> Ordering {
        self.order.apply(self.field.compare(a, b))
    }

    /// Stable in-place sort.
    pub fn sort(&self, records: &mut [&FlagRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }

    /// Arrow to show next to `field`'s header, if it is the active column.
    pub fn indicator(&self, field: SortField) -> Option<&'static str> {
        (self.field == field).then(|| self.order.arrow())
    }
}
