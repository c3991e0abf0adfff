//! Query state and the four-clause filter predicate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueryParseError;
use crate::flag::{Environment, FlagRecord, FlagType};
use crate::sort::{SortField, SortOrder, SortState};

/// A categorical filter: everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter<T> {
    All,
    Only(T),
}

impl<T> Default for CategoryFilter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> CategoryFilter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T: Clone + PartialEq> CategoryFilter<T> {
    /// Advance through `All` followed by `options`, wrapping back to `All`.
    ///
    /// A selected value missing from `options` also resets to `All`.
    pub fn cycle(&self, options: &[T]) -> Self {
        let next = match self {
            Self::All => options.first(),
            Self::Only(current) => options
                .iter()
                .position(|o| o == current)
                .and_then(|i| options.get(i + 1)),
        };
        next.map_or(Self::All, |v| Self::Only(v.clone()))
    }
}

/// Enabled-state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl StatusFilter {
    pub fn matches(&self, enabled: bool) -> bool {
        match self {
            Self::All => true,
            Self::Enabled => enabled,
            Self::Disabled => !enabled,
        }
    }

    /// All → Enabled → Disabled → All.
    pub fn cycle(self) -> Self {
        match self {
            Self::All => Self::Enabled,
            Self::Enabled => Self::Disabled,
            Self::Disabled => Self::All,
        }
    }

    pub fn parse(input: &str) -> Result<Self, QueryParseError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "all" | "*" => Ok(Self::All),
            "enabled" | "on" => Ok(Self::Enabled),
            "disabled" | "off" => Ok(Self::Disabled),
            other => Err(QueryParseError::UnknownStatus(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Status",
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
        }
    }
}

/// Outcome of each filter clause for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseResults {
    pub search: bool,
    pub environment: bool,
    pub flag_type: bool,
    pub status: bool,
}

impl ClauseResults {
    pub fn all(&self) -> bool {
        self.search && self.environment && self.flag_type && self.status
    }
}

/// User-adjustable listing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QueryState {
    pub search_term: String,
    pub sort: SortState,
    pub environment: CategoryFilter<Environment>,
    pub flag_type: CategoryFilter<FlagType>,
    pub status: StatusFilter,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default query with a different initial sort.
    pub fn with_sort(sort: SortState) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Case-insensitive substring match over name, display name,
    /// description, and tags. An empty term matches everything.
    pub fn matches_search(&self, record: &FlagRecord) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        let tags = record.tags.iter().map(String::as_str);
        record
            .searchable_text()
            .into_iter()
            .chain(tags)
            .any(|text| text.to_lowercase().contains(&needle))
    }

    pub fn evaluate(&self, record: &FlagRecord) -> ClauseResults {
        ClauseResults {
            search: self.matches_search(record),
            environment: self.environment.matches(&record.environment),
            flag_type: self.flag_type.matches(&record.flag_type),
            status: self.status.matches(record.enabled),
        }
    }

    /// Whether a record passes all four clauses.
    pub fn matches(&self, record: &FlagRecord) -> bool {
        self.evaluate(record).all()
    }

    /// True when no filter narrows the result.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty()
            && self.environment == CategoryFilter::All
            && self.flag_type == CategoryFilter::All
            && self.status == StatusFilter::All
    }

    /// Clear search and filters, keeping the current sort.
    pub fn clear_filters(&mut self) {
        *self = Self::with_sort(self.sort);
    }
}

impl fmt::Display for QueryState {
    /// Renders in the grammar accepted by [`parse_query`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let CategoryFilter::Only(env) = &self.environment {
            parts.push(format!("env:{env}"));
        }
        if let CategoryFilter::Only(t) = &self.flag_type {
            parts.push(format!("type:{t}"));
        }
        match self.status {
            StatusFilter::All => {}
            StatusFilter::Enabled => parts.push("status:enabled".to_string()),
            StatusFilter::Disabled => parts.push("status:disabled".to_string()),
        }
        let dash = match self.sort.order {
            SortOrder::Asc => "",
            SortOrder::Desc => "-",
        };
        parts.push(format!("sort:{dash}{}", self.sort.field));
        if !self.search_term.is_empty() {
            parts.push(self.search_term.clone());
        }
        f.write_str(&parts.join(" "))
    }
}

/// Parse a compact filter expression into a query.
///
/// Tokens are whitespace separated:
/// - `env:<value>` / `env:all`
/// - `type:<value>` / `type:all`
/// - `status:enabled|disabled|all` (also `on`/`off`)
/// - `sort:<field>` ascending, `sort:-<field>` descending
///
/// Every other token is a search word; the words are joined with single
/// spaces to form the search term.
///
/// # Examples
/// ```
/// use flagboard_core::{parse_query, StatusFilter};
/// let q = parse_query("env:staging status:off bitrate").unwrap();
/// assert_eq!(q.status, StatusFilter::Disabled);
/// assert_eq!(q.search_term, "bitrate");
/// assert!(parse_query("sort:color").is_err());
/// ```
pub fn parse_query(input: &str) -> Result<QueryState, QueryParseError> {
    let mut query = QueryState::new();
    let mut words = Vec::new();

    for token in input.split_whitespace() {
        let Some((key, value)) = token.split_once(':') else {
            words.push(token);
            continue;
        };

        match key.to_ascii_lowercase().as_str() {
            "env" | "environment" => {
                query.environment = category(key, value, |v| Environment::from(v))?;
            }
            "type" => {
                query.flag_type = category(key, value, |v| FlagType::from(v))?;
            }
            "status" => {
                query.status = StatusFilter::parse(value)?;
            }
            "sort" => {
                let (order, field) = match value.strip_prefix('-') {
                    Some(rest) => (SortOrder::Desc, rest),
                    None => (SortOrder::Asc, value),
                };
                query.sort = SortState::new(SortField::parse(field)?, order);
            }
            // Not a recognised key; treat as a search word
            _ => words.push(token),
        }
    }

    query.search_term = words.join(" ");
    Ok(query)
}

fn category<T>(
    key: &str,
    value: &str,
    make: impl FnOnce(&str) -> T,
) -> Result<CategoryFilter<T>, QueryParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(QueryParseError::EmptyValue(key.to_string()));
    }
    if value.eq_ignore_ascii_case("all") || value == "*" {
        return Ok(CategoryFilter::All);
    }
    Ok(CategoryFilter::Only(make(value)))
}
