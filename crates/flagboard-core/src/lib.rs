//! flagboard-core: feature flag catalog, query, and listing model.
//!
//! - **Flag**: flag records with typed environment, type, and rollout
//! - **Catalog**: immutable, validated flag store loaded from JSON/TOML or the builtin sample
//! - **Query**: search term, categorical filters, and a compact filter grammar
//! - **Sort**: field dispatch table, direction, and header-click toggle
//! - **Pipeline**: pure derivation of the visible, ordered subset and the `FlagBoard` session
//! - **Presentation**: badges, rollout bars, row views, empty state
//! - **Config**: view defaults and catalog location
//!
//! # Pipeline
//!
//! ```text
//! FlagCatalog ─┐
//!              ├─ filter (search ∧ env ∧ type ∧ status) ─ stable sort ─ Listing
//! QueryState ──┘
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod flag;
pub mod pipeline;
pub mod presentation;
pub mod query;
pub mod sample;
pub mod sort;

pub use catalog::FlagCatalog;
pub use config::{BoardConfig, ViewConfig};
pub use error::{CatalogError, ConfigError, FlagboardError, QueryParseError, Result};
pub use flag::{Environment, FlagRecord, FlagType, Rollout, RolloutError};
pub use pipeline::{derive_visible, FlagBoard};
pub use presentation::{
    capitalize, environment_badge, status_badge, type_badge, ActionOutcome, Badge, BadgeTone,
    EmptyState, Listing, ResultSummary, RolloutBar, RowAction, RowView,
};
pub use query::{parse_query, CategoryFilter, ClauseResults, QueryState, StatusFilter};
pub use sort::{SortField, SortOrder, SortState};
