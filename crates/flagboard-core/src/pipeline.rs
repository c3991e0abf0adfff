//! Derivation pipeline: catalog + query → ordered visible subset.

use crate::catalog::FlagCatalog;
use crate::flag::{Environment, FlagRecord, FlagType};
use crate::presentation::ResultSummary;
use crate::query::{CategoryFilter, QueryState, StatusFilter};
use crate::sort::{SortField, SortState};

/// Filter then stably sort the catalog. Pure; equal keys keep catalog order.
pub fn derive_visible<'a>(catalog: &'a FlagCatalog, query: &QueryState) -> Vec<&'a FlagRecord> {
    let mut visible: Vec<&FlagRecord> = catalog
        .flags()
        .iter()
        .filter(|flag| query.matches(flag))
        .collect();
    query.sort.sort(&mut visible);
    visible
}

/// A listing session: one catalog, one query, and the derived rows.
///
/// Every mutation goes through a setter that recomputes the visible set when
/// the query actually changed. Setting a value equal to the current one
/// keeps the previous result.
#[derive(Debug, Clone)]
pub struct FlagBoard {
    catalog: FlagCatalog,
    query: QueryState,
    /// Catalog indices of the visible rows, in display order.
    visible: Vec<usize>,
    recomputations: u64,
}

impl FlagBoard {
    pub fn new(catalog: FlagCatalog) -> Self {
        Self::with_query(catalog, QueryState::default())
    }

    pub fn with_query(catalog: FlagCatalog, query: QueryState) -> Self {
        let mut board = Self {
            catalog,
            query,
            visible: Vec::new(),
            recomputations: 0,
        };
        board.recompute();
        board
    }

    pub fn catalog(&self) -> &FlagCatalog {
        &self.catalog
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Visible records in display order.
    pub fn visible(&self) -> Vec<&FlagRecord> {
        let flags = self.catalog.flags();
        self.visible.iter().map(|&i| &flags[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Visible row at `index`, if any.
    pub fn row(&self, index: usize) -> Option<&FlagRecord> {
        self.visible
            .get(index)
            .and_then(|&i| self.catalog.flags().get(i))
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            visible: self.visible.len(),
            total: self.catalog.len(),
        }
    }

    /// How many times the visible set has been derived.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn set_query(&mut self, query: QueryState) {
        if query != self.query {
            self.query = query;
            self.recompute();
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.query.search_term {
            self.query.search_term = term;
            self.recompute();
        }
    }

    pub fn set_environment_filter(&mut self, filter: CategoryFilter<Environment>) {
        if filter != self.query.environment {
            self.query.environment = filter;
            self.recompute();
        }
    }

    pub fn set_type_filter(&mut self, filter: CategoryFilter<FlagType>) {
        if filter != self.query.flag_type {
            self.query.flag_type = filter;
            self.recompute();
        }
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        if filter != self.query.status {
            self.query.status = filter;
            self.recompute();
        }
    }

    pub fn set_sort(&mut self, sort: SortState) {
        if sort != self.query.sort {
            self.query.sort = sort;
            self.recompute();
        }
    }

    /// Column header click; see [`SortState::click`].
    pub fn click_header(&mut self, field: SortField) {
        self.query.sort.click(field);
        self.recompute();
    }

    pub fn cycle_environment_filter(&mut self) {
        let next = self.query.environment.cycle(&self.catalog.environments());
        self.set_environment_filter(next);
    }

    pub fn cycle_type_filter(&mut self) {
        let next = self.query.flag_type.cycle(&self.catalog.flag_types());
        self.set_type_filter(next);
    }

    pub fn cycle_status_filter(&mut self) {
        self.set_status_filter(self.query.status.cycle());
    }

    /// Clear search and filters, keeping the sort.
    pub fn reset_filters(&mut self) {
        let mut query = self.query.clone();
        query.clear_filters();
        self.set_query(query);
    }

    fn recompute(&mut self) {
        let flags = self.catalog.flags();
        let mut indices: Vec<usize> = (0..flags.len())
            .filter(|&i| self.query.matches(&flags[i]))
            .collect();
        indices.sort_by(|&a, &b| self.query.sort.compare(&flags[a], &flags[b]));
        self.visible = indices;
        self.recomputations += 1;

        tracing::debug!(
            query = %self.query,
            visible = self.visible.len(),
            total = flags.len(),
            "Recomputed visible flags"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortOrder;

    fn names(records: &[&FlagRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn default_board_sorts_by_name() {
        let board = FlagBoard::new(FlagCatalog::sample());
        assert_eq!(
            names(&board.visible()),
            vec![
                "adaptive_bitrate",
                "batch_processing",
                "gpu_acceleration",
                "h265_encoding",
                "realtime_preview",
                "video_compression_v2"
            ]
        );
    }

    #[test]
    fn board_matches_pure_derivation() {
        let catalog = FlagCatalog::sample();
        let mut board = FlagBoard::new(catalog.clone());
        board.set_search_term("video");
        board.click_header(SortField::Rollout);
        assert_eq!(
            names(&board.visible()),
            names(&derive_visible(&catalog, board.query()))
        );
    }

    #[test]
    fn identical_input_does_not_recompute() {
        let mut board = FlagBoard::new(FlagCatalog::sample());
        let before = board.recomputations();
        board.set_search_term("");
        board.set_status_filter(StatusFilter::All);
        board.set_sort(SortState::default());
        assert_eq!(board.recomputations(), before);

        board.set_status_filter(StatusFilter::Enabled);
        assert_eq!(board.recomputations(), before + 1);
    }

    #[test]
    fn cycling_environment_walks_catalog_options() {
        let mut board = FlagBoard::new(FlagCatalog::sample());
        board.cycle_environment_filter();
        assert_eq!(
            board.query().environment,
            CategoryFilter::Only(Environment::Production)
        );
        assert_eq!(board.visible_len(), 4);
        board.cycle_environment_filter();
        board.cycle_environment_filter();
        board.cycle_environment_filter();
        assert_eq!(board.query().environment, CategoryFilter::All);
        assert_eq!(board.visible_len(), 6);
    }

    #[test]
    fn reset_filters_keeps_sort() {
        let mut board = FlagBoard::new(FlagCatalog::sample());
        board.click_header(SortField::Rollout);
        board.click_header(SortField::Rollout);
        board.set_search_term("zzz");
        assert!(board.is_empty());

        board.reset_filters();
        assert_eq!(board.visible_len(), 6);
        assert_eq!(
            board.query().sort,
            SortState::new(SortField::Rollout, SortOrder::Desc)
        );
        assert_eq!(board.row(0).map(|r| r.id), Some(3));
    }

    #[test]
    fn summary_counts() {
        let mut board = FlagBoard::new(FlagCatalog::sample());
        board.set_status_filter(StatusFilter::Disabled);
        let summary = board.summary();
        assert_eq!((summary.visible, summary.total), (2, 6));
    }
}
