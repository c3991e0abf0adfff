//! Derivation pipeline integration tests
//!
//! Run against the builtin sample catalog and a catalog with sort ties.

use std::cmp::Ordering;

use flagboard_core::{
    derive_visible, parse_query, CategoryFilter, Environment, FlagBoard, FlagCatalog, FlagRecord,
    FlagType, Listing, QueryState, SortField, SortOrder, SortState, StatusFilter,
};
use rstest::rstest;

fn sample() -> FlagCatalog {
    FlagCatalog::sample()
}

fn names(records: &[&FlagRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

fn query(expr: &str) -> QueryState {
    parse_query(expr).unwrap()
}

// === Worked examples ===

#[rstest]
#[case("h265")]
#[case("h265 sort:-rollout")]
#[case("h265 env:production status:enabled")]
#[case("H265 sort:type")]
fn test_search_h265_finds_only_hevc(#[case] expr: &str) {
    let catalog = sample();
    let visible = derive_visible(&catalog, &query(expr));
    assert_eq!(names(&visible), vec!["h265_encoding"]);
}

#[test]
fn test_disabled_filter() {
    let catalog = sample();
    let q = QueryState {
        status: StatusFilter::Disabled,
        ..QueryState::default()
    };
    let visible = derive_visible(&catalog, &q);
    assert_eq!(names(&visible), vec!["adaptive_bitrate", "realtime_preview"]);
    assert!(visible.iter().all(|r| !r.enabled));
}

#[test]
fn test_rollout_descending() {
    let catalog = sample();
    let q = QueryState::with_sort(SortState::new(SortField::Rollout, SortOrder::Desc));
    let rollouts: Vec<u8> = derive_visible(&catalog, &q)
        .iter()
        .map(|r| r.rollout.percent())
        .collect();
    assert_eq!(rollouts, vec![100, 85, 75, 60, 25, 10]);
}

#[test]
fn test_nonexistent_search_is_empty_state() {
    let catalog = sample();
    let visible = derive_visible(&catalog, &query("zzz-nonexistent"));
    assert!(visible.is_empty());
    assert!(matches!(Listing::build(&visible, 10), Listing::Empty(_)));
}

#[test]
fn test_environment_and_type_conjunction() {
    let catalog = sample();
    let q = QueryState {
        environment: CategoryFilter::Only(Environment::Staging),
        flag_type: CategoryFilter::Only(FlagType::Experiment),
        ..QueryState::default()
    };
    let visible = derive_visible(&catalog, &q);
    assert_eq!(names(&visible), vec!["adaptive_bitrate"]);
    for record in &visible {
        assert_eq!(record.environment, Environment::Staging);
        assert_eq!(record.flag_type, FlagType::Experiment);
    }
}

// === Properties over a spread of queries ===

#[rstest]
#[case("")]
#[case("video")]
#[case("performance")]
#[case("env:production")]
#[case("type:feature sort:-modified")]
#[case("status:enabled sort:status")]
#[case("env:development status:enabled")]
#[case("sort:-created")]
#[case("sort:author")]
#[case("processing sort:-env")]
fn test_subset_and_clause_explanation(#[case] expr: &str) {
    let catalog = sample();
    let q = query(expr);
    let visible = derive_visible(&catalog, &q);
    let visible_ids: Vec<u64> = visible.iter().map(|r| r.id).collect();

    for record in catalog.flags() {
        let clauses = q.evaluate(record);
        if visible_ids.contains(&record.id) {
            assert!(clauses.all(), "{} visible but fails a clause", record.name);
        } else {
            assert!(!clauses.all(), "{} hidden but passes every clause", record.name);
        }
    }
    for record in &visible {
        assert!(catalog.get(record.id).is_some());
    }
}

#[rstest]
#[case("")]
#[case("video sort:-rollout")]
#[case("status:disabled sort:type")]
fn test_derivation_is_deterministic(#[case] expr: &str) {
    let catalog = sample();
    let q = query(expr);
    assert_eq!(
        names(&derive_visible(&catalog, &q)),
        names(&derive_visible(&catalog, &q))
    );
}

#[rstest]
fn test_adjacent_rows_respect_order(
    #[values(
        SortField::Name,
        SortField::Enabled,
        SortField::Environment,
        SortField::Type,
        SortField::Rollout,
        SortField::LastModified,
        SortField::CreatedAt,
        SortField::CreatedBy,
        SortField::DisplayName,
        SortField::Id
    )]
    field: SortField,
    #[values(SortOrder::Asc, SortOrder::Desc)] order: SortOrder,
) {
    let catalog = sample();
    let q = QueryState::with_sort(SortState::new(field, order));
    let visible = derive_visible(&catalog, &q);
    for pair in visible.windows(2) {
        let ord = field.compare(pair[0], pair[1]);
        match order {
            SortOrder::Asc => assert_ne!(ord, Ordering::Greater),
            SortOrder::Desc => assert_ne!(ord, Ordering::Less),
        }
    }
}

// === Header toggle through the board ===

#[test]
fn test_header_toggle_inverts_without_changing_field() {
    let mut board = FlagBoard::new(sample());
    board.click_header(SortField::LastModified);
    let ascending = names(&board.visible());
    assert_eq!(board.query().sort.order, SortOrder::Asc);

    board.click_header(SortField::LastModified);
    assert_eq!(board.query().sort.field, SortField::LastModified);
    assert_eq!(board.query().sort.order, SortOrder::Desc);
    let mut descending = names(&board.visible());
    descending.reverse();
    assert_eq!(ascending, descending);

    board.click_header(SortField::Type);
    assert_eq!(
        board.query().sort,
        SortState::new(SortField::Type, SortOrder::Asc)
    );
}

// === Tie-break ===

fn tied_catalog() -> FlagCatalog {
    let mut flags = sample().flags().to_vec();
    for flag in &mut flags {
        flag.environment = Environment::Staging;
    }
    FlagCatalog::new(flags).unwrap()
}

#[rstest]
#[case(SortOrder::Asc)]
#[case(SortOrder::Desc)]
fn test_equal_keys_keep_catalog_order(#[case] order: SortOrder) {
    let catalog = tied_catalog();
    let q = QueryState::with_sort(SortState::new(SortField::Environment, order));
    let ids: Vec<u64> = derive_visible(&catalog, &q).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_enabled_sort_ties_keep_catalog_order() {
    let catalog = sample();
    let q = QueryState::with_sort(SortState::new(SortField::Enabled, SortOrder::Desc));
    let ids: Vec<u64> = derive_visible(&catalog, &q).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3, 4, 6, 2, 5]);
}

// === Catalog loading ===

#[test]
fn test_load_catalog_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flags.toml");
    std::fs::write(
        &path,
        r#"
[[flags]]
id = 10
name = "canary_router"
displayName = "Canary Router"
description = "Route a slice of traffic to canary hosts"
enabled = true
environment = "canary"
createdBy = "ops.bot"
createdAt = "2024-10-01"
lastModified = "2024-10-03"
type = "release"
tags = ["routing"]
rolloutPercentage = 5
"#,
    )
    .unwrap();

    let catalog = FlagCatalog::load(&path).unwrap();
    assert_eq!(catalog.environments(), vec![Environment::Other("canary".into())]);

    let visible = derive_visible(&catalog, &query("env:canary ROUTING"));
    assert_eq!(names(&visible), vec!["canary_router"]);
}

#[test]
fn test_load_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flags.yaml");
    std::fs::write(&path, "[]").unwrap();
    assert!(FlagCatalog::load(&path).is_err());
}
