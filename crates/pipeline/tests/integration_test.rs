//! Integration tests for the pipeline.
//!
//! These tests run filters and ranking over realistic candidate sets: the
//! built-in catalog and the synthetic fallback data.

use catalog::{Catalog, Coordinate};
use pipeline::filters::*;
use pipeline::{BudgetRange, FilterPipeline, ScoringEngine, SearchContext, filter_and_rank};
use sources::synthesize;

const KATHMANDU: Coordinate = Coordinate {
    latitude: 27.7172,
    longitude: 85.3240,
};

#[test]
fn test_rank_and_partition_synthetic_candidates() {
    let candidates = synthesize(KATHMANDU);
    let engine = ScoringEngine::new();

    let ranked = engine.rank(KATHMANDU, &candidates);
    assert_eq!(ranked.len(), candidates.len());
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score, "ranking must be non-increasing");
    }

    let (top, rest) = engine.partition(&ranked);
    assert_eq!(top.len(), 3);
    assert_eq!(rest.len(), 7);
    assert_eq!(top[0], ranked[0]);
    assert_eq!(rest[0], ranked[3]);
}

#[test]
fn test_ranking_does_not_touch_source_list() {
    let candidates = Catalog::builtin().candidates().to_vec();
    let before = candidates.clone();

    let engine = ScoringEngine::new();
    let ranked = engine.rank(KATHMANDU, &candidates);
    let _ = engine.partition(&ranked);

    assert_eq!(candidates, before);
}

#[test]
fn test_budget_bands_over_catalog() {
    let catalog = Catalog::builtin();
    let bands = [
        BudgetRange::under(10_000),
        BudgetRange::between(10_000, 20_000),
        BudgetRange::above(20_000),
    ];

    for budget in bands {
        let context = SearchContext::new().with_budget(budget);
        let results = filter_and_rank(catalog.candidates().to_vec(), &context).unwrap();
        assert!(!results.is_empty(), "built-in catalog should cover {}", budget);
        for c in &results {
            assert!(budget.matches(c.price_per_night));
        }
    }

    let under = filter_and_rank(
        catalog.candidates().to_vec(),
        &SearchContext::new().with_budget(BudgetRange::under(10_000)),
    )
    .unwrap();
    assert!(under.iter().all(|c| c.price_per_night < 10_000));

    let all = filter_and_rank(
        catalog.candidates().to_vec(),
        &SearchContext::new().with_budget(BudgetRange::any()),
    )
    .unwrap();
    assert_eq!(all.len(), catalog.len());
}

#[test]
fn test_kathmandu_under_ten_thousand() {
    let catalog = Catalog::builtin();
    let context = SearchContext::new()
        .with_location("Kathmandu")
        .with_budget(BudgetRange::under(10_000));

    let results = filter_and_rank(catalog.candidates().to_vec(), &context).unwrap();
    let expected = catalog
        .in_locality("kathmandu")
        .iter()
        .filter(|c| c.price_per_night < 10_000)
        .count();

    assert_eq!(results.len(), expected);
    assert!(results.iter().all(|c| c.in_locality("kathmandu")));
    for pair in results.windows(2) {
        assert!(pair[0].rating >= pair[1].rating);
    }
}

#[test]
fn test_custom_pipeline_matches_default() {
    let catalog = Catalog::builtin();
    let context = SearchContext::new()
        .with_location("pokhara")
        .with_budget(BudgetRange::between(10_000, 20_000));

    let pipeline = FilterPipeline::new()
        .add_filter(LocationFilter)
        .add_filter(BudgetFilter);
    let filtered = pipeline.apply(catalog.candidates().to_vec(), &context).unwrap();

    let mut expected: Vec<_> = filtered.iter().map(|c| c.id).collect();
    let mut actual: Vec<_> = filter_and_rank(catalog.candidates().to_vec(), &context)
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
}
