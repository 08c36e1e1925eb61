//! Filter-then-sort search used by the conversation.
//!
//! ## Algorithm
//! 1. Location filter (skipped when an anchor is set)
//! 2. Budget filter
//! 3. Sort: ascending distance from the anchor if there is one, otherwise
//!    descending rating. Both sorts are stable.
//!
//! An empty result is returned as-is; deciding what to show instead is the
//! caller's business.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{BudgetFilter, LocationFilter};
use crate::types::SearchContext;
use anyhow::Result;
use catalog::{Candidate, distance_km};
use tracing::{debug, instrument};

/// The standard pipeline: location, then budget.
pub fn default_filters() -> FilterPipeline {
    FilterPipeline::new()
        .add_filter(LocationFilter)
        .add_filter(BudgetFilter)
}

#[instrument(skip(candidates, context), fields(count = candidates.len()))]
pub fn filter_and_rank(candidates: Vec<Candidate>, context: &SearchContext) -> Result<Vec<Candidate>> {
    let mut results = default_filters().apply(candidates, context)?;

    match context.anchor {
        Some(anchor) => {
            results.sort_by(|a, b| {
                distance_km(anchor, a.coordinate).total_cmp(&distance_km(anchor, b.coordinate))
            });
        }
        None => {
            results.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }
    }

    debug!("{} candidates after filter and sort", results.len());
    Ok(results)
}
