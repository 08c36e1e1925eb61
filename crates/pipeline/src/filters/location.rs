//! Filter to a named place.

use crate::traits::Filter;
use crate::types::SearchContext;
use anyhow::Result;
use catalog::Candidate;

/// Keeps candidates whose locality contains the requested token
/// (case-insensitive).
///
/// Skipped entirely when the context carries an anchor: proximity sort
/// replaces place filtering.
pub struct LocationFilter;

impl Filter for LocationFilter {
    fn name(&self) -> &str {
        "LocationFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &SearchContext) -> Result<Vec<Candidate>> {
        if context.anchor.is_some() {
            return Ok(candidates);
        }
        let Some(token) = context.location.as_deref() else {
            return Ok(candidates);
        };

        Ok(candidates
            .into_iter()
            .filter(|c| c.in_locality(token))
            .collect())
    }
}
