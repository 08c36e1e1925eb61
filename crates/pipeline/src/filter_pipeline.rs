//! Ordered composition of `Filter`s.

use crate::traits::Filter;
use crate::types::SearchContext;
use anyhow::{Context, Result};
use catalog::Candidate;
use tracing::debug;

/// Runs its filters in insertion order, each on the previous one's output.
///
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(LocationFilter)
///     .add_filter(BudgetFilter);
/// let matches = pipeline.apply(candidates, &context)?;
/// ```
#[derive(Default)]
pub struct FilterPipeline {
    stages: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.stages.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|f| f.name()).collect()
    }

    /// Stops at the first failing stage; the error names it.
    pub fn apply(&self, candidates: Vec<Candidate>, context: &SearchContext) -> Result<Vec<Candidate>> {
        self.stages.iter().try_fold(candidates, |remaining, stage| {
            let before = remaining.len();
            let kept = stage
                .apply(remaining, context)
                .with_context(|| format!("{} failed", stage.name()))?;
            debug!(filter = stage.name(), before, after = kept.len(), "Filter applied");
            Ok::<_, anyhow::Error>(kept)
        })
    }
}
