//! Filtering, scoring and ranking of lodging candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - ScoringEngine for desirability ranking around an anchor
//! - `filter_and_rank` for preference-driven search
//!
//! ## Architecture
//! Two ways through the crate:
//! 1. Map view: `ScoringEngine::rank` scores everything around the anchor,
//!    `partition` splits the result into top picks and more places
//! 2. Conversation: `filter_and_rank` narrows by place and budget, then
//!    sorts by distance (anchor known) or rating
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{BudgetRange, ScoringEngine, SearchContext, filter_and_rank};
//!
//! let engine = ScoringEngine::new();
//! let ranked = engine.rank(anchor, &candidates);
//! let (top, rest) = engine.partition(&ranked);
//!
//! let context = SearchContext::new()
//!     .with_location("pokhara")
//!     .with_budget(BudgetRange::under(10_000));
//! let matches = filter_and_rank(candidates, &context)?;
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod scoring;
pub mod search;
pub mod traits;
pub mod types;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use scoring::{MORE_PLACES, ScoredCandidate, ScoringEngine, TOP_PICKS, desirability_score};
pub use search::{default_filters, filter_and_rank};
pub use traits::Filter;
pub use types::{BudgetRange, HIGH_PRICE_THRESHOLD, LOW_PRICE_THRESHOLD, SearchContext};
