//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod budget;
pub mod location;

// Re-export for convenience
pub use budget::BudgetFilter;
pub use location::LocationFilter;
