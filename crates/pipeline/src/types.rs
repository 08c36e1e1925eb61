//! Search preferences passed through the filter pipeline.

use catalog::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nightly price below which a stay counts as budget.
pub const LOW_PRICE_THRESHOLD: u32 = 10_000;

/// Nightly price above which a stay counts as premium.
pub const HIGH_PRICE_THRESHOLD: u32 = 20_000;

/// A traveler's budget.
///
/// Bounds are exclusive when only one is set and inclusive when both are:
/// "under 10 000" means `price < 10000`, "10 000 to 20 000" means
/// `10000 <= price <= 20000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
    #[serde(default)]
    pub any: bool,
}

impl BudgetRange {
    pub fn under(max: u32) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn between(min: u32, max: u32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            any: false,
        }
    }

    pub fn above(min: u32) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    pub fn any() -> Self {
        Self {
            any: true,
            ..Self::default()
        }
    }

    /// Whether the range places no restriction on price.
    pub fn is_unbounded(&self) -> bool {
        self.any || (self.min.is_none() && self.max.is_none())
    }

    pub fn matches(&self, price: u32) -> bool {
        if self.any {
            return true;
        }
        match (self.min, self.max) {
            (None, None) => true,
            (None, Some(max)) => price < max,
            (Some(min), None) => price > min,
            (Some(min), Some(max)) => (min..=max).contains(&price),
        }
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            return write!(f, "any budget");
        }
        match (self.min, self.max) {
            (None, Some(max)) => write!(f, "under Rs. {}", max),
            (Some(min), None) => write!(f, "above Rs. {}", min),
            (Some(min), Some(max)) => write!(f, "Rs. {} - {}", min, max),
            (None, None) => write!(f, "any budget"),
        }
    }
}

/// Everything a filter may look at besides the candidates themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchContext {
    /// Locality token; `None` means every place
    pub location: Option<String>,
    pub budget: Option<BudgetRange>,
    /// When set, results are sorted by proximity and the location filter
    /// is skipped
    pub anchor: Option<Coordinate>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_budget(mut self, budget: BudgetRange) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_anchor(mut self, anchor: Coordinate) -> Self {
        self.anchor = Some(anchor);
        self
    }
}
