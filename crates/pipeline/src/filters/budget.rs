//! Filter by nightly price.

use crate::traits::Filter;
use crate::types::SearchContext;
use anyhow::Result;
use catalog::Candidate;

/// Removes candidates outside the context's budget.
///
/// No budget, or an `any` budget, is a no-op.
pub struct BudgetFilter;

impl Filter for BudgetFilter {
    fn name(&self) -> &str {
        "BudgetFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &SearchContext) -> Result<Vec<Candidate>> {
        let Some(budget) = context.budget.filter(|b| !b.is_unbounded()) else {
            return Ok(candidates);
        };

        Ok(candidates
            .into_iter()
            .filter(|c| budget.matches(c.price_per_night))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BudgetRange;
    use catalog::Coordinate;

    fn priced(id: u64, price: u32) -> Candidate {
        Candidate {
            id,
            name: format!("Lodging {}", id),
            locality: String::new(),
            coordinate: Coordinate::new(27.7, 85.3),
            rating: 4.0,
            review_count: 10,
            price_per_night: price,
            amenities: Default::default(),
            thumbnail: String::new(),
        }
    }

    fn candidates() -> Vec<Candidate> {
        vec![priced(1, 5_000), priced(2, 10_000), priced(3, 15_000), priced(4, 20_000), priced(5, 30_000)]
    }

    fn ids(budget: BudgetRange) -> Vec<u64> {
        let context = SearchContext::new().with_budget(budget);
        BudgetFilter
            .apply(candidates(), &context)
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn test_budget_bands() {
        assert_eq!(ids(BudgetRange::under(10_000)), vec![1]);
        assert_eq!(ids(BudgetRange::between(10_000, 20_000)), vec![2, 3, 4]);
        assert_eq!(ids(BudgetRange::above(20_000)), vec![5]);
        assert_eq!(ids(BudgetRange::any()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_no_budget_is_noop() {
        let filtered = BudgetFilter.apply(candidates(), &SearchContext::new()).unwrap();
        assert_eq!(filtered.len(), 5);
    }
}
