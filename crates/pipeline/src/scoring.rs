//! Desirability scoring and ranking.
//!
//! ## Algorithm
//! For each candidate:
//! 1. Great-circle distance from the anchor
//! 2. `score = rating * 2 + ln(max(reviews, 1)) * 0.5 - distance_km * 0.5`
//!
//! Then sort by score, highest first. The sort is stable, so candidates
//! with equal scores keep their input order.

use catalog::{Candidate, Coordinate, distance_km};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Size of the "top picks" group
pub const TOP_PICKS: usize = 3;

/// Size of the "more places" group that follows the top picks
pub const MORE_PLACES: usize = 12;

const RATING_WEIGHT: f64 = 2.0;
const REVIEW_WEIGHT: f64 = 0.5;
const DISTANCE_PENALTY: f64 = 0.5;

/// A candidate with its distance from the anchor and its score.
///
/// Only meaningful for the anchor it was computed against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub distance_km: f64,
    pub score: f64,
}

/// Composite desirability of a lodging.
pub fn desirability_score(rating: f64, review_count: u32, distance_km: f64) -> f64 {
    let reviews = f64::from(review_count.max(1));
    rating * RATING_WEIGHT + reviews.ln() * REVIEW_WEIGHT - distance_km * DISTANCE_PENALTY
}

/// Ranks candidates around an anchor and splits the ranking into the two
/// display groups.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    top_picks: usize,
    more_places: usize,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            top_picks: TOP_PICKS,
            more_places: MORE_PLACES,
        }
    }

    /// Configure the number of top picks (default: 3)
    pub fn with_top_picks(mut self, n: usize) -> Self {
        self.top_picks = n;
        self
    }

    /// Configure the number of further places shown (default: 12)
    pub fn with_more_places(mut self, n: usize) -> Self {
        self.more_places = n;
        self
    }

    /// Score every candidate against `anchor`, best first.
    pub fn rank(&self, anchor: Coordinate, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
        // par_iter + collect keeps input order, which the stable sort relies on
        let mut ranked: Vec<ScoredCandidate> = candidates
            .par_iter()
            .map(|candidate| {
                let distance = distance_km(anchor, candidate.coordinate);
                ScoredCandidate {
                    score: desirability_score(candidate.rating, candidate.review_count, distance),
                    distance_km: distance,
                    candidate: candidate.clone(),
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!("Ranked {} candidates around {}", ranked.len(), anchor);
        ranked
    }

    /// Split a ranking into top picks and more places.
    ///
    /// Anything past both groups is left out of the view; the ranking
    /// itself is untouched.
    pub fn partition<'a>(
        &self,
        ranked: &'a [ScoredCandidate],
    ) -> (&'a [ScoredCandidate], &'a [ScoredCandidate]) {
        let top_end = self.top_picks.min(ranked.len());
        let rest_end = (top_end + self.more_places).min(ranked.len());
        (&ranked[..top_end], &ranked[top_end..rest_end])
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ANCHOR: Coordinate = Coordinate {
        latitude: 27.7172,
        longitude: 85.3240,
    };

    fn lodging(id: u64, rating: f64, reviews: u32, lat_offset: f64) -> Candidate {
        Candidate {
            id,
            name: format!("Lodging {}", id),
            locality: String::new(),
            coordinate: Coordinate::new(ANCHOR.latitude + lat_offset, ANCHOR.longitude),
            rating,
            review_count: reviews,
            price_per_night: 5000,
            amenities: Default::default(),
            thumbnail: String::new(),
        }
    }

    #[test]
    fn test_score_formula() {
        assert_relative_eq!(
            desirability_score(4.5, 100, 2.0),
            9.0 + 100f64.ln() * 0.5 - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_reviews_treated_as_one() {
        assert_relative_eq!(desirability_score(4.0, 0, 0.0), 8.0, epsilon = 1e-12);
        assert_eq!(desirability_score(4.0, 0, 0.0), desirability_score(4.0, 1, 0.0));
    }

    #[test]
    fn test_rank_sorted_by_score() {
        let candidates = vec![
            lodging(1, 3.5, 60, 0.02),
            lodging(2, 4.9, 500, 0.001),
            lodging(3, 4.0, 200, 0.0),
            lodging(4, 4.9, 500, 0.05),
        ];

        let ranked = ScoringEngine::new().rank(ANCHOR, &candidates);
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].candidate.id, 2);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let candidates: Vec<_> = (1..=6).map(|id| lodging(id, 4.0, 100, 0.0)).collect();
        let ranked = ScoringEngine::new().rank(ANCHOR, &candidates);

        let ids: Vec<_> = ranked.iter().map(|s| s.candidate.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_distance_reported() {
        let ranked = ScoringEngine::new().rank(ANCHOR, &[lodging(1, 4.0, 100, 0.0)]);
        assert_eq!(ranked[0].distance_km, 0.0);
    }

    #[test]
    fn test_partition_sizes() {
        let engine = ScoringEngine::new();
        let candidates: Vec<_> = (0..20)
            .map(|id| lodging(id, 4.0, 100, id as f64 * 0.001))
            .collect();
        let ranked = engine.rank(ANCHOR, &candidates);

        let (top, rest) = engine.partition(&ranked);
        assert_eq!(top.len(), 3);
        assert_eq!(rest.len(), 12);

        let shown: Vec<_> = top.iter().chain(rest).cloned().collect();
        assert_eq!(shown.as_slice(), &ranked[..15]);
    }

    #[test]
    fn test_partition_short_lists() {
        let engine = ScoringEngine::new();
        let ranked = engine.rank(ANCHOR, &[lodging(1, 4.0, 100, 0.0), lodging(2, 4.5, 10, 0.0)]);

        let (top, rest) = engine.partition(&ranked);
        assert_eq!(top.len(), 2);
        assert!(rest.is_empty());

        let (top, rest) = engine.partition(&[]);
        assert!(top.is_empty() && rest.is_empty());
    }

    #[test]
    fn test_custom_group_sizes() {
        let engine = ScoringEngine::new().with_top_picks(1).with_more_places(2);
        let candidates: Vec<_> = (0..5).map(|id| lodging(id, 4.0, 100, 0.0)).collect();
        let ranked = engine.rank(ANCHOR, &candidates);

        let (top, rest) = engine.partition(&ranked);
        assert_eq!((top.len(), rest.len()), (1, 2));
    }
}
