//! The in-memory lodging catalog.
//!
//! Keeps candidates in insertion order (the order later used as the
//! tie-breaker by the stable sorts in the pipeline) plus an id index for
//! O(1) lookups when the UI reports a selection.

use crate::builtin;
use crate::error::Result;
use crate::parser::{self, LodgingRecord};
use crate::types::{Candidate, CandidateId};
use std::collections::HashMap;
use std::path::Path;

/// Lodging catalog with ordered storage and an id index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Candidate>,
    by_id: HashMap<CandidateId, usize>,
}

impl Catalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in dataset.
    pub fn builtin() -> Self {
        Self::from_candidates(builtin::builtin_candidates())
    }

    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let mut catalog = Self::new();
        for candidate in candidates {
            catalog.insert(candidate);
        }
        catalog
    }

    /// Load a catalog file.
    ///
    /// Records may leave rating, reviews, price or amenities out, so the
    /// caller supplies `complete` to turn each record into a full candidate.
    pub fn load_from_file<F>(path: &Path, complete: F) -> Result<Self>
    where
        F: FnMut(LodgingRecord) -> Candidate,
    {
        let records = parser::parse_catalog_file(path)?;
        let catalog = Self::from_candidates(records.into_iter().map(complete).collect());
        tracing::info!("Loaded {} lodgings from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Insert a candidate. An entry with the same id is replaced in place,
    /// keeping its original position.
    pub fn insert(&mut self, candidate: Candidate) {
        match self.by_id.get(&candidate.id) {
            Some(&idx) => self.entries[idx] = candidate,
            None => {
                self.by_id.insert(candidate.id, self.entries.len());
                self.entries.push(candidate);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All candidates in catalog order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.entries
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.by_id.get(&id).map(|&idx| &self.entries[idx])
    }

    /// Candidates whose locality contains `token` (case-insensitive).
    pub fn in_locality(&self, token: &str) -> Vec<&Candidate> {
        self.entries.iter().filter(|c| c.in_locality(token)).collect()
    }

    pub fn count_in(&self, token: &str) -> usize {
        self.entries.iter().filter(|c| c.in_locality(token)).count()
    }

    /// Min and max nightly price, over one locality or the whole catalog.
    ///
    /// Returns `None` when nothing matches.
    pub fn price_range(&self, token: Option<&str>) -> Option<(u32, u32)> {
        let prices = self
            .entries
            .iter()
            .filter(|c| token.is_none_or(|t| c.in_locality(t)))
            .map(|c| c.price_per_night);

        prices.fold(None, |acc, price| match acc {
            None => Some((price, price)),
            Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    fn lodging(id: CandidateId, locality: &str, price: u32) -> Candidate {
        Candidate {
            id,
            name: format!("Lodging {}", id),
            locality: locality.to_string(),
            coordinate: Coordinate::new(27.7, 85.3),
            rating: 4.0,
            review_count: 100,
            price_per_night: price,
            amenities: Default::default(),
            thumbnail: String::new(),
        }
    }

    fn create_test_catalog() -> Catalog {
        Catalog::from_candidates(vec![
            lodging(1, "Thamel, Kathmandu", 7000),
            lodging(2, "Lakeside, Pokhara", 15000),
            lodging(3, "Lazimpat, Kathmandu", 22000),
        ])
    }

    #[test]
    fn test_get_and_order() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(2).unwrap().locality, "Lakeside, Pokhara");
        assert!(catalog.get(99).is_none());

        let ids: Vec<_> = catalog.candidates().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut catalog = create_test_catalog();
        catalog.insert(lodging(2, "Sarangkot, Pokhara", 5000));

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.candidates()[1].price_per_night, 5000);
    }

    #[test]
    fn test_locality_queries() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.count_in("kathmandu"), 2);
        assert_eq!(catalog.in_locality("POKHARA").len(), 1);
        assert_eq!(catalog.count_in("chitwan"), 0);
    }

    #[test]
    fn test_price_range() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.price_range(Some("kathmandu")), Some((7000, 22000)));
        assert_eq!(catalog.price_range(None), Some((7000, 22000)));
        assert_eq!(catalog.price_range(Some("pokhara")), Some((15000, 15000)));
        assert_eq!(catalog.price_range(Some("chitwan")), None);
    }

    #[test]
    fn test_load_from_file_uses_completion() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{ "id": 9, "name": "Fewa Shore", "locality": "Pokhara",
                   "latitude": 28.21, "longitude": 83.96, "price_per_night": 9000 }]"#,
        )
        .unwrap();

        let catalog = Catalog::load_from_file(file.path(), |record| Candidate {
            id: record.id,
            coordinate: record.coordinate(),
            name: record.name,
            locality: record.locality,
            rating: record.rating.unwrap_or(3.0),
            review_count: record.review_count.unwrap_or(0),
            price_per_night: record.price_per_night.unwrap_or(0),
            amenities: record.amenities.into_iter().collect(),
            thumbnail: record.thumbnail.unwrap_or_default(),
        })
        .unwrap();

        let entry = catalog.get(9).unwrap();
        assert_eq!(entry.rating, 3.0);
        assert_eq!(entry.price_per_night, 9000);
        assert_eq!(catalog.count_in("pokhara"), 1);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.price_range(None).is_none());
    }
}
