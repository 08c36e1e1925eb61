//! Synthetic Source - deterministic fallback data
//!
//! Used when the POI provider fails or finds nothing usable.
//!
//! ## Algorithm
//! 1. Seed a generator from the anchor coordinate
//! 2. For each of the 10 pool names, jitter the anchor by at most 0.01° per axis
//! 3. Attach a placeholder thumbnail
//! 4. Run the record through enrichment for rating, reviews, price, amenities

use crate::enrich::enrich;
use catalog::{Candidate, CandidateId, Coordinate, LodgingRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of synthetic candidates per fetch
pub const SYNTHETIC_COUNT: usize = 10;

/// Maximum offset from the anchor per axis, in degrees
pub const MAX_JITTER_DEG: f64 = 0.01;

const NAME_POOL: [&str; SYNTHETIC_COUNT] = [
    "Hotel Everest View",
    "Hotel Himalaya View",
    "Hotel Kathmandu View",
    "Hotel Lakeside View",
    "Hotel Sunrise View",
    "Hotel Mountain View",
    "Hotel Heritage View",
    "Hotel Royal View",
    "Hotel Grand View",
    "Hotel Peace View",
];

pub const PLACEHOLDER_THUMBNAILS: [&str; 4] = [
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1571896349842-33c89424de2d?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?auto=format&fit=crop&w=400&q=80",
];

/// Generate the synthetic candidates for an anchor.
///
/// The same anchor always yields the same list.
pub fn synthesize(anchor: Coordinate) -> Vec<Candidate> {
    let mut rng = StdRng::seed_from_u64(anchor.seed());

    NAME_POOL
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let latitude = (anchor.latitude + jitter(&mut rng)).clamp(-90.0, 90.0);
            let longitude = (anchor.longitude + jitter(&mut rng)).clamp(-180.0, 180.0);

            enrich(LodgingRecord {
                id: (i + 1) as CandidateId,
                name: name.to_string(),
                locality: String::new(),
                latitude,
                longitude,
                price_per_night: None,
                rating: None,
                review_count: None,
                amenities: Vec::new(),
                thumbnail: Some(PLACEHOLDER_THUMBNAILS[i % PLACEHOLDER_THUMBNAILS.len()].to_string()),
            })
        })
        .collect()
}

fn jitter(rng: &mut StdRng) -> f64 {
    (rng.random::<f64>() - 0.5) * 2.0 * MAX_JITTER_DEG
}
