//! Filling in what a lodging record leaves out.
//!
//! Provider data rarely carries ratings, review counts or prices. Missing
//! values are drawn from a generator seeded by the record's own position
//! and id, so the same record always enriches to the same candidate.

use crate::synthetic::PLACEHOLDER_THUMBNAILS;
use catalog::{Candidate, LodgingRecord};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

/// Synthesized ratings fall in [3.5, 5.0] at one decimal.
pub const MIN_SYNTH_RATING: f64 = 3.5;
pub const MAX_SYNTH_RATING: f64 = 5.0;

/// Synthesized review counts fall in [50, 550).
pub const MIN_SYNTH_REVIEWS: u32 = 50;
pub const MAX_SYNTH_REVIEWS: u32 = 550;

/// Synthesized prices are multiples of 100 in [3 000, 25 000].
pub const MIN_SYNTH_PRICE: u32 = 3_000;
pub const MAX_SYNTH_PRICE: u32 = 25_000;

const AMENITY_POOL: [&str; 8] = [
    "WiFi",
    "Breakfast",
    "Parking",
    "Pool",
    "Spa",
    "Restaurant",
    "Airport Shuttle",
    "Mountain View",
];

const ID_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Turn a record into a full candidate, synthesizing missing fields.
pub fn enrich(record: LodgingRecord) -> Candidate {
    let seed = record.coordinate().seed() ^ record.id.wrapping_mul(ID_MIX);
    let mut rng = StdRng::seed_from_u64(seed);

    // Draw everything up front so a present field never shifts the others
    let rating = synth_rating(&mut rng);
    let reviews = rng.random_range(MIN_SYNTH_REVIEWS..MAX_SYNTH_REVIEWS);
    let price = rng.random_range(MIN_SYNTH_PRICE / 100..=MAX_SYNTH_PRICE / 100) * 100;
    let amenity_count = rng.random_range(2..=4);
    let amenities: Vec<String> = sample(&mut rng, AMENITY_POOL.len(), amenity_count)
        .into_iter()
        .map(|i| AMENITY_POOL[i].to_string())
        .collect();
    let thumbnail = PLACEHOLDER_THUMBNAILS[rng.random_range(0..PLACEHOLDER_THUMBNAILS.len())];

    let coordinate = record.coordinate();
    Candidate {
        id: record.id,
        name: record.name,
        locality: record.locality,
        coordinate,
        rating: record.rating.unwrap_or(rating),
        review_count: record.review_count.unwrap_or(reviews),
        price_per_night: record.price_per_night.unwrap_or(price),
        amenities: if record.amenities.is_empty() {
            amenities.into_iter().collect()
        } else {
            record.amenities.into_iter().collect()
        },
        thumbnail: record.thumbnail.unwrap_or_else(|| thumbnail.to_string()),
    }
}

fn synth_rating(rng: &mut StdRng) -> f64 {
    let raw = MIN_SYNTH_RATING + rng.random::<f64>() * (MAX_SYNTH_RATING - MIN_SYNTH_RATING);
    ((raw * 10.0).round() / 10.0).clamp(MIN_SYNTH_RATING, MAX_SYNTH_RATING)
}
