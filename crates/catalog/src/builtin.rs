//! Built-in lodging dataset.
//!
//! Always available, no I/O. Covers every place the conversation knows
//! by name so each location prompt has something to show.

use crate::types::{Candidate, CandidateId, Coordinate};

struct BuiltinLodging {
    id: CandidateId,
    name: &'static str,
    locality: &'static str,
    lat: f64,
    lon: f64,
    price: u32,
    rating: f64,
    reviews: u32,
    amenities: &'static [&'static str],
    thumbnail: &'static str,
}

const THUMB_RESORT: &str =
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?auto=format&fit=crop&w=800&q=80";
const THUMB_LOBBY: &str =
    "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?auto=format&fit=crop&w=800&q=80";
const THUMB_ROOM: &str =
    "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?auto=format&fit=crop&w=800&q=80";
const THUMB_LODGE: &str =
    "https://images.unsplash.com/photo-1455587734955-080184874463?auto=format&fit=crop&w=800&q=80";

#[rustfmt::skip]
const BUILTIN_LODGINGS: &[BuiltinLodging] = &[
    BuiltinLodging {
        id: 1, name: "Hotel Yak & Yeti", locality: "Durbar Marg, Kathmandu",
        lat: 27.7126, lon: 85.3188, price: 18500, rating: 4.6, reviews: 412,
        amenities: &["Pool", "Spa", "WiFi", "Restaurant"], thumbnail: THUMB_RESORT,
    },
    BuiltinLodging {
        id: 2, name: "Kathmandu Guest House", locality: "Thamel, Kathmandu",
        lat: 27.7154, lon: 85.3101, price: 7500, rating: 4.4, reviews: 389,
        amenities: &["WiFi", "Garden", "Breakfast"], thumbnail: THUMB_LODGE,
    },
    BuiltinLodging {
        id: 3, name: "Dwarika's Hotel", locality: "Battisputali, Kathmandu",
        lat: 27.7052, lon: 85.3457, price: 32000, rating: 4.9, reviews: 528,
        amenities: &["Spa", "Pool", "Heritage Architecture", "Restaurant"], thumbnail: THUMB_LOBBY,
    },
    BuiltinLodging {
        id: 4, name: "Hotel Shanker", locality: "Lazimpat, Kathmandu",
        lat: 27.7215, lon: 85.3197, price: 14500, rating: 4.3, reviews: 276,
        amenities: &["Pool", "WiFi", "Garden"], thumbnail: THUMB_ROOM,
    },
    BuiltinLodging {
        id: 5, name: "Thamel Eco Resort", locality: "Thamel, Kathmandu",
        lat: 27.7160, lon: 85.3120, price: 9200, rating: 4.2, reviews: 198,
        amenities: &["WiFi", "Rooftop", "Breakfast"], thumbnail: THUMB_ROOM,
    },
    BuiltinLodging {
        id: 6, name: "Temple Tree Resort", locality: "Lakeside, Pokhara",
        lat: 28.2085, lon: 83.9585, price: 16500, rating: 4.7, reviews: 344,
        amenities: &["Pool", "Spa", "Lake View"], thumbnail: THUMB_RESORT,
    },
    BuiltinLodging {
        id: 7, name: "Fish Tail Lodge", locality: "Lakeside, Pokhara",
        lat: 28.2042, lon: 83.9613, price: 21000, rating: 4.5, reviews: 301,
        amenities: &["Lake View", "Boat Access", "Restaurant"], thumbnail: THUMB_LODGE,
    },
    BuiltinLodging {
        id: 8, name: "Hotel Barahi", locality: "Lakeside, Pokhara",
        lat: 28.2110, lon: 83.9570, price: 11000, rating: 4.3, reviews: 233,
        amenities: &["Pool", "WiFi"], thumbnail: THUMB_ROOM,
    },
    BuiltinLodging {
        id: 9, name: "Peace Dragon Eco Lodge", locality: "Sarangkot, Pokhara",
        lat: 28.2440, lon: 83.9480, price: 6000, rating: 4.1, reviews: 87,
        amenities: &["Mountain View", "Breakfast"], thumbnail: THUMB_LODGE,
    },
    BuiltinLodging {
        id: 10, name: "Barahi Jungle Lodge", locality: "Andrauli, Chitwan",
        lat: 27.5385, lon: 84.2462, price: 27000, rating: 4.8, reviews: 190,
        amenities: &["Safari", "Pool", "Restaurant"], thumbnail: THUMB_RESORT,
    },
    BuiltinLodging {
        id: 11, name: "Green Park Chitwan", locality: "Sauraha, Chitwan",
        lat: 27.5776, lon: 84.4950, price: 12500, rating: 4.4, reviews: 256,
        amenities: &["Pool", "Safari", "WiFi"], thumbnail: THUMB_LOBBY,
    },
    BuiltinLodging {
        id: 12, name: "Rainforest Guest House", locality: "Sauraha, Chitwan",
        lat: 27.5800, lon: 84.4970, price: 4200, rating: 4.0, reviews: 140,
        amenities: &["WiFi", "Garden"], thumbnail: THUMB_LODGE,
    },
    BuiltinLodging {
        id: 13, name: "Club Himalaya", locality: "Nagarkot",
        lat: 27.7170, lon: 85.5200, price: 13500, rating: 4.5, reviews: 215,
        amenities: &["Mountain View", "Pool", "Restaurant"], thumbnail: THUMB_LOBBY,
    },
    BuiltinLodging {
        id: 14, name: "Lumbini Buddha Hotel", locality: "Lumbini",
        lat: 27.4800, lon: 83.2760, price: 8000, rating: 4.2, reviews: 120,
        amenities: &["Garden", "WiFi", "Breakfast"], thumbnail: THUMB_ROOM,
    },
];

/// All built-in lodgings, in catalog order.
pub fn builtin_candidates() -> Vec<Candidate> {
    BUILTIN_LODGINGS.iter().map(to_candidate).collect()
}

fn to_candidate(entry: &BuiltinLodging) -> Candidate {
    Candidate {
        id: entry.id,
        name: entry.name.to_string(),
        locality: entry.locality.to_string(),
        coordinate: Coordinate::new(entry.lat, entry.lon),
        rating: entry.rating,
        review_count: entry.reviews,
        price_per_night: entry.price,
        amenities: entry.amenities.iter().map(|a| a.to_string()).collect(),
        thumbnail: entry.thumbnail.to_string(),
    }
}
