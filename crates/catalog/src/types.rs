//! Core domain types for lodging recommendation.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Every other crate in the workspace speaks in terms of these types:
//! - `Coordinate` is the only way a position crosses a crate boundary
//! - `Candidate` is a lodging entry, whether it came from the catalog,
//!   the POI provider, or the synthetic generator

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a lodging candidate.
///
/// POI provider ids (OpenStreetMap element ids) are 64-bit, so the catalog
/// uses the same width to keep ids comparable across sources.
pub type CandidateId = u64;

// =============================================================================
// Coordinate
// =============================================================================

/// A WGS84 position in decimal degrees.
///
/// Valid coordinates have latitude in [-90, 90] and longitude in [-180, 180].
/// Construction does not enforce this; `is_valid` lets the collaborator that
/// owns the input decide what to do with garbage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both axes are inside their legal ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Build from a `[longitude, latitude]` pair, the axis order used by
    /// GeoJSON and most routing services.
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// Stable 64-bit fingerprint of the exact coordinate, used to seed
    /// deterministic generators.
    pub fn seed(&self) -> u64 {
        self.latitude
            .to_bits()
            .rotate_left(17)
            ^ self.longitude.to_bits()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

// =============================================================================
// Candidate
// =============================================================================

/// A lodging entry under consideration for recommendation.
///
/// Candidates are immutable per query: sources build them, the pipeline
/// filters and reorders them, nothing mutates them in place afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    /// Town or area the lodging belongs to (e.g. "Thamel, Kathmandu").
    /// Empty when the provider does not know it.
    #[serde(default)]
    pub locality: String,
    pub coordinate: Coordinate,
    /// Average guest rating, 0.0 to 5.0
    pub rating: f64,
    pub review_count: u32,
    pub price_per_night: u32,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
    /// Image reference for cards; a placeholder URL for synthetic entries
    #[serde(default)]
    pub thumbnail: String,
}

impl Candidate {
    /// Case-insensitive substring match against the locality, falling back
    /// to the name for entries without a locality.
    pub fn in_locality(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        let haystack = if self.locality.is_empty() {
            &self.name
        } else {
            &self.locality
        };
        haystack.to_lowercase().contains(&token)
    }

    /// One-line summary used in logs and the copy-service catalog context.
    pub fn catalog_line(&self) -> String {
        let amenities = self
            .amenities
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} ({}) - Rs.{}/night, Rating: {:.1}/5, Amenities: {}",
            self.name, self.locality, self.price_per_night, self.rating, amenities
        )
    }
}
