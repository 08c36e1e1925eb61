//! # Sources Crate
//!
//! Candidate generation for lodging recommendations.
//!
//! ## Components
//!
//! ### POI Provider
//! The external point-of-interest service behind the `PoiProvider` trait.
//! `OverpassProvider` asks OpenStreetMap for hotels around a point.
//!
//! ### Synthetic Source
//! Ten deterministic lodgings jittered around the anchor, used when the
//! provider errors or returns nothing usable.
//!
//! ### Enrichment
//! Fills in rating, reviews, price, amenities and thumbnail for records
//! that arrive without them. Also used for catalog files.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CandidateSource, OverpassProvider};
//! use catalog::Coordinate;
//! use std::sync::Arc;
//!
//! let source = CandidateSource::new(Arc::new(OverpassProvider::default()));
//! let outcome = source.fetch_near(Coordinate::new(27.7172, 85.3240), 5000);
//!
//! println!("{} lodgings ({:?})", outcome.candidates.len(), outcome.origin);
//! ```

pub mod candidate_source;
pub mod enrich;
pub mod overpass;
pub mod provider;
pub mod synthetic;
pub mod types;

pub use candidate_source::CandidateSource;
pub use enrich::enrich;
pub use overpass::{DEFAULT_OVERPASS_ENDPOINT, OverpassProvider};
pub use provider::PoiProvider;
pub use synthetic::{SYNTHETIC_COUNT, synthesize};
pub use types::{FetchOrigin, FetchOutcome, SourceError};

use catalog::Catalog;
use std::path::Path;

/// Load a catalog file, enriching records that leave fields out.
pub fn load_catalog(path: &Path) -> catalog::Result<Catalog> {
    Catalog::load_from_file(path, enrich)
}
