//! # Catalog Crate
//!
//! Domain types, great-circle distance and the lodging catalog shared by
//! every other crate in the workspace.
//!
//! ## Main Components
//!
//! - **types**: `Coordinate`, `Candidate` and the `CandidateId` alias
//! - **geo**: haversine distance (`distance_km`)
//! - **parser**: JSON catalog files into `LodgingRecord`s
//! - **index**: the in-memory `Catalog` with locality and price queries
//! - **builtin**: the dataset used when no catalog file is configured
//! - **error**: error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, Coordinate, distance_km};
//!
//! let catalog = Catalog::builtin();
//! let kathmandu = Coordinate::new(27.7172, 85.3240);
//!
//! for lodging in catalog.in_locality("kathmandu") {
//!     println!("{} is {:.1} km away", lodging.name, distance_km(kathmandu, lodging.coordinate));
//! }
//!
//! if let Some((lo, hi)) = catalog.price_range(Some("pokhara")) {
//!     println!("Pokhara: Rs. {} to Rs. {}", lo, hi);
//! }
//! ```

pub mod builtin;
pub mod error;
pub mod geo;
pub mod index;
pub mod parser;
pub mod types;

pub use error::{CatalogError, Result};
pub use geo::{EARTH_RADIUS_KM, distance_km};
pub use index::Catalog;
pub use parser::{LodgingRecord, parse_catalog_file, parse_catalog_str};
pub use types::{Candidate, CandidateId, Coordinate};
