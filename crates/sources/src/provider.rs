//! The POI provider seam.

use crate::types::SourceError;
use catalog::{Coordinate, LodgingRecord};

/// An external service that lists lodgings around a point.
///
/// Implementations make a single blocking call with no retry. Records may
/// arrive without a name; filtering those out is the caller's job.
pub trait PoiProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn lodgings_near(
        &self,
        anchor: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<LodgingRecord>, SourceError>;
}
