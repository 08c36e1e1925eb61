//! Parser for lodging catalog files.
//!
//! A catalog file is a JSON array of lodging records:
//!
//! ```json
//! [
//!   { "id": 1, "name": "Yak Lodge", "locality": "Thamel, Kathmandu",
//!     "latitude": 27.715, "longitude": 85.312, "price_per_night": 6500,
//!     "rating": 4.3, "review_count": 120, "amenities": ["WiFi"] }
//! ]
//! ```
//!
//! `rating`, `review_count`, `price_per_night`, `amenities` and `thumbnail`
//! are optional. Missing values are synthesized later by the candidate
//! source's enrichment step, so the parser only checks what it can check
//! on its own: shape, coordinate ranges, rating range, unique ids.

use crate::error::{CatalogError, Result};
use crate::types::{CandidateId, Coordinate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A lodging as described by a data source, before enrichment.
///
/// POI provider results and catalog file rows share this shape; both are
/// turned into a `Candidate` by filling in whatever is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodgingRecord {
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub locality: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub price_per_night: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl LodgingRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Read and validate a catalog file.
pub fn parse_catalog_file(path: &Path) -> Result<Vec<LodgingRecord>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_catalog_str(&content, &file)
}

/// Parse and validate catalog JSON already in memory.
///
/// `file` is only used to label errors.
pub fn parse_catalog_str(content: &str, file: &str) -> Result<Vec<LodgingRecord>> {
    let records: Vec<LodgingRecord> =
        serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })?;

    let mut seen: HashSet<CandidateId> = HashSet::with_capacity(records.len());
    for record in &records {
        validate_record(record)?;
        if !seen.insert(record.id) {
            return Err(CatalogError::ValidationError(format!(
                "duplicate lodging id {} in {}",
                record.id, file
            )));
        }
    }

    tracing::debug!("Parsed {} lodging records from {}", records.len(), file);
    Ok(records)
}

fn validate_record(record: &LodgingRecord) -> Result<()> {
    if record.name.trim().is_empty() {
        return Err(CatalogError::InvalidValue {
            field: "name".to_string(),
            value: format!("<empty> (id {})", record.id),
        });
    }
    if !record.coordinate().is_valid() {
        return Err(CatalogError::ValidationError(format!(
            "lodging {} has out-of-range coordinate ({}, {})",
            record.id, record.latitude, record.longitude
        )));
    }
    if let Some(rating) = record.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(CatalogError::InvalidValue {
                field: "rating".to_string(),
                value: rating.to_string(),
            });
        }
    }
    Ok(())
}
