//! Overpass API adapter.
//!
//! Asks OpenStreetMap for `tourism=hotel` nodes, ways and relations around
//! the anchor. Ways and relations carry their position in `center`
//! (requested with `out center`), nodes carry `lat`/`lon` directly.

use crate::provider::PoiProvider;
use crate::types::SourceError;
use catalog::{Coordinate, LodgingRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

const USER_AGENT: &str = "lodgewise/0.1 (lodging-recommender)";

/// Overpass interpreter client
pub struct OverpassProvider {
    endpoint: String,
    timeout: Duration,
}

impl OverpassProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Configure the per-request timeout (default: 10s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OverpassProvider {
    fn default() -> Self {
        Self::new(DEFAULT_OVERPASS_ENDPOINT)
    }
}

impl PoiProvider for OverpassProvider {
    fn name(&self) -> &str {
        "overpass"
    }

    fn lodgings_near(
        &self,
        anchor: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<LodgingRecord>, SourceError> {
        let query = build_query(anchor, radius_m);
        debug!("Overpass query: {}", query);

        let response = ureq::post(&self.endpoint)
            .set("User-Agent", USER_AGENT)
            .timeout(self.timeout)
            .send_form(&[("data", query.as_str())])
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let body: OverpassResponse = response
            .into_json()
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        Ok(records_from_response(body))
    }
}

/// Overpass QL for hotels within `radius_m` of `anchor`.
pub fn build_query(anchor: Coordinate, radius_m: u32) -> String {
    let around = format!(
        "(around:{},{},{})",
        radius_m, anchor.latitude, anchor.longitude
    );
    format!(
        "[out:json][timeout:25];(node[\"tourism\"=\"hotel\"]{a};way[\"tourism\"=\"hotel\"]{a};relation[\"tourism\"=\"hotel\"]{a};);out center;",
        a = around
    )
}

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// Bits that keep way and relation ids apart from node ids.
const WAY_ID_TAG: u64 = 1 << 62;
const RELATION_ID_TAG: u64 = 1 << 63;

#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    /// `node`, `way` or `relation`
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Candidate id, unique across element kinds. Node ids are kept as-is.
    pub fn candidate_id(&self) -> u64 {
        match self.kind.as_str() {
            "way" => self.id | WAY_ID_TAG,
            "relation" => self.id | RELATION_ID_TAG,
            _ => self.id,
        }
    }

    fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some(Coordinate::new(lat, lon)),
            (_, _, Some(center)) => Some(Coordinate::new(center.lat, center.lon)),
            _ => None,
        }
    }
}

/// Convert Overpass elements into lodging records.
///
/// Elements without a name or a usable position are dropped.
pub fn records_from_response(response: OverpassResponse) -> Vec<LodgingRecord> {
    let total = response.elements.len();

    let records: Vec<LodgingRecord> = response
        .elements
        .into_iter()
        .filter_map(|element| {
            let coordinate = element.coordinate().filter(Coordinate::is_valid)?;
            let name = element.tags.get("name")?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(LodgingRecord {
                id: element.candidate_id(),
                name,
                locality: element.tags.get("addr:city").cloned().unwrap_or_default(),
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
                price_per_night: None,
                rating: None,
                review_count: None,
                amenities: Vec::new(),
                thumbnail: None,
            })
        })
        .collect();

    debug!("Kept {} of {} Overpass elements", records.len(), total);
    records
}
