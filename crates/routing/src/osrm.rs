//! OSRM routing client.
//!
//! Calls the `route/v1/driving` endpoint with GeoJSON geometry and full
//! overview. OSRM speaks `[longitude, latitude]`; everything leaving this
//! module is a `Coordinate`.

use crate::error::RoutingError;
use catalog::Coordinate;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_OSRM_ENDPOINT: &str = "https://router.project-osrm.org";

/// A source of drivable paths between two points.
///
/// One blocking call per request, no retry.
pub trait RoutingProvider: Send + Sync {
    fn name(&self) -> &str;

    fn driving_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<Coordinate>, RoutingError>;
}

pub struct OsrmProvider {
    base_url: String,
    timeout: Duration,
}

impl OsrmProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Configure the per-request timeout (default: 10s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        )
    }
}

impl Default for OsrmProvider {
    fn default() -> Self {
        Self::new(DEFAULT_OSRM_ENDPOINT)
    }
}

impl RoutingProvider for OsrmProvider {
    fn name(&self) -> &str {
        "osrm"
    }

    fn driving_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<Coordinate>, RoutingError> {
        let url = self.route_url(origin, destination);
        debug!("OSRM request: {}", url);

        let response = ureq::get(&url)
            .timeout(self.timeout)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    RoutingError::Network(format!("HTTP status {}", code))
                }
                other => RoutingError::Network(other.to_string()),
            })?;

        let body: OsrmResponse = response
            .into_json()
            .map_err(|e| RoutingError::InvalidResponse(e.to_string()))?;

        parse_osrm_response(body)
    }
}

#[derive(Debug, Deserialize)]
pub struct OsrmResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
pub struct OsrmGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

/// Waypoints of the first route, as `{latitude, longitude}`.
pub fn parse_osrm_response(response: OsrmResponse) -> Result<Vec<Coordinate>, RoutingError> {
    if let Some(code) = response.code.as_deref() {
        if code != "Ok" {
            return match code {
                "NoRoute" | "NoSegment" => Err(RoutingError::NoRoute),
                other => Err(RoutingError::InvalidResponse(format!("code {}", other))),
            };
        }
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute)?;

    if route.geometry.coordinates.is_empty() {
        return Err(RoutingError::InvalidResponse(
            "route geometry has no coordinates".to_string(),
        ));
    }

    let waypoints: Vec<Coordinate> = route
        .geometry
        .coordinates
        .into_iter()
        .map(Coordinate::from_lon_lat)
        .collect();

    if let Some(bad) = waypoints.iter().find(|c| !c.is_valid()) {
        return Err(RoutingError::InvalidResponse(format!(
            "waypoint out of range: {}",
            bad
        )));
    }
    Ok(waypoints)
}
