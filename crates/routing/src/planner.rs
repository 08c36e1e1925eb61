//! Route planning with a soft failure mode.
//!
//! Callers get either a path or nothing. An empty path means "draw no
//! overlay"; it is never an error the traveler sees.

use crate::osrm::RoutingProvider;
use catalog::{CandidateId, Coordinate, distance_km};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// One end of a route overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteEnd {
    /// The traveler's current position
    Traveler,
    Lodging(CandidateId),
}

/// A drawable path between two ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverlay {
    pub origin: RouteEnd,
    pub destination: RouteEnd,
    pub waypoints: Vec<Coordinate>,
}

impl RouteOverlay {
    /// `None` for an empty path.
    pub fn from_waypoints(
        origin: RouteEnd,
        destination: RouteEnd,
        waypoints: Vec<Coordinate>,
    ) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }
        Some(Self {
            origin,
            destination,
            waypoints,
        })
    }

    /// Length of the polyline in kilometers.
    pub fn length_km(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| distance_km(pair[0], pair[1]))
            .sum()
    }
}

pub struct RoutePlanner {
    provider: Option<Arc<dyn RoutingProvider>>,
}

impl RoutePlanner {
    pub fn new(provider: Arc<dyn RoutingProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A planner that never finds a route
    pub fn offline() -> Self {
        Self { provider: None }
    }

    /// Drivable path from `origin` to `destination`, or an empty list.
    #[instrument(skip(self, origin, destination), fields(origin = %origin, destination = %destination))]
    pub fn route(&self, origin: Coordinate, destination: Coordinate) -> Vec<Coordinate> {
        let Some(provider) = &self.provider else {
            debug!("No routing provider configured");
            return Vec::new();
        };

        match provider.driving_route(origin, destination) {
            Ok(waypoints) => {
                debug!("Route with {} waypoints", waypoints.len());
                waypoints
            }
            Err(e) => {
                warn!("Routing provider {} failed: {}", provider.name(), e);
                Vec::new()
            }
        }
    }
}
