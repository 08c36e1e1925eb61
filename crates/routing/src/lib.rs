//! Road routing for the route overlay.
//!
//! This crate provides a client for an external routing service (OSRM) and
//! a planner on top of it that never fails loudly:
//! - Network errors, timeouts, "no route" and malformed responses are
//!   logged and turned into an empty path
//! - Waypoints come back as `{latitude, longitude}` regardless of the
//!   service's axis order
//!
//! ## Example Usage
//! ```ignore
//! use routing::{OsrmProvider, RouteEnd, RouteOverlay, RoutePlanner};
//! use std::sync::Arc;
//!
//! let planner = RoutePlanner::new(Arc::new(OsrmProvider::default()));
//! let waypoints = planner.route(traveler, lodging.coordinate);
//!
//! match RouteOverlay::from_waypoints(RouteEnd::Traveler, RouteEnd::Lodging(lodging.id), waypoints) {
//!     Some(overlay) => draw(overlay),
//!     None => {} // nothing to draw
//! }
//! ```

pub mod error;
pub mod osrm;
pub mod planner;

pub use error::RoutingError;
pub use osrm::{DEFAULT_OSRM_ENDPOINT, OsrmProvider, RoutingProvider, parse_osrm_response};
pub use planner::{RouteEnd, RouteOverlay, RoutePlanner};
