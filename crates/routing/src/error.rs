use thiserror::Error;

/// Errors that can occur when asking a routing service for a path
#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Routing request failed: {0}")]
    Network(String),

    #[error("No drivable route between the given points")]
    NoRoute,

    #[error("Invalid response from routing service: {0}")]
    InvalidResponse(String),
}
