//! Device geolocation inputs.

use catalog::Coordinate;
use thiserror::Error;

/// Why the device could not report a position.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location request timed out")]
    Timeout,

    #[error("location unavailable")]
    Unavailable,
}

/// One event from a geolocation subscription.
pub type GeoFix = Result<Coordinate, GeolocationError>;

/// Edge-triggered latch for the first usable position.
///
/// `observe` returns `true` exactly once, on the first call. Later fixes
/// only move the displayed position; they must not trigger another fetch.
#[derive(Debug, Default)]
pub struct AnchorLatch {
    fired: bool,
}

impl AnchorLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn is_set(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_fires_once() {
        let mut latch = AnchorLatch::new();
        assert!(!latch.is_set());
        assert!(latch.observe());
        assert!(latch.is_set());
        for _ in 0..5 {
            assert!(!latch.observe());
        }
    }
}
