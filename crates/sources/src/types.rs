//! Shared types for candidate sources.

use catalog::Candidate;
use thiserror::Error;

/// Errors a POI provider can report.
///
/// These never leave this crate: `CandidateSource` converts them into a
/// `FetchOutcome` at the call site.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport failure, timeout or non-success status
    #[error("POI provider request failed: {0}")]
    Network(String),

    /// The provider answered with something we could not decode
    #[error("Invalid POI provider response: {0}")]
    InvalidResponse(String),
}

/// Where the candidates of a fetch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Real provider data (possibly enriched)
    Provider,
    /// Deterministic synthetic data after a provider miss
    Synthetic,
    /// Provider missed and the synthetic fallback is disabled
    Unavailable,
}

/// Result of `CandidateSource::fetch_near`.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub candidates: Vec<Candidate>,
    pub origin: FetchOrigin,
}

impl FetchOutcome {
    pub fn is_synthetic(&self) -> bool {
        self.origin == FetchOrigin::Synthetic
    }
}
