//! Candidate Source - lodgings near an anchor, never an empty panel
//!
//! ## Algorithm
//! 1. One blocking call to the POI provider (no retry)
//! 2. Keep records with a usable name, enrich missing fields
//! 3. On error or zero usable records, fall back to the synthetic generator
//!    (unless fail-open is switched off, in which case return nothing)

use crate::enrich::enrich;
use crate::provider::PoiProvider;
use crate::synthetic::synthesize;
use crate::types::{FetchOrigin, FetchOutcome};
use catalog::{Candidate, Coordinate};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct CandidateSource {
    /// `None` runs offline: every fetch goes straight to the fallback
    provider: Option<Arc<dyn PoiProvider>>,

    /// Whether a provider miss falls back to synthetic data
    fail_open: bool,
}

impl CandidateSource {
    pub fn new(provider: Arc<dyn PoiProvider>) -> Self {
        Self {
            provider: Some(provider),
            fail_open: true,
        }
    }

    /// A source with no provider at all
    pub fn offline() -> Self {
        Self {
            provider: None,
            fail_open: true,
        }
    }

    /// Configure the synthetic fallback (default: enabled)
    pub fn with_fail_open(mut self, fail_open: bool) -> Self {
        self.fail_open = fail_open;
        self
    }

    pub fn fail_open(&self) -> bool {
        self.fail_open
    }

    /// Fetch lodgings within `radius_m` meters of `anchor`.
    ///
    /// With fail-open enabled the result is never empty. Provider errors are
    /// logged here and never returned.
    #[instrument(skip(self, anchor), fields(anchor = %anchor))]
    pub fn fetch_near(&self, anchor: Coordinate, radius_m: u32) -> FetchOutcome {
        if let Some(candidates) = self.from_provider(anchor, radius_m) {
            info!("Fetched {} lodgings from provider", candidates.len());
            return FetchOutcome {
                candidates,
                origin: FetchOrigin::Provider,
            };
        }

        if self.fail_open {
            let candidates = synthesize(anchor);
            info!("Using {} synthetic lodgings", candidates.len());
            FetchOutcome {
                candidates,
                origin: FetchOrigin::Synthetic,
            }
        } else {
            warn!("No lodgings available and synthetic fallback is disabled");
            FetchOutcome {
                candidates: Vec::new(),
                origin: FetchOrigin::Unavailable,
            }
        }
    }

    /// `None` on any provider miss: offline, error, or nothing usable.
    fn from_provider(&self, anchor: Coordinate, radius_m: u32) -> Option<Vec<Candidate>> {
        let Some(provider) = &self.provider else {
            debug!("No POI provider configured");
            return None;
        };

        let records = match provider.lodgings_near(anchor, radius_m) {
            Ok(records) => records,
            Err(e) => {
                warn!("POI provider {} failed: {}", provider.name(), e);
                return None;
            }
        };

        let total = records.len();
        let candidates: Vec<Candidate> = records
            .into_iter()
            .filter(|r| !r.name.trim().is_empty())
            .map(enrich)
            .collect();

        if candidates.is_empty() {
            debug!(
                "POI provider {} returned {} records, none usable",
                provider.name(),
                total
            );
            return None;
        }
        Some(candidates)
    }
}
