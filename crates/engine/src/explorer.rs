//! Map exploration around the traveler's position.
//!
//! The explorer consumes geolocation events and keeps three things for the
//! UI: the displayed position, the ranked view around the first usable
//! anchor, and at most one route overlay.
//!
//! Only the first fix fetches candidates (see `AnchorLatch`). Later fixes
//! move the position marker and nothing else. A geolocation error before
//! any fix falls back to a fixed anchor, once.
//!
//! ## Example Usage
//! ```ignore
//! let mut explorer = Explorer::new(source, planner).with_radius(5000);
//! if let Some(view) = explorer.on_fix(Coordinate::new(27.71, 85.31)) {
//!     println!("{} top picks", view.top.len());
//! }
//! let overlay = explorer.select(view.top[0].candidate.id);
//! ```

use crate::config::DEFAULT_FALLBACK_ANCHOR;
use crate::geolocation::{AnchorLatch, GeoFix};
use anyhow::Result;
use catalog::{CandidateId, Coordinate};
use pipeline::{ScoredCandidate, ScoringEngine};
use routing::{RouteEnd, RouteOverlay, RoutePlanner};
use sources::{CandidateSource, FetchOrigin};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// Ranked lodgings around one anchor, split for display.
#[derive(Debug, Clone)]
pub struct ExploreView {
    pub anchor: Coordinate,
    pub origin: FetchOrigin,
    pub top: Vec<ScoredCandidate>,
    pub rest: Vec<ScoredCandidate>,
}

impl ExploreView {
    pub fn find(&self, id: CandidateId) -> Option<&ScoredCandidate> {
        self.top.iter().chain(&self.rest).find(|s| s.candidate.id == id)
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn build_view(
    source: &CandidateSource,
    scoring: &ScoringEngine,
    anchor: Coordinate,
    radius_m: u32,
) -> ExploreView {
    let outcome = source.fetch_near(anchor, radius_m);
    let ranked = scoring.rank(anchor, &outcome.candidates);
    let (top, rest) = scoring.partition(&ranked);
    ExploreView {
        anchor,
        origin: outcome.origin,
        top: top.to_vec(),
        rest: rest.to_vec(),
    }
}

pub struct Explorer {
    source: Arc<CandidateSource>,
    planner: Arc<RoutePlanner>,
    scoring: ScoringEngine,
    radius_m: u32,
    fallback_anchor: Coordinate,
    latch: AnchorLatch,
    position: Option<Coordinate>,
    view: Option<ExploreView>,
    overlay: Option<RouteOverlay>,
}

impl Explorer {
    pub fn new(source: Arc<CandidateSource>, planner: Arc<RoutePlanner>) -> Self {
        Self {
            source,
            planner,
            scoring: ScoringEngine::new(),
            radius_m: 5000,
            fallback_anchor: DEFAULT_FALLBACK_ANCHOR,
            latch: AnchorLatch::new(),
            position: None,
            view: None,
            overlay: None,
        }
    }

    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    pub fn with_fallback_anchor(mut self, anchor: Coordinate) -> Self {
        self.fallback_anchor = anchor;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringEngine) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn view(&self) -> Option<&ExploreView> {
        self.view.as_ref()
    }

    pub fn overlay(&self) -> Option<&RouteOverlay> {
        self.overlay.as_ref()
    }

    /// Handle a position fix. Returns the new view on the first usable fix.
    pub fn on_fix(&mut self, coordinate: Coordinate) -> Option<&ExploreView> {
        let anchor = self.accept_fix(coordinate)?;
        let view = build_view(&self.source, &self.scoring, anchor, self.radius_m);
        Some(self.install_view(view))
    }

    /// Handle a geolocation failure. Before any fix, explores around the
    /// fallback anchor instead and routes from there.
    pub fn on_geolocation_error(&mut self) -> Option<&ExploreView> {
        let anchor = self.accept_error()?;
        let view = build_view(&self.source, &self.scoring, anchor, self.radius_m);
        Some(self.install_view(view))
    }

    /// Route from the current position to a lodging in the view.
    ///
    /// Replaces any previous overlay. Returns `None`, with no overlay left,
    /// when the lodging is unknown or no route was found.
    #[instrument(skip(self))]
    pub fn select(&mut self, id: CandidateId) -> Option<&RouteOverlay> {
        self.overlay = None;
        let origin = self.position?;
        let destination = self.view.as_ref()?.find(id)?.candidate.coordinate;

        let waypoints = self.planner.route(origin, destination);
        self.overlay = RouteOverlay::from_waypoints(RouteEnd::Traveler, RouteEnd::Lodging(id), waypoints);
        if self.overlay.is_none() {
            debug!("No route to lodging {}", id);
        }
        self.overlay.as_ref()
    }

    pub fn clear_route(&mut self) {
        self.overlay = None;
    }

    /// Drop the overlay and return the position to center the map on.
    pub fn recenter(&mut self) -> Option<Coordinate> {
        self.overlay = None;
        self.position.or(self.view.as_ref().map(|v| v.anchor))
    }

    /// Drive the explorer from a geolocation subscription.
    ///
    /// Runs until `shutdown` fires (or its sender is dropped), the fix
    /// channel closes, or the `updates` receiver goes away. Each new view is
    /// sent on `updates`. Fetching and ranking run on the blocking pool.
    pub async fn watch(
        &mut self,
        mut fixes: mpsc::Receiver<GeoFix>,
        mut shutdown: oneshot::Receiver<()>,
        updates: mpsc::Sender<ExploreView>,
    ) -> Result<()> {
        loop {
            let fix = tokio::select! {
                _ = &mut shutdown => {
                    info!("Geolocation watch cancelled");
                    break;
                }
                fix = fixes.recv() => match fix {
                    Some(fix) => fix,
                    None => {
                        debug!("Geolocation subscription closed");
                        break;
                    }
                },
            };

            let anchor = match fix {
                Ok(coordinate) => self.accept_fix(coordinate),
                Err(e) => {
                    warn!("Geolocation error: {}", e);
                    self.accept_error()
                }
            };
            let Some(anchor) = anchor else {
                continue;
            };

            let source = Arc::clone(&self.source);
            let scoring = self.scoring.clone();
            let radius_m = self.radius_m;
            let view =
                tokio::task::spawn_blocking(move || build_view(&source, &scoring, anchor, radius_m)).await?;

            let view = self.install_view(view).clone();
            if updates.send(view).await.is_err() {
                debug!("View receiver dropped");
                break;
            }
        }
        Ok(())
    }

    /// Move the marker. Returns the anchor to explore on the latch edge.
    fn accept_fix(&mut self, coordinate: Coordinate) -> Option<Coordinate> {
        if !coordinate.is_valid() {
            warn!("Ignoring invalid position {}", coordinate);
            return None;
        }
        self.position = Some(coordinate);
        self.latch.observe().then_some(coordinate)
    }

    fn accept_error(&mut self) -> Option<Coordinate> {
        if self.latch.is_set() {
            return None;
        }
        self.latch.observe();
        info!("Using fallback anchor {}", self.fallback_anchor);
        self.position = Some(self.fallback_anchor);
        Some(self.fallback_anchor)
    }

    fn install_view(&mut self, view: ExploreView) -> &ExploreView {
        info!(
            "Exploring {} lodgings around {} ({:?})",
            view.len(),
            view.anchor,
            view.origin
        );
        self.overlay = None;
        self.view.insert(view)
    }
}
