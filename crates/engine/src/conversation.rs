//! The guided hotel conversation.
//!
//! ## Algorithm
//! `step` is a pure function of `(input, state)`:
//! 1. Device inputs (a geolocation fix or failure) are handled first
//! 2. Text is classified by the intent rule table for the current step
//! 3. The matched intent produces the next state, and `filter_and_rank`
//!    runs whenever that state is `Recommend`
//! 4. The optional copy service rewrites the reply text last
//!
//! Nothing is mutated here. `Session::respond` applies the new state once
//! the whole turn has been computed.

use crate::copy::{CopyRequest, CopyService};
use crate::geolocation::GeolocationError;
use crate::intents::{Intent, PLACES, classify};
use crate::session::{ConversationState, ConversationStep, Session, SessionContext};
use catalog::{Candidate, Catalog, Coordinate};
use pipeline::{BudgetRange, HIGH_PRICE_THRESHOLD, LOW_PRICE_THRESHOLD, filter_and_rank};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Default number of hotels shown in one reply.
pub const DEFAULT_RESULT_CAP: usize = 6;

/// Hotels previewed when a search misses on location.
pub const FALLBACK_PREVIEW: usize = 4;

const START_OVER: &str = "Start over";
const SHOW_ALL: &str = "Show all hotels";
const USE_MY_LOCATION: &str = "Use my location";
const CHANGE_LOCATION: &str = "Change location";

/// One turn of input.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnInput {
    /// Typed text or a tapped suggestion chip
    Text(String),
    /// The device answered a geolocation request
    GeolocationFix(Coordinate),
    GeolocationFailed(GeolocationError),
}

impl TurnInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Something the UI has to do on the engine's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceRequest {
    /// Ask for one position fix and feed it back as a `TurnInput`
    Geolocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub text: String,
    pub suggestions: Vec<String>,
    pub hotels: Vec<Candidate>,
    pub request: Option<DeviceRequest>,
    /// The turn reset the conversation
    pub restarted: bool,
}

impl Response {
    fn new(text: impl Into<String>, suggestions: &[&str]) -> Self {
        Self {
            text: text.into(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            hotels: Vec::new(),
            request: None,
            restarted: false,
        }
    }

    fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    fn with_hotels(mut self, hotels: Vec<Candidate>) -> Self {
        self.hotels = hotels;
        self
    }
}

pub struct ConversationEngine {
    catalog: Arc<Catalog>,
    copy: Option<Box<dyn CopyService>>,
    result_cap: usize,
}

impl ConversationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            copy: None,
            result_cap: DEFAULT_RESULT_CAP,
        }
    }

    pub fn with_copy_service(mut self, copy: Box<dyn CopyService>) -> Self {
        self.copy = Some(copy);
        self
    }

    pub fn with_result_cap(mut self, cap: usize) -> Self {
        self.result_cap = cap.max(1);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Opening message for a new session.
    pub fn greeting(&self, context: &SessionContext) -> Response {
        let name = context
            .traveler_name
            .as_deref()
            .map(|n| format!(" {}", n))
            .unwrap_or_default();
        let text = format!(
            "Hi{}! I'll help you find the perfect hotel in Nepal. We have {} properties across several locations.\n\nWhere would you like to stay?",
            name,
            self.catalog.len()
        );
        Response::new(text, &[]).with_suggestions(self.location_suggestions())
    }

    /// Compute the reply and the next state for one turn.
    #[instrument(skip(self, input, state), fields(step = ?state.step))]
    pub fn step(&self, input: &TurnInput, state: &ConversationState) -> (Response, ConversationState) {
        let (response, next) = match input {
            TurnInput::GeolocationFix(coordinate) => self.on_geolocation_fix(*coordinate, state),
            TurnInput::GeolocationFailed(error) => {
                debug!("Geolocation failed: {}", error);
                (
                    Response::new(
                        "I couldn't access your location. Please check your location permissions.",
                        &["Search Kathmandu", "Search Pokhara"],
                    ),
                    state.clone(),
                )
            }
            TurnInput::Text(text) => {
                let (response, next) = self.on_text(text, state);
                (self.polish(text, response), next)
            }
        };
        debug!("Next step {:?}, {} hotels", next.step, response.hotels.len());
        (response, next)
    }

    fn on_text(&self, text: &str, state: &ConversationState) -> (Response, ConversationState) {
        let Some(intent) = classify(text, state.step) else {
            return (self.reprompt(state.step), state.clone());
        };

        match intent {
            Intent::Restart => {
                let mut response = Response::new("Let's start fresh! Where would you like to stay?", &[])
                    .with_suggestions(self.restart_suggestions());
                response.restarted = true;
                (response, state.restarted())
            }
            Intent::UseMyLocation => {
                let mut response = Response::new("Looking up your location...", &[]);
                response.request = Some(DeviceRequest::Geolocation);
                (response, state.clone())
            }
            Intent::ChooseLocation(place) if state.step == ConversationStep::Location => {
                self.on_location(place, state)
            }
            Intent::ChooseLocation(place) => {
                let next = ConversationState {
                    step: ConversationStep::Recommend,
                    selected_location: place,
                    sort_by_distance: false,
                    ..state.clone()
                };
                self.recommend(state, next)
            }
            Intent::ChooseBudget(budget) => {
                let next = ConversationState {
                    step: ConversationStep::Recommend,
                    budget: Some(budget),
                    ..state.clone()
                };
                self.recommend(state, next)
            }
            Intent::NearMe => match state.last_anchor {
                Some(_) => {
                    let next = ConversationState {
                        sort_by_distance: true,
                        ..state.clone()
                    };
                    self.recommend(state, next)
                }
                None => (
                    Response::new(
                        "I need your location to find nearby hotels! Tap 'Use my location' below.",
                        &[USE_MY_LOCATION, SHOW_ALL],
                    ),
                    state.clone(),
                ),
            },
            Intent::LoosenBudget => {
                let next = ConversationState {
                    budget: Some(BudgetRange::any()),
                    ..state.clone()
                };
                self.recommend(state, next)
            }
            Intent::WidenLocation => {
                let next = ConversationState {
                    selected_location: None,
                    ..state.clone()
                };
                self.recommend(state, next)
            }
            Intent::Refine => self.recommend(state, state.clone()),
        }
    }

    fn on_location(&self, place: Option<String>, state: &ConversationState) -> (Response, ConversationState) {
        let (count, label) = match &place {
            Some(token) => (self.catalog.count_in(token), format!("in {}", display_place(token))),
            None => (self.catalog.len(), "across all locations".to_string()),
        };

        let mut text = format!("Great! I found {} hotels {}.", count, label);
        if let Some((low, high)) = self.catalog.price_range(place.as_deref()) {
            text.push_str(&format!(
                "\n\nPrices range from Rs. {} to Rs. {} per night.",
                group_thousands(low),
                group_thousands(high)
            ));
        }
        text.push_str("\n\nWhat's your budget?");

        let next = ConversationState {
            step: ConversationStep::Budget,
            selected_location: place,
            ..state.clone()
        };
        (Response::new(text, &[]).with_suggestions(budget_suggestions()), next)
    }

    fn on_geolocation_fix(
        &self,
        coordinate: Coordinate,
        state: &ConversationState,
    ) -> (Response, ConversationState) {
        if !coordinate.is_valid() {
            warn!("Ignoring invalid position {}", coordinate);
            return (self.reprompt(state.step), state.clone());
        }
        let next = ConversationState {
            step: ConversationStep::Recommend,
            last_anchor: Some(coordinate),
            sort_by_distance: true,
            ..state.clone()
        };
        self.recommend(state, next)
    }

    /// Run the search for `next`. On a filter error the previous state is kept.
    fn recommend(&self, previous: &ConversationState, next: ConversationState) -> (Response, ConversationState) {
        let context = next.search_context();
        let candidates = self.catalog.candidates().to_vec();

        let results = match filter_and_rank(candidates.clone(), &context) {
            Ok(results) => results,
            Err(e) => {
                warn!("Search failed: {:#}", e);
                return (
                    Response::new("I'm having trouble with that search right now. Please try again.", &[
                        START_OVER, SHOW_ALL,
                    ]),
                    previous.clone(),
                );
            }
        };

        if results.is_empty() {
            return (self.no_matches(&next, candidates), next);
        }

        let text = if context.anchor.is_some() {
            format!("Found {} hotels closest to you!", results.len())
        } else {
            format!("Found {} hotels matching your preferences!", results.len())
        };
        let hotels = results.into_iter().take(self.result_cap).collect();
        let response = Response::new(text, &["Show more", "Refine search", START_OVER]).with_hotels(hotels);
        (response, next)
    }

    /// Explain an empty result.
    ///
    /// When dropping the budget would have found something, the miss is the
    /// budget's and only a looser budget is offered. Otherwise the miss is the
    /// location's and a preview of the unfiltered catalog is shown.
    fn no_matches(&self, state: &ConversationState, candidates: Vec<Candidate>) -> Response {
        let bounded_budget = state.budget.is_some_and(|b| !b.is_unbounded());
        if bounded_budget {
            let without_budget = ConversationState {
                budget: None,
                ..state.clone()
            };
            let found = filter_and_rank(candidates.clone(), &without_budget.search_context())
                .map(|r| !r.is_empty())
                .unwrap_or(false);
            if found {
                return Response::new(
                    "I couldn't find any hotels within that budget. Would you like to drop the budget filter instead?",
                    &["Drop budget filter", CHANGE_LOCATION, START_OVER],
                );
            }
        }

        let preview = candidates.into_iter().take(FALLBACK_PREVIEW).collect();
        Response::new(
            "No hotels found matching your exact criteria. Here are our best properties!",
            &[SHOW_ALL, CHANGE_LOCATION, START_OVER],
        )
        .with_hotels(preview)
    }

    fn reprompt(&self, step: ConversationStep) -> Response {
        match step {
            ConversationStep::Location => {
                Response::new("Which location interests you?", &[]).with_suggestions(self.location_suggestions())
            }
            ConversationStep::Budget => {
                Response::new("Please select a budget range:", &[]).with_suggestions(budget_suggestions())
            }
            ConversationStep::Recommend => Response::new(
                "Tell me what to change, or start over.",
                &["Show more", SHOW_ALL, START_OVER],
            ),
        }
    }

    /// Let the copy service reword the reply. On failure the local reply is
    /// kept and the generic suggestions are guaranteed.
    fn polish(&self, user_message: &str, mut response: Response) -> Response {
        let Some(copy) = &self.copy else {
            return response;
        };
        if response.request.is_some() {
            return response;
        }

        let catalog_context = self
            .catalog
            .candidates()
            .iter()
            .map(Candidate::catalog_line)
            .collect::<Vec<_>>()
            .join("\n");
        let request = CopyRequest {
            user_message,
            draft: &response.text,
            catalog_context: &catalog_context,
        };

        match copy.rewrite(&request) {
            Ok(reply) => {
                response.text = reply.text;
                if !reply.suggestions.is_empty() {
                    response.suggestions = reply.suggestions;
                }
            }
            Err(e) => {
                warn!("Copy service {} failed: {}", copy.name(), e);
                for generic in [START_OVER, SHOW_ALL] {
                    if !response.suggestions.iter().any(|s| s == generic) {
                        response.suggestions.push(generic.to_string());
                    }
                }
            }
        }
        response
    }

    fn place_chip(&self, token: &str) -> String {
        format!("{} ({} hotels)", display_place(token), self.catalog.count_in(token))
    }

    fn location_suggestions(&self) -> Vec<String> {
        vec![
            USE_MY_LOCATION.to_string(),
            self.place_chip(PLACES[0]),
            self.place_chip(PLACES[1]),
            SHOW_ALL.to_string(),
        ]
    }

    fn restart_suggestions(&self) -> Vec<String> {
        vec![
            self.place_chip(PLACES[0]),
            self.place_chip(PLACES[1]),
            self.place_chip(PLACES[2]),
            SHOW_ALL.to_string(),
        ]
    }
}

impl Session {
    /// Run one turn through `engine` and apply the result.
    pub fn respond(&mut self, engine: &ConversationEngine, input: &TurnInput) -> Response {
        let ticket = self.begin_turn();
        let (response, next) = engine.step(input, self.state());
        if response.restarted {
            self.restart();
        } else {
            self.commit(ticket, next);
        }
        response
    }
}

fn budget_suggestions() -> Vec<String> {
    vec![
        format!("Under Rs. {}", group_thousands(LOW_PRICE_THRESHOLD)),
        format!(
            "Rs. {} - {}",
            group_thousands(LOW_PRICE_THRESHOLD),
            group_thousands(HIGH_PRICE_THRESHOLD)
        ),
        format!("Above Rs. {}", group_thousands(HIGH_PRICE_THRESHOLD)),
        "Any budget".to_string(),
    ]
}

fn display_place(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `18500` -> `"18,500"`
fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
