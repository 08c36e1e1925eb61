// End-to-end conversation scenarios over the built-in catalog

use catalog::{Catalog, Coordinate};
use engine::{
    ConversationEngine, ConversationState, ConversationStep, CopyError, CopyReply, CopyRequest, CopyService,
    DeviceRequest, GeolocationError, Session, SessionContext, TurnInput,
};
use pipeline::BudgetRange;
use std::sync::Arc;

fn create_test_engine() -> ConversationEngine {
    ConversationEngine::new(Arc::new(Catalog::builtin()))
}

fn create_test_session() -> Session {
    Session::new(SessionContext::new("test-session"))
}

fn say(session: &mut Session, engine: &ConversationEngine, text: &str) -> engine::Response {
    session.respond(engine, &TurnInput::text(text))
}

fn ids(response: &engine::Response) -> Vec<u64> {
    response.hotels.iter().map(|h| h.id).collect()
}

struct FailingCopy;

impl CopyService for FailingCopy {
    fn name(&self) -> &str {
        "failing"
    }

    fn rewrite(&self, _request: &CopyRequest<'_>) -> Result<CopyReply, CopyError> {
        Err(CopyError::Network("connection refused".to_string()))
    }
}

struct CheerfulCopy;

impl CopyService for CheerfulCopy {
    fn name(&self) -> &str {
        "cheerful"
    }

    fn rewrite(&self, request: &CopyRequest<'_>) -> Result<CopyReply, CopyError> {
        assert!(request.catalog_context.contains("Hotel Yak & Yeti"));
        Ok(CopyReply {
            text: format!("Wonderful choice! {}", request.draft),
            suggestions: vec!["Top Rated".to_string()],
        })
    }
}

#[test]
fn test_kathmandu_under_ten_thousand() {
    let engine = create_test_engine();
    let mut session = create_test_session();

    let reply = say(&mut session, &engine, "Kathmandu");
    assert_eq!(session.state().step, ConversationStep::Budget);
    assert!(reply.hotels.is_empty());

    let reply = say(&mut session, &engine, "Under Rs. 10,000");
    assert_eq!(session.state().step, ConversationStep::Recommend);
    assert_eq!(session.state().budget, Some(BudgetRange::under(10_000)));
    assert_eq!(reply.text, "Found 2 hotels matching your preferences!");
    // Sorted by rating: Kathmandu Guest House 4.4, Thamel Eco Resort 4.2
    assert_eq!(ids(&reply), vec![2, 5]);
    assert!(reply.hotels.iter().all(|h| h.price_per_night < 10_000));
}

#[test]
fn test_kathmandu_under_ten_thousand_without_cheap_hotels() {
    let upscale = Catalog::from_candidates(
        Catalog::builtin()
            .in_locality("kathmandu")
            .into_iter()
            .filter(|c| c.price_per_night >= 10_000)
            .cloned()
            .collect(),
    );
    let engine = ConversationEngine::new(Arc::new(upscale));
    let mut session = create_test_session();

    say(&mut session, &engine, "Kathmandu");
    let reply = say(&mut session, &engine, "Under Rs. 10,000");
    assert!(reply.hotels.is_empty());
    assert!(reply.text.starts_with("I couldn't find any hotels within that budget."));
    assert!(reply.suggestions.iter().any(|s| s == "Start over"));

    let reply = say(&mut session, &engine, "Start over");
    assert!(reply.restarted);
    assert_eq!(session.state().step, ConversationStep::Location);
}

#[test]
fn test_restart_from_every_step() {
    let engine = create_test_engine();

    for setup in [vec![], vec!["Pokhara"], vec!["Pokhara", "Any budget"]] {
        let mut session = create_test_session();
        for text in &setup {
            say(&mut session, &engine, text);
        }

        let reply = say(&mut session, &engine, "Start over");
        assert!(reply.restarted);
        assert_eq!(reply.text, "Let's start fresh! Where would you like to stay?");
        assert_eq!(
            reply.suggestions,
            vec!["Kathmandu (5 hotels)", "Pokhara (4 hotels)", "Chitwan (3 hotels)", "Show all hotels"]
        );

        let state = session.state();
        assert_eq!(state.step, ConversationStep::Location);
        assert!(state.selected_location.is_none());
        assert!(state.budget.is_none());
        assert_eq!(session.generation(), 1);
    }
}

#[test]
fn test_recommend_reruns_with_current_preferences() {
    let engine = create_test_engine();
    let mut session = create_test_session();
    say(&mut session, &engine, "Pokhara");
    let first = say(&mut session, &engine, "Any budget");

    let again = say(&mut session, &engine, "Show more");
    assert_eq!(ids(&first), ids(&again));
    assert_eq!(session.state().step, ConversationStep::Recommend);

    let widened = say(&mut session, &engine, "Show all hotels");
    assert!(session.state().selected_location.is_none());
    assert_eq!(widened.text, "Found 14 hotels matching your preferences!");
    assert_eq!(widened.hotels.len(), 6);
}

#[test]
fn test_geolocation_shortcut() {
    let engine = create_test_engine();
    let mut session = create_test_session();

    let reply = say(&mut session, &engine, "Use my location");
    assert_eq!(reply.request, Some(DeviceRequest::Geolocation));
    assert_eq!(session.state().step, ConversationStep::Location);

    let thamel = Coordinate::new(27.7154, 85.3101);
    let reply = session.respond(&engine, &TurnInput::GeolocationFix(thamel));
    assert_eq!(session.state().step, ConversationStep::Recommend);
    assert_eq!(session.state().last_anchor, Some(thamel));
    assert_eq!(reply.text, "Found 14 hotels closest to you!");
    // Kathmandu Guest House sits exactly on the fix
    assert_eq!(reply.hotels[0].id, 2);
    // The five Kathmandu hotels are all closer than anything else
    assert!(reply.hotels[..5].iter().all(|h| h.locality.contains("Kathmandu")));
}

#[test]
fn test_geolocation_denied_reprompts_without_state_change() {
    let engine = create_test_engine();
    let mut session = create_test_session();

    let before = session.state().clone();
    let reply = session.respond(&engine, &TurnInput::GeolocationFailed(GeolocationError::PermissionDenied));
    assert_eq!(
        reply.text,
        "I couldn't access your location. Please check your location permissions."
    );
    assert!(!reply.suggestions.iter().any(|s| s.contains("my location")));
    assert_eq!(session.state(), &before);
}

#[test]
fn test_budget_miss_offers_looser_budget() {
    let engine = create_test_engine();
    let mut session = create_test_session();
    say(&mut session, &engine, "Lumbini");

    let reply = say(&mut session, &engine, "Above Rs. 20,000");
    assert!(reply.text.starts_with("I couldn't find any hotels within that budget."));
    assert!(reply.hotels.is_empty());
    assert_eq!(reply.suggestions, vec!["Drop budget filter", "Change location", "Start over"]);

    let reply = say(&mut session, &engine, "Drop budget filter");
    assert_eq!(session.state().budget, Some(BudgetRange::any()));
    assert_eq!(ids(&reply), vec![14]);
}

#[test]
fn test_location_miss_shows_preview() {
    let pokhara_only = Catalog::from_candidates(
        Catalog::builtin().in_locality("pokhara").into_iter().cloned().collect(),
    );
    let engine = ConversationEngine::new(Arc::new(pokhara_only));
    let mut session = create_test_session();

    let reply = say(&mut session, &engine, "Chitwan");
    assert!(reply.text.contains("I found 0 hotels in Chitwan"));
    assert!(!reply.text.contains("Prices range"));

    let reply = say(&mut session, &engine, "Any budget");
    assert_eq!(
        reply.text,
        "No hotels found matching your exact criteria. Here are our best properties!"
    );
    assert_eq!(ids(&reply), vec![6, 7, 8, 9]);
}

#[test]
fn test_copy_failure_falls_back_to_local_reply() {
    let engine = create_test_engine().with_copy_service(Box::new(FailingCopy));
    let mut session = create_test_session();

    let reply = say(&mut session, &engine, "Kathmandu");
    assert!(reply.text.starts_with("Great! I found 5 hotels in Kathmandu."));
    assert!(reply.suggestions.iter().any(|s| s == "Start over"));
    assert!(reply.suggestions.iter().any(|s| s == "Show all hotels"));
    assert_eq!(session.state().step, ConversationStep::Budget);
}

#[test]
fn test_copy_rewrites_text_but_not_results() {
    let plain = create_test_engine();
    let polished = create_test_engine().with_copy_service(Box::new(CheerfulCopy));

    let state = ConversationState {
        step: ConversationStep::Budget,
        selected_location: Some("pokhara".to_string()),
        ..ConversationState::new()
    };
    let input = TurnInput::text("Any budget");
    let (plain_reply, plain_state) = plain.step(&input, &state);
    let (polished_reply, polished_state) = polished.step(&input, &state);

    assert_eq!(plain_state, polished_state);
    assert_eq!(plain_reply.hotels, polished_reply.hotels);
    assert_eq!(polished_reply.text, format!("Wonderful choice! {}", plain_reply.text));
    assert_eq!(polished_reply.suggestions, vec!["Top Rated"]);
}

#[test]
fn test_stale_turn_is_dropped_after_restart() {
    let engine = create_test_engine();
    let mut session = create_test_session();

    // A slow turn starts, the traveler restarts before it lands
    let ticket = session.begin_turn();
    let (_, computed) = engine.step(&TurnInput::text("Pokhara"), session.state());
    session.restart();

    assert!(!session.commit(ticket, computed));
    assert_eq!(session.state().step, ConversationStep::Location);
    assert!(session.state().selected_location.is_none());
}
