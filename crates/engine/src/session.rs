//! Conversation state and the session that owns it.
//!
//! `ConversationEngine::step` never mutates anything. A `Session` holds the
//! current state and applies the engine's result only if no restart
//! happened while the turn was being computed.

use catalog::Coordinate;
use pipeline::{BudgetRange, SearchContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stage of the guided dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConversationStep {
    #[default]
    Location,
    Budget,
    Recommend,
}

/// Preferences gathered so far in one session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversationState {
    pub step: ConversationStep,
    /// Lowercase place token; `None` means all places
    pub selected_location: Option<String>,
    pub budget: Option<BudgetRange>,
    pub last_anchor: Option<Coordinate>,
    /// Sort by distance from `last_anchor` instead of filtering by place
    pub sort_by_distance: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search preferences derived from this state.
    pub fn search_context(&self) -> SearchContext {
        SearchContext {
            location: self.selected_location.clone(),
            budget: self.budget,
            anchor: self.last_anchor.filter(|_| self.sort_by_distance),
        }
    }

    /// Back to `Location` with location and budget cleared.
    ///
    /// The last known position survives: the device did not move just
    /// because the traveler started over.
    pub fn restarted(&self) -> Self {
        Self {
            last_anchor: self.last_anchor,
            ..Self::default()
        }
    }
}

/// Who the engine is talking to.
///
/// Passed in explicitly; nothing is read from ambient storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub traveler_name: Option<String>,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            traveler_name: None,
        }
    }

    pub fn with_traveler_name(mut self, name: impl Into<String>) -> Self {
        self.traveler_name = Some(name.into());
        self
    }
}

/// Proof that a turn started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTicket {
    generation: u64,
}

/// The single owner of a conversation's state.
#[derive(Debug, Clone)]
pub struct Session {
    context: SessionContext,
    state: ConversationState,
    generation: u64,
}

impl Session {
    pub fn new(context: SessionContext) -> Self {
        Self {
            context,
            state: ConversationState::new(),
            generation: 0,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a turn. The ticket must be handed back to `commit`.
    pub fn begin_turn(&self) -> TurnTicket {
        TurnTicket {
            generation: self.generation,
        }
    }

    /// Apply the state computed for a turn.
    ///
    /// Returns `false` and drops the state when the session was restarted
    /// after the ticket was issued.
    pub fn commit(&mut self, ticket: TurnTicket, state: ConversationState) -> bool {
        if ticket.generation != self.generation {
            debug!(
                session = %self.context.session_id,
                "Dropping stale turn from generation {} (now {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.state = state;
        true
    }

    /// Reset the conversation and invalidate every outstanding ticket.
    pub fn restart(&mut self) {
        self.state = self.state.restarted();
        self.generation += 1;
        debug!(session = %self.context.session_id, "Session restarted (generation {})", self.generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommending() -> ConversationState {
        ConversationState {
            step: ConversationStep::Recommend,
            selected_location: Some("pokhara".to_string()),
            budget: Some(BudgetRange::under(10_000)),
            last_anchor: Some(Coordinate::new(28.2, 83.9)),
            sort_by_distance: false,
        }
    }

    #[test]
    fn test_restarted_clears_preferences() {
        let state = recommending().restarted();
        assert_eq!(state.step, ConversationStep::Location);
        assert!(state.selected_location.is_none());
        assert!(state.budget.is_none());
        assert!(state.last_anchor.is_some());
        assert!(!state.sort_by_distance);
    }

    #[test]
    fn test_search_context_mirrors_state() {
        let context = recommending().search_context();
        assert_eq!(context.location.as_deref(), Some("pokhara"));
        assert_eq!(context.budget, Some(BudgetRange::under(10_000)));
        // A known position alone does not switch to distance sorting
        assert!(context.anchor.is_none());

        let nearby = ConversationState {
            sort_by_distance: true,
            ..recommending()
        };
        assert!(nearby.search_context().anchor.is_some());
    }

    #[test]
    fn test_commit_applies_current_ticket() {
        let mut session = Session::new(SessionContext::new("s1"));
        let ticket = session.begin_turn();

        assert!(session.commit(ticket, recommending()));
        assert_eq!(session.state().step, ConversationStep::Recommend);
    }

    #[test]
    fn test_stale_ticket_dropped_after_restart() {
        let mut session = Session::new(SessionContext::new("s1"));
        let slow = session.begin_turn();

        session.restart();
        assert!(!session.commit(slow, recommending()));
        assert_eq!(session.state().step, ConversationStep::Location);

        let fresh = session.begin_turn();
        assert!(session.commit(fresh, recommending()));
    }

    #[test]
    fn test_context_builder() {
        let context = SessionContext::new("abc").with_traveler_name("Asha");
        assert_eq!(context.traveler_name.as_deref(), Some("Asha"));
    }
}
