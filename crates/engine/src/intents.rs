//! Free-text intent rules.
//!
//! An ordered table of `(steps, matcher)` rules. The first rule that is
//! active in the current step and whose matcher fires decides the intent.
//! Restart comes first and is active everywhere, so it always wins.
//!
//! Matching is case-insensitive keyword/substring checks on the raw text.

use crate::session::ConversationStep;
use pipeline::{BudgetRange, HIGH_PRICE_THRESHOLD, LOW_PRICE_THRESHOLD};

use ConversationStep::{Budget, Location, Recommend};

/// Place tokens the conversation recognizes.
pub const PLACES: [&str; 5] = ["kathmandu", "pokhara", "chitwan", "lumbini", "nagarkot"];

/// What the traveler asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Restart,
    /// Ask the device for its position
    UseMyLocation,
    /// A place token, or `None` for every place
    ChooseLocation(Option<String>),
    ChooseBudget(BudgetRange),
    /// Sort by distance from the last known position
    NearMe,
    /// Drop the budget restriction
    LoosenBudget,
    /// Drop the location restriction
    WidenLocation,
    /// Re-run the search with current preferences
    Refine,
}

pub struct IntentRule {
    pub name: &'static str,
    /// Steps in which the rule is active
    pub steps: &'static [ConversationStep],
    pub matcher: fn(&str) -> Option<Intent>,
}

const ANY_STEP: &[ConversationStep] = &[Location, Budget, Recommend];

/// Evaluated top to bottom.
pub const RULES: &[IntentRule] = &[
    IntentRule {
        name: "restart",
        steps: ANY_STEP,
        matcher: match_restart,
    },
    IntentRule {
        name: "use_my_location",
        steps: &[Location, Recommend],
        matcher: match_use_my_location,
    },
    IntentRule {
        name: "choose_location",
        steps: &[Location],
        matcher: match_location_or_all,
    },
    IntentRule {
        name: "choose_budget",
        steps: &[Budget],
        matcher: match_budget,
    },
    IntentRule {
        name: "near_me",
        steps: &[Recommend],
        matcher: match_near_me,
    },
    IntentRule {
        name: "loosen_budget",
        steps: &[Recommend],
        matcher: match_loosen_budget,
    },
    IntentRule {
        name: "widen_location",
        steps: &[Recommend],
        matcher: match_widen_location,
    },
    IntentRule {
        name: "switch_location",
        steps: &[Recommend],
        matcher: match_place,
    },
    IntentRule {
        name: "refine",
        steps: &[Recommend],
        matcher: match_refine,
    },
];

/// Classify a message in the given step. `None` means unrecognized.
pub fn classify(text: &str, step: ConversationStep) -> Option<Intent> {
    let text = text.to_lowercase();
    RULES
        .iter()
        .filter(|rule| rule.steps.contains(&step))
        .find_map(|rule| {
            let intent = (rule.matcher)(&text)?;
            tracing::trace!("Rule {} matched {:?}", rule.name, text);
            Some(intent)
        })
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn match_restart(text: &str) -> Option<Intent> {
    contains_any(text, &["start over", "restart", "change location"]).then_some(Intent::Restart)
}

fn match_use_my_location(text: &str) -> Option<Intent> {
    text.contains("my location").then_some(Intent::UseMyLocation)
}

fn match_place(text: &str) -> Option<Intent> {
    PLACES
        .iter()
        .find(|place| text.contains(*place))
        .map(|place| Intent::ChooseLocation(Some(place.to_string())))
}

fn match_location_or_all(text: &str) -> Option<Intent> {
    match_place(text).or_else(|| text.contains("all").then_some(Intent::ChooseLocation(None)))
}

fn match_budget(text: &str) -> Option<Intent> {
    let budget = if contains_any(text, &["under", "below"]) {
        BudgetRange::under(LOW_PRICE_THRESHOLD)
    } else if contains_any(text, &["10,000", "10000"]) && contains_any(text, &["20,000", "20000"]) {
        BudgetRange::between(LOW_PRICE_THRESHOLD, HIGH_PRICE_THRESHOLD)
    } else if contains_any(text, &["above", "over"]) {
        BudgetRange::above(HIGH_PRICE_THRESHOLD)
    } else if text.contains("any") {
        BudgetRange::any()
    } else {
        return None;
    };
    Some(Intent::ChooseBudget(budget))
}

fn match_near_me(text: &str) -> Option<Intent> {
    contains_any(text, &["near me", "nearby"]).then_some(Intent::NearMe)
}

fn match_loosen_budget(text: &str) -> Option<Intent> {
    contains_any(text, &["drop budget", "affordable", "any budget"]).then_some(Intent::LoosenBudget)
}

fn match_widen_location(text: &str) -> Option<Intent> {
    text.contains("show all").then_some(Intent::WidenLocation)
}

fn match_refine(_: &str) -> Option<Intent> {
    Some(Intent::Refine)
}
