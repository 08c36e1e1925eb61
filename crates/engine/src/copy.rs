//! Optional conversational copy service.
//!
//! A text-completion model rewrites the locally computed reply so the
//! conversation reads less canned. It only ever touches the reply text and
//! the suggestion chips: transitions and result lists come from the rule
//! table regardless of what the model says.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_COPY_ENDPOINT: &str = "https://api.mistral.ai/v1/chat/completions";
pub const DEFAULT_COPY_MODEL: &str = "mistral-small-latest";

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("copy service is not configured")]
    Unconfigured,

    #[error("copy service request failed: {0}")]
    Network(String),

    #[error("invalid copy service response: {0}")]
    InvalidResponse(String),
}

/// What the copy service gets to work with.
#[derive(Debug, Clone)]
pub struct CopyRequest<'a> {
    pub user_message: &'a str,
    /// The locally computed reply
    pub draft: &'a str,
    /// One `Candidate::catalog_line` per lodging
    pub catalog_context: &'a str,
}

/// A rewritten reply. Empty `suggestions` means "keep the local ones".
#[derive(Debug, Clone, PartialEq)]
pub struct CopyReply {
    pub text: String,
    pub suggestions: Vec<String>,
}

pub trait CopyService: Send + Sync {
    fn name(&self) -> &str;

    fn rewrite(&self, request: &CopyRequest<'_>) -> Result<CopyReply, CopyError>;
}

/// Split a trailing `[SUGGESTIONS: a, b, c]` block off a model reply.
///
/// The marker is matched case-insensitively. Without a block the text is
/// returned trimmed with no suggestions.
pub fn parse_suggestions(reply: &str) -> (String, Vec<String>) {
    const MARKER: &str = "[suggestions:";

    let lower = reply.to_ascii_lowercase();
    let Some(start) = lower.find(MARKER) else {
        return (reply.trim().to_string(), Vec::new());
    };
    let Some(len) = lower[start..].find(']') else {
        return (reply.trim().to_string(), Vec::new());
    };
    let end = start + len;

    let suggestions = reply[start + MARKER.len()..end]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let mut text = String::with_capacity(reply.len());
    text.push_str(&reply[..start]);
    text.push_str(&reply[end + 1..]);
    (text.trim().to_string(), suggestions)
}

fn system_prompt(request: &CopyRequest<'_>) -> String {
    format!(
        "You are a helpful assistant for hotel bookings in Nepal.\n\
         Answer SHORT and SWEET (2 sentences max).\n\n\
         HOTEL DATABASE:\n{}\n\n\
         The answer you must convey, in your own words:\n{}\n\n\
         RULES:\n\
         1. Always end your response with exactly 3-4 relevant suggestion chips in this format: \
         [SUGGESTIONS: Suggestion 1, Suggestion 2, Suggestion 3]\n\
         2. Suggestions should be very short clickable topics (e.g., \"Kathmandu Hotels\", \"Under Rs. 10000\", \"Top Rated\").\n\
         3. Be friendly and professional.",
        request.catalog_context, request.draft
    )
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: String,
}

/// Client for a Mistral-compatible chat completions endpoint.
pub struct MistralCopyClient {
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl MistralCopyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_COPY_ENDPOINT.to_string(),
            model: DEFAULT_COPY_MODEL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CopyService for MistralCopyClient {
    fn name(&self) -> &str {
        "mistral"
    }

    fn rewrite(&self, request: &CopyRequest<'_>) -> Result<CopyReply, CopyError> {
        if self.api_key.trim().is_empty() {
            return Err(CopyError::Unconfigured);
        }

        let system = system_prompt(request);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: request.user_message,
                },
            ],
            temperature: 0.7,
            max_tokens: 300,
        };

        let response = ureq::post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .send_json(&body)
            .map_err(|e| CopyError::Network(e.to_string()))?;

        let reply: ChatResponse = response
            .into_json()
            .map_err(|e| CopyError::InvalidResponse(e.to_string()))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CopyError::InvalidResponse("no choices".to_string()))?;

        let (text, suggestions) = parse_suggestions(&content);
        if text.is_empty() {
            return Err(CopyError::InvalidResponse("empty reply".to_string()));
        }
        debug!("Copy service returned {} suggestions", suggestions.len());
        Ok(CopyReply { text, suggestions })
    }
}
