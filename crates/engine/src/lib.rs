//! Traveler-facing orchestration.
//!
//! This crate ties the catalog, candidate sources, ranking and routing
//! together into the two flows a UI drives:
//! - `ConversationEngine`: a guided Location -> Budget -> Recommend dialogue
//!   over the lodging catalog, with restart available at every step
//! - `Explorer`: the map flow around the device position, with route
//!   overlays to a selected lodging
//!
//! `EngineConfig` builds both from one JSON file.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{ConversationEngine, EngineConfig, Session, SessionContext, TurnInput};
//!
//! let config = EngineConfig::load(None)?;
//! let engine = ConversationEngine::new(Arc::new(config.catalog()?));
//! let mut session = Session::new(SessionContext::new("demo"));
//!
//! println!("{}", engine.greeting(session.context()).text);
//! let reply = session.respond(&engine, &TurnInput::text("Pokhara"));
//! let reply = session.respond(&engine, &TurnInput::text("Under Rs. 10,000"));
//! for hotel in &reply.hotels {
//!     println!("{}", hotel.catalog_line());
//! }
//! ```

pub mod config;
pub mod conversation;
pub mod copy;
pub mod explorer;
pub mod geolocation;
pub mod intents;
pub mod session;

pub use config::{COPY_API_KEY_ENV, CopyConfig, DEFAULT_FALLBACK_ANCHOR, EngineConfig};
pub use conversation::{
    ConversationEngine, DEFAULT_RESULT_CAP, DeviceRequest, FALLBACK_PREVIEW, Response, TurnInput,
};
pub use copy::{CopyError, CopyReply, CopyRequest, CopyService, MistralCopyClient, parse_suggestions};
pub use explorer::{ExploreView, Explorer};
pub use geolocation::{AnchorLatch, GeoFix, GeolocationError};
pub use intents::{Intent, classify};
pub use session::{ConversationState, ConversationStep, Session, SessionContext, TurnTicket};
