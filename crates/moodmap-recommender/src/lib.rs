//! Mood-driven place recommendations.
//!
//! Turns a mood key or a free-text vibe into a nearby search, normalizes the
//! results, and produces an AI vibe summary for the selected place. State
//! lives in a single [`SessionStore`]; every asynchronous completion is
//! validated against a request ticket so superseded results never apply.

pub mod error;
pub mod gateway;
pub mod interpreter;
pub mod locate;
pub mod ports;
pub mod recommender;
pub mod reply;
pub mod session;
pub mod vibe;

#[cfg(test)]
mod testing;

pub use error::{
    GenerationError, InterpretationError, LocateError, RecommendError, SearchError,
    VibeAnalysisError,
};
pub use gateway::PlaceSearchGateway;
pub use interpreter::{QueryInput, QueryInterpreter};
pub use locate::{resolve_origin, FixedLocation};
pub use ports::{Geolocator, PlaceSearcher, TextGenerator};
pub use recommender::{Recommender, VibeDelivery};
pub use session::{SearchResult, SearchStatus, SessionState, SessionStore, VibeState, VibeTicket};
pub use vibe::{VibeAnalyzer, VibeOutcome};
