//! Wires interpretation, search, and vibe analysis onto one session.

use std::sync::Arc;

use moodmap_core::{MoodCatalog, Origin, Place};

use crate::error::{RecommendError, SearchError};
use crate::gateway::PlaceSearchGateway;
use crate::interpreter::{QueryInput, QueryInterpreter};
use crate::ports::{PlaceSearcher, TextGenerator};
use crate::session::{SearchResult, SessionState, SessionStore};
use crate::vibe::{VibeAnalyzer, VibeOutcome};

/// What happened to a vibe analysis started by [`Recommender::select_place`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibeDelivery {
    /// The outcome is now the session's vibe.
    Applied(VibeOutcome),
    /// Another selection, a deselect, or a new search happened while the
    /// analysis was running; its outcome was dropped.
    Superseded,
    /// The id is not in the current result list.
    UnknownPlace,
}

pub struct Recommender<G, S> {
    interpreter: QueryInterpreter<G>,
    gateway: PlaceSearchGateway<S>,
    analyzer: VibeAnalyzer<G>,
    store: SessionStore,
}

impl<G, S> Recommender<G, S>
where
    G: TextGenerator,
    S: PlaceSearcher,
{
    /// Either collaborator may be absent. Without a generator free-text
    /// queries fail and every vibe falls back; without a searcher every
    /// search is a no-op.
    #[must_use]
    pub fn new(catalog: MoodCatalog, generator: Option<G>, searcher: Option<S>, origin: Origin) -> Self {
        let generator = generator.map(Arc::new);
        Self {
            interpreter: QueryInterpreter::new(catalog, generator.clone()),
            gateway: PlaceSearchGateway::new(searcher),
            analyzer: VibeAnalyzer::new(generator),
            store: SessionStore::new(SessionState::new(origin)),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &MoodCatalog {
        self.interpreter.catalog()
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    /// Runs one search and applies its outcome to the session.
    ///
    /// Returns the places from this search even when a newer search has
    /// already replaced them in the session.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Unavailable`] without touching the session when no
    ///   searcher is configured.
    /// - [`RecommendError::Interpretation`] after clearing the list.
    /// - [`SearchError::Provider`] after clearing the list.
    pub async fn search(&self, input: QueryInput) -> Result<Vec<Place>, RecommendError> {
        if !self.gateway.is_available() {
            tracing::debug!("place search not configured, ignoring search");
            return Err(SearchError::Unavailable.into());
        }

        let ticket = self.store.update(SessionState::begin_search);

        let spec = match self.interpreter.interpret(&input).await {
            Ok(spec) => spec,
            Err(e) => {
                tracing::warn!(error = %e, "could not interpret query");
                self.store
                    .update(|s| (s.finish_search(ticket, SearchResult::Uninterpretable), ()));
                return Err(e.into());
            }
        };

        // The origin is read after interpretation so a relocation during the
        // model call is honored.
        let origin = self.store.snapshot().origin();
        match self.gateway.search_places(&spec, origin).await {
            Ok(places) => {
                tracing::info!(
                    place_type = %spec.place_type,
                    label = %spec.label,
                    count = places.len(),
                    "search completed"
                );
                let result = SearchResult::Found {
                    spec,
                    mood_key: input.mood_key().map(str::to_string),
                    places: places.clone(),
                    origin,
                };
                self.store.update(|s| (s.finish_search(ticket, result), ()));
                Ok(places)
            }
            Err(e) => {
                tracing::warn!(place_type = %spec.place_type, error = %e, "place search failed");
                let result = SearchResult::Failed {
                    spec,
                    mood_key: input.mood_key().map(str::to_string),
                };
                self.store.update(|s| (s.finish_search(ticket, result), ()));
                Err(e.into())
            }
        }
    }

    /// Selects a place and runs its vibe analysis.
    pub async fn select_place(&self, place_id: &str) -> VibeDelivery {
        let Some(ticket) = self.store.update(|s| s.begin_vibe(place_id)) else {
            tracing::debug!(place_id, "selected place is not in the current list");
            return VibeDelivery::UnknownPlace;
        };
        let Some(place) = self.store.snapshot().selected_place().cloned() else {
            return VibeDelivery::Superseded;
        };

        let outcome = self.analyzer.assess(&place).await;

        self.store.update(|s| {
            if s.is_current_vibe(&ticket) {
                (s.finish_vibe(&ticket, outcome.clone()), VibeDelivery::Applied(outcome))
            } else {
                tracing::debug!(place_id, "vibe analysis superseded");
                (s, VibeDelivery::Superseded)
            }
        })
    }

    /// Closes the detail view.
    pub fn deselect(&self) {
        self.store.update(|s| (s.deselect(), ()));
    }

    /// Moves the search origin and recomputes distances for shown places.
    pub fn relocate(&self, origin: Origin) {
        tracing::info!(lat = origin.lat, lng = origin.lng, "origin changed");
        self.store.update(|s| (s.relocate(origin), ()));
    }
}
