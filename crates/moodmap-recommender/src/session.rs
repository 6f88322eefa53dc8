//! Session state and its transitions.
//!
//! [`SessionState`] is an immutable record: every transition consumes the
//! old state and returns the new one. [`SessionStore`] is the single owner
//! and the only way to apply a transition.
//!
//! Asynchronous work is paired with a ticket carrying a token from one
//! monotonically increasing counter. A completion applies only while its
//! token is still the pending one; anything older is dropped
//! (last request wins). Nothing is cancelled at the transport level.

use std::sync::{Mutex, PoisonError};

use moodmap_core::{Origin, Place, SearchSpec, VibeScore};
use moodmap_places::relocate_places;

use crate::vibe::VibeOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VibeTicket {
    token: u64,
    place_id: String,
}

impl VibeTicket {
    #[must_use]
    pub fn place_id(&self) -> &str {
        &self.place_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Loaded,
    /// The search ran (or the query could not be interpreted) and nothing
    /// is shown.
    NoResults,
    /// The provider failed; the list was cleared.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibeState {
    Idle,
    Loading,
    Ready(VibeScore),
    Fallback(VibeScore),
}

impl VibeState {
    /// Score to render, once analysis has completed.
    #[must_use]
    pub fn score(&self) -> Option<&VibeScore> {
        match self {
            VibeState::Ready(score) | VibeState::Fallback(score) => Some(score),
            VibeState::Idle | VibeState::Loading => None,
        }
    }
}

impl From<VibeOutcome> for VibeState {
    fn from(outcome: VibeOutcome) -> Self {
        match outcome {
            VibeOutcome::Ready(score) => VibeState::Ready(score),
            VibeOutcome::Fallback(score) => VibeState::Fallback(score),
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Found {
        spec: SearchSpec,
        /// Catalog key when the search came from a mood button.
        mood_key: Option<String>,
        places: Vec<Place>,
        /// Origin the distances were computed against.
        origin: Origin,
    },
    /// Nothing to search for; the session drops the previous mood too.
    Uninterpretable,
    /// The provider failed for the attempted search.
    Failed {
        spec: SearchSpec,
        mood_key: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    origin: Origin,
    active_search: Option<SearchSpec>,
    selected_mood: Option<String>,
    places: Vec<Place>,
    selected_place: Option<String>,
    search: SearchStatus,
    vibe: VibeState,
    last_token: u64,
    pending_search: Option<u64>,
    pending_vibe: Option<u64>,
}

impl SessionState {
    #[must_use]
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            active_search: None,
            selected_mood: None,
            places: Vec::new(),
            selected_place: None,
            search: SearchStatus::Idle,
            vibe: VibeState::Idle,
            last_token: 0,
            pending_search: None,
            pending_vibe: None,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    #[must_use]
    pub fn active_search(&self) -> Option<&SearchSpec> {
        self.active_search.as_ref()
    }

    #[must_use]
    pub fn selected_mood(&self) -> Option<&str> {
        self.selected_mood.as_deref()
    }

    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn selected_place(&self) -> Option<&Place> {
        let id = self.selected_place.as_deref()?;
        self.places.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn search_status(&self) -> SearchStatus {
        self.search
    }

    #[must_use]
    pub fn vibe(&self) -> &VibeState {
        &self.vibe
    }

    fn next_token(&mut self) -> u64 {
        self.last_token += 1;
        self.last_token
    }

    /// Marks a search as in flight. Any earlier pending search becomes stale.
    #[must_use]
    pub fn begin_search(mut self) -> (Self, SearchTicket) {
        let token = self.next_token();
        self.pending_search = Some(token);
        self.search = SearchStatus::Loading;
        (self, SearchTicket(token))
    }

    #[must_use]
    pub fn is_current_search(&self, ticket: SearchTicket) -> bool {
        self.pending_search == Some(ticket.0)
    }

    /// Applies a search completion. Stale tickets leave the state untouched.
    ///
    /// Any completion replaces the list wholesale and clears the selection,
    /// which also invalidates an in-flight vibe analysis. The active mood and
    /// label always describe the latest attempt, never an earlier search.
    #[must_use]
    pub fn finish_search(mut self, ticket: SearchTicket, result: SearchResult) -> Self {
        if !self.is_current_search(ticket) {
            tracing::debug!(token = ticket.0, "discarding stale search result");
            return self;
        }
        self.pending_search = None;
        self.selected_place = None;
        self.pending_vibe = None;
        self.vibe = VibeState::Idle;

        match result {
            SearchResult::Found {
                spec,
                mood_key,
                places,
                origin,
            } => {
                self.places = if origin == self.origin {
                    places
                } else {
                    relocate_places(&places, self.origin)
                };
                self.search = if self.places.is_empty() {
                    SearchStatus::NoResults
                } else {
                    SearchStatus::Loaded
                };
                self.selected_mood = mood_key;
                self.active_search = Some(spec);
            }
            SearchResult::Uninterpretable => {
                self.places = Vec::new();
                self.search = SearchStatus::NoResults;
                self.selected_mood = None;
                self.active_search = None;
            }
            SearchResult::Failed { spec, mood_key } => {
                self.places = Vec::new();
                self.search = SearchStatus::Failed;
                self.selected_mood = mood_key;
                self.active_search = Some(spec);
            }
        }
        self
    }

    /// Selects a place and starts a vibe analysis for it.
    ///
    /// Returns no ticket when `place_id` is not in the current list; the
    /// state is then unchanged.
    #[must_use]
    pub fn begin_vibe(mut self, place_id: &str) -> (Self, Option<VibeTicket>) {
        if !self.places.iter().any(|p| p.id == place_id) {
            return (self, None);
        }
        let token = self.next_token();
        self.selected_place = Some(place_id.to_string());
        self.pending_vibe = Some(token);
        self.vibe = VibeState::Loading;
        let ticket = VibeTicket {
            token,
            place_id: place_id.to_string(),
        };
        (self, Some(ticket))
    }

    #[must_use]
    pub fn is_current_vibe(&self, ticket: &VibeTicket) -> bool {
        self.pending_vibe == Some(ticket.token)
            && self.selected_place.as_deref() == Some(ticket.place_id.as_str())
    }

    /// Applies a vibe completion. Stale tickets leave the state untouched.
    #[must_use]
    pub fn finish_vibe(mut self, ticket: &VibeTicket, outcome: VibeOutcome) -> Self {
        if !self.is_current_vibe(ticket) {
            tracing::debug!(
                token = ticket.token,
                place_id = %ticket.place_id,
                "discarding stale vibe result"
            );
            return self;
        }
        self.pending_vibe = None;
        self.vibe = outcome.into();
        self
    }

    /// Closes the detail view. Any in-flight analysis becomes stale.
    #[must_use]
    pub fn deselect(mut self) -> Self {
        self.selected_place = None;
        self.pending_vibe = None;
        self.vibe = VibeState::Idle;
        self
    }

    /// Moves the origin and recomputes distances for the current list.
    #[must_use]
    pub fn relocate(mut self, origin: Origin) -> Self {
        if origin != self.origin {
            self.places = relocate_places(&self.places, origin);
            self.origin = origin;
        }
        self
    }
}

/// Single owner of the session state.
///
/// The lock is only held while a transition runs and never across an
/// await point.
#[derive(Debug)]
pub struct SessionStore {
    state: Mutex<SessionState>,
}

impl SessionStore {
    #[must_use]
    pub fn new(initial: SessionState) -> Self {
        Self {
            state: Mutex::new(initial),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies `transition` and returns its side value.
    pub fn update<R>(&self, transition: impl FnOnce(SessionState) -> (SessionState, R)) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        // Keep the counter in the placeholder so a panicking transition
        // cannot revive old tickets after poison recovery.
        let placeholder = guard.clone();
        let current = std::mem::replace(&mut *guard, placeholder);
        let (next, value) = transition(current);
        *guard = next;
        value
    }
}

#[cfg(test)]
mod tests {
    use moodmap_core::{format_distance, DEFAULT_ORIGIN};

    use super::*;

    fn place(id: &str, lat: f64) -> Place {
        let location = Origin::new(lat, DEFAULT_ORIGIN.lng);
        let distance = moodmap_core::distance_meters(DEFAULT_ORIGIN, location);
        Place {
            id: id.to_string(),
            name: id.to_uppercase(),
            location,
            rating: None,
            rating_count: None,
            photo_uri: None,
            summary_text: None,
            distance_meters: distance,
            distance_text: format_distance(distance),
        }
    }

    fn spec() -> SearchSpec {
        SearchSpec {
            place_type: "cafe".to_string(),
            label: "☕ Cafe".to_string(),
            keyword: None,
        }
    }

    fn found(places: Vec<Place>) -> SearchResult {
        SearchResult::Found {
            spec: spec(),
            mood_key: Some("cafe".to_string()),
            places,
            origin: DEFAULT_ORIGIN,
        }
    }

    fn failed(mood: &str, label: &str) -> SearchResult {
        SearchResult::Failed {
            spec: SearchSpec {
                place_type: mood.to_string(),
                label: label.to_string(),
                keyword: None,
            },
            mood_key: Some(mood.to_string()),
        }
    }

    fn loaded() -> SessionState {
        let (state, ticket) = SessionState::new(DEFAULT_ORIGIN).begin_search();
        state.finish_search(ticket, found(vec![place("a", 12.98), place("b", 12.99)]))
    }

    fn score(summary: &str) -> VibeScore {
        VibeScore::clamped(10.0, 20.0, 30.0, summary.to_string())
    }

    #[test]
    fn search_lifecycle_loads_places() {
        let (state, ticket) = SessionState::new(DEFAULT_ORIGIN).begin_search();
        assert_eq!(state.search_status(), SearchStatus::Loading);
        let state = state.finish_search(ticket, found(vec![place("a", 12.98)]));
        assert_eq!(state.search_status(), SearchStatus::Loaded);
        assert_eq!(state.places().len(), 1);
        assert_eq!(state.selected_mood(), Some("cafe"));
        assert_eq!(state.active_search().map(|s| s.label.as_str()), Some("☕ Cafe"));
    }

    #[test]
    fn empty_search_is_no_results() {
        let (state, ticket) = SessionState::new(DEFAULT_ORIGIN).begin_search();
        let state = state.finish_search(ticket, found(vec![]));
        assert_eq!(state.search_status(), SearchStatus::NoResults);
    }

    #[test]
    fn stale_search_result_is_discarded() {
        let (state, first) = SessionState::new(DEFAULT_ORIGIN).begin_search();
        let (state, second) = state.begin_search();
        let state = state.finish_search(second, found(vec![place("new", 12.98)]));
        let state = state.finish_search(first, found(vec![place("old", 12.99)]));
        assert_eq!(state.places()[0].id, "new");
    }

    #[test]
    fn failed_search_clears_list_and_selection() {
        let (state, _) = loaded().begin_vibe("a");
        let (state, ticket) = state.begin_search();
        let state = state.finish_search(ticket, failed("park", "🌳 Park"));
        assert!(state.places().is_empty());
        assert!(state.selected_place().is_none());
        assert_eq!(state.search_status(), SearchStatus::Failed);
        assert_eq!(state.vibe(), &VibeState::Idle);
    }

    #[test]
    fn failed_search_shows_attempted_mood() {
        let (state, ticket) = loaded().begin_search();
        let state = state.finish_search(ticket, failed("park", "🌳 Park"));
        assert_eq!(state.selected_mood(), Some("park"));
        assert_eq!(state.active_search().map(|s| s.label.as_str()), Some("🌳 Park"));
    }

    #[test]
    fn uninterpretable_query_is_no_results() {
        let (state, ticket) = loaded().begin_search();
        let state = state.finish_search(ticket, SearchResult::Uninterpretable);
        assert!(state.places().is_empty());
        assert_eq!(state.search_status(), SearchStatus::NoResults);
    }

    #[test]
    fn uninterpretable_query_drops_previous_mood() {
        let (state, ticket) = loaded().begin_search();
        let state = state.finish_search(ticket, SearchResult::Uninterpretable);
        assert!(state.selected_mood().is_none());
        assert!(state.active_search().is_none());
    }

    #[test]
    fn begin_vibe_unknown_place_changes_nothing() {
        let before = loaded();
        let (after, ticket) = before.clone().begin_vibe("zzz");
        assert!(ticket.is_none());
        assert_eq!(after, before);
    }

    #[test]
    fn vibe_lifecycle_idle_loading_ready() {
        let state = loaded();
        assert_eq!(state.vibe(), &VibeState::Idle);
        let (state, ticket) = state.begin_vibe("a");
        let ticket = ticket.unwrap();
        assert_eq!(state.vibe(), &VibeState::Loading);
        assert_eq!(state.selected_place().map(|p| p.id.as_str()), Some("a"));
        let state = state.finish_vibe(&ticket, VibeOutcome::Ready(score("Calm.")));
        assert_eq!(state.vibe(), &VibeState::Ready(score("Calm.")));
    }

    #[test]
    fn superseded_vibe_never_overwrites_newer_selection() {
        let (state, a) = loaded().begin_vibe("a");
        let (state, b) = state.begin_vibe("b");
        let state = state.finish_vibe(&b.unwrap(), VibeOutcome::Ready(score("B")));
        let state = state.finish_vibe(&a.unwrap(), VibeOutcome::Ready(score("A")));
        assert_eq!(state.vibe().score().map(|s| s.summary.as_str()), Some("B"));
        assert_eq!(state.selected_place().map(|p| p.id.as_str()), Some("b"));
    }

    #[test]
    fn reselecting_same_place_discards_first_analysis() {
        let (state, first) = loaded().begin_vibe("a");
        let (state, second) = state.begin_vibe("a");
        let state = state.finish_vibe(&first.unwrap(), VibeOutcome::Ready(score("old")));
        assert_eq!(state.vibe(), &VibeState::Loading);
        let state = state.finish_vibe(&second.unwrap(), VibeOutcome::Fallback(VibeScore::fallback()));
        assert_eq!(state.vibe(), &VibeState::Fallback(VibeScore::fallback()));
    }

    #[test]
    fn deselect_invalidates_pending_vibe() {
        let (state, ticket) = loaded().begin_vibe("a");
        let state = state.deselect();
        let state = state.finish_vibe(&ticket.unwrap(), VibeOutcome::Ready(score("late")));
        assert_eq!(state.vibe(), &VibeState::Idle);
        assert!(state.selected_place().is_none());
    }

    #[test]
    fn new_search_invalidates_pending_vibe() {
        let (state, vibe) = loaded().begin_vibe("a");
        let (state, search) = state.begin_search();
        let state = state.finish_search(search, found(vec![place("a", 12.98)]));
        let state = state.finish_vibe(&vibe.unwrap(), VibeOutcome::Ready(score("late")));
        assert_eq!(state.vibe(), &VibeState::Idle);
    }

    #[test]
    fn relocate_recomputes_distances() {
        let state = loaded().relocate(Origin::new(12.98, DEFAULT_ORIGIN.lng));
        assert_eq!(state.places()[0].distance_text, "0m");
        assert_eq!(state.origin(), Origin::new(12.98, DEFAULT_ORIGIN.lng));
    }

    #[test]
    fn results_from_old_origin_are_recomputed_on_arrival() {
        let (state, ticket) = SessionState::new(DEFAULT_ORIGIN).begin_search();
        let state = state.relocate(Origin::new(12.98, DEFAULT_ORIGIN.lng));
        let state = state.finish_search(ticket, found(vec![place("a", 12.98)]));
        assert_eq!(state.places()[0].distance_text, "0m");
    }

    #[test]
    fn store_recovers_from_panicking_transition_without_reusing_tickets() {
        let store = SessionStore::new(loaded());
        let stale = store.update(SessionState::begin_search);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.update(|_| -> (SessionState, ()) { panic!("transition failed") });
        }));
        assert!(result.is_err());

        let (_, fresh) = store.snapshot().begin_search();
        assert_ne!(fresh, stale);
        assert!(store.snapshot().is_current_search(stale));
    }

    #[test]
    fn store_update_returns_side_value() {
        let store = SessionStore::new(SessionState::new(DEFAULT_ORIGIN));
        let ticket = store.update(SessionState::begin_search);
        assert!(store.snapshot().is_current_search(ticket));
        assert_eq!(store.snapshot().search_status(), SearchStatus::Loading);
    }
}
