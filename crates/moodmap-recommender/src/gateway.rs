//! Nearby search against the places collaborator.

use moodmap_core::{Origin, Place, SearchSpec};
use moodmap_places::{normalize_places, NearbySearchRequest, RawPlace};

use crate::error::SearchError;
use crate::ports::PlaceSearcher;

/// Issues the fixed-shape nearby search for a [`SearchSpec`].
///
/// Holds no searcher when the places provider is not configured; every
/// search then fails with [`SearchError::Unavailable`].
pub struct PlaceSearchGateway<S> {
    searcher: Option<S>,
}

impl<S: PlaceSearcher> PlaceSearchGateway<S> {
    #[must_use]
    pub fn new(searcher: Option<S>) -> Self {
        Self { searcher }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.searcher.is_some()
    }

    /// Searches for `spec.place_type` within 3 km of `origin`, closest first.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Unavailable`] if no searcher is configured.
    /// - [`SearchError::Provider`] on transport or provider failure.
    pub async fn search(
        &self,
        spec: &SearchSpec,
        origin: Origin,
    ) -> Result<Vec<RawPlace>, SearchError> {
        let searcher = self.searcher.as_ref().ok_or(SearchError::Unavailable)?;
        let request = NearbySearchRequest::closest_first(&spec.place_type, origin);
        Ok(searcher.search_nearby(&request).await?)
    }

    /// [`PlaceSearchGateway::search`] followed by normalization against the
    /// same origin.
    ///
    /// # Errors
    ///
    /// Same as [`PlaceSearchGateway::search`].
    pub async fn search_places(
        &self,
        spec: &SearchSpec,
        origin: Origin,
    ) -> Result<Vec<Place>, SearchError> {
        let raw = self.search(spec, origin).await?;
        let searcher = self.searcher.as_ref().ok_or(SearchError::Unavailable)?;
        Ok(normalize_places(&raw, origin, &searcher.photo_media()))
    }
}
