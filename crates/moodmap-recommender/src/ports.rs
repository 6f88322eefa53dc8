//! Seams to the external collaborators.
//!
//! Production implementations wrap the Gemini and Places clients; tests
//! substitute scripted fakes.

use std::future::Future;

use moodmap_core::Origin;
use moodmap_gemini::GeminiClient;
use moodmap_places::{NearbySearchRequest, PhotoMedia, PlacesClient, PlacesError, RawPlace};

use crate::error::{GenerationError, LocateError};

/// Sends a prompt to a text-generation model and returns its reply text.
pub trait TextGenerator {
    fn generate(&self, prompt: &str)
        -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Runs nearby searches and resolves photo references.
pub trait PlaceSearcher {
    fn search_nearby(
        &self,
        request: &NearbySearchRequest,
    ) -> impl Future<Output = Result<Vec<RawPlace>, PlacesError>> + Send;

    fn photo_media(&self) -> PhotoMedia;
}

/// Reports the user's current position.
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<Origin, LocateError>> + Send;
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(self.generate_json(prompt).await?)
    }
}

impl PlaceSearcher for PlacesClient {
    async fn search_nearby(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        PlacesClient::search_nearby(self, request).await
    }

    fn photo_media(&self) -> PhotoMedia {
        PlacesClient::photo_media(self)
    }
}
