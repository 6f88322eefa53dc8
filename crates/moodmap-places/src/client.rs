//! HTTP client for the Places API (New).
//!
//! Wraps `reqwest` with API key headers, the fixed field mask, and typed
//! response deserialization. Non-2xx responses surface as
//! [`PlacesError::Api`] carrying the provider's error message.

use std::time::Duration;

use moodmap_core::Origin;
use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::normalize::PhotoMedia;
use crate::types::{
    Circle, ErrorEnvelope, LocationRestriction, NearbySearchRequest, RankPreference, RawPlace,
    SearchNearbyResponse,
};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";
const USER_AGENT: &str = "moodmap/0.1 (place-recommender)";

/// Radius of the circular search region around the origin.
pub const SEARCH_RADIUS_METERS: f64 = 3000.0;

/// Upper bound on results per search.
pub const MAX_RESULT_COUNT: u32 = 15;

/// Fields requested for every place. Anything else is billed but unused.
pub const FIELD_MASK: &str = "places.id,places.displayName,places.location,places.rating,\
places.userRatingCount,places.photos,places.editorialSummary";

impl NearbySearchRequest {
    /// Builds the one request shape this crate issues: places of
    /// `place_type` within [`SEARCH_RADIUS_METERS`] of `origin`, closest
    /// first, at most [`MAX_RESULT_COUNT`].
    #[must_use]
    pub fn closest_first(place_type: &str, origin: Origin) -> Self {
        Self {
            included_primary_types: vec![place_type.to_string()],
            max_result_count: MAX_RESULT_COUNT,
            rank_preference: RankPreference::Distance,
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: origin.into(),
                    radius: SEARCH_RADIUS_METERS,
                },
            },
        }
    }
}

/// Client for the Places API (New).
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
    search_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let search_url = Url::parse(&format!("{base_url}/v1/places:searchNearby")).map_err(|e| {
            PlacesError::InvalidBaseUrl {
                url: base_url.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            search_url,
        })
    }

    /// Resolver for photo references returned by this client.
    #[must_use]
    pub fn photo_media(&self) -> PhotoMedia {
        PhotoMedia::new(&self.base_url, &self.api_key)
    }

    /// Runs a nearby search and returns the raw records in provider order.
    ///
    /// An empty result set is `Ok(vec![])`, not an error.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Api`] if the API returns a non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_nearby(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let response = self
            .client
            .post(self.search_url.clone())
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        let parsed: SearchNearbyResponse =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!(
                    "searchNearby(types={})",
                    request.included_primary_types.join(",")
                ),
                source: e,
            })?;

        tracing::debug!(
            types = ?request.included_primary_types,
            results = parsed.places.len(),
            "places nearby search completed"
        );

        Ok(parsed.places)
    }

    /// Extracts `error.message` from an error body, falling back to the raw
    /// body text.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
