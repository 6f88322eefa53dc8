//! Places API (New) wire types.
//!
//! Request types serialize to the `places:searchNearby` body; response types
//! model only the fields requested through the field mask. Every response
//! field except `id` is optional on the wire.

use moodmap_core::Origin;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// searchNearby request
// ---------------------------------------------------------------------------

/// Body of a `places:searchNearby` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchRequest {
    pub included_primary_types: Vec<String>,
    pub max_result_count: u32,
    pub rank_preference: RankPreference,
    pub location_restriction: LocationRestriction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankPreference {
    Distance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRestriction {
    pub circle: Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: LatLng,
    /// Radius in meters.
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Origin> for LatLng {
    fn from(origin: Origin) -> Self {
        Self {
            latitude: origin.lat,
            longitude: origin.lng,
        }
    }
}

impl From<LatLng> for Origin {
    fn from(point: LatLng) -> Self {
        Origin::new(point.latitude, point.longitude)
    }
}

// ---------------------------------------------------------------------------
// searchNearby response
// ---------------------------------------------------------------------------

/// An empty result set comes back as `{}`, so `places` defaults to empty.
#[derive(Debug, Default, Deserialize)]
pub struct SearchNearbyResponse {
    #[serde(default)]
    pub places: Vec<RawPlace>,
}

/// A place record exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<u32>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    #[serde(default)]
    pub editorial_summary: Option<LocalizedText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

/// Photo resource reference, e.g. `places/ChIJ.../photos/AUc...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    pub name: String,
    #[serde(default)]
    pub width_px: Option<u32>,
    #[serde(default)]
    pub height_px: Option<u32>,
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}
