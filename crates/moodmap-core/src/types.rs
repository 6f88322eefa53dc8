//! Domain types shared by the search, normalization, and vibe pipelines.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate used as the center of a nearby search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub lat: f64,
    pub lng: f64,
}

impl Origin {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Fallback origin (central Bangalore) used when geolocation is unavailable.
pub const DEFAULT_ORIGIN: Origin = Origin::new(12.9716, 77.5946);

/// Normalized parameters for one nearby-place search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpec {
    /// Provider primary-type token, e.g. `cafe`.
    pub place_type: String,
    /// Short human-readable tag shown as the active mood.
    pub label: String,
    /// Vibe term from free-text interpretation. Display only.
    pub keyword: Option<String>,
}

/// A place ready for display, with distance computed against the origin
/// that was current when it was normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub location: Origin,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub photo_uri: Option<String>,
    pub summary_text: Option<String>,
    pub distance_meters: f64,
    /// Rounded distance with unit, e.g. `1113m`.
    pub distance_text: String,
}

impl Place {
    /// Google Maps deep link for the place ("Go Now").
    #[must_use]
    pub fn maps_link(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}&query_place_id={}",
            self.location.lat, self.location.lng, self.id
        )
    }
}

/// AI-inferred vibe for a place. Scores are always within `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VibeScore {
    pub cozy: u8,
    pub loud: u8,
    pub work_friendly: u8,
    pub summary: String,
}

impl VibeScore {
    pub const FALLBACK_SUMMARY: &'static str = "AI could not determine the vibe.";

    /// Builds a score from unbounded model output, clamping each value into
    /// `0..=100` and rounding to the nearest integer.
    #[must_use]
    pub fn clamped(cozy: f64, loud: f64, work_friendly: f64, summary: String) -> Self {
        Self {
            cozy: clamp_percent(cozy),
            loud: clamp_percent(loud),
            work_friendly: clamp_percent(work_friendly),
            summary,
        }
    }

    /// Neutral score substituted whenever analysis fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            cozy: 50,
            loud: 50,
            work_friendly: 50,
            summary: Self::FALLBACK_SUMMARY.to_string(),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_percent(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}
