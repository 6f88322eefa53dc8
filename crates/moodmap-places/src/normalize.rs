//! Normalization of raw Places records into display-ready [`Place`]s.

use moodmap_core::{distance_meters, format_distance, Origin, Place};
use reqwest::Url;

use crate::types::RawPlace;

/// Bounding box requested for photo media.
pub const PHOTO_MAX_WIDTH_PX: u32 = 400;
pub const PHOTO_MAX_HEIGHT_PX: u32 = 300;

/// Resolves photo resource names to displayable media URIs.
#[derive(Debug, Clone)]
pub struct PhotoMedia {
    base_url: String,
    api_key: String,
}

impl PhotoMedia {
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Media URI for `photo_name`, bounded to 400×300.
    ///
    /// Returns `None` if the name does not form a valid URL path.
    #[must_use]
    pub fn uri(&self, photo_name: &str) -> Option<String> {
        let name = photo_name.trim_matches('/');
        if name.is_empty() {
            return None;
        }
        let mut url = Url::parse(&format!("{}/v1/{name}/media", self.base_url)).ok()?;
        url.query_pairs_mut()
            .append_pair("maxWidthPx", &PHOTO_MAX_WIDTH_PX.to_string())
            .append_pair("maxHeightPx", &PHOTO_MAX_HEIGHT_PX.to_string())
            .append_pair("key", &self.api_key);
        Some(url.into())
    }
}

/// Converts provider records into [`Place`]s with distances measured from
/// `origin`.
///
/// Provider order is preserved. Records without a location cannot be placed
/// on the map and are skipped.
#[must_use]
pub fn normalize_places(raw: &[RawPlace], origin: Origin, photos: &PhotoMedia) -> Vec<Place> {
    raw.iter()
        .filter_map(|record| normalize_place(record, origin, photos))
        .collect()
}

fn normalize_place(record: &RawPlace, origin: Origin, photos: &PhotoMedia) -> Option<Place> {
    let Some(location) = record.location else {
        tracing::debug!(place_id = %record.id, "skipping place without location");
        return None;
    };
    let location = Origin::from(location);
    let distance = distance_meters(origin, location);

    let name = record
        .display_name
        .as_ref()
        .map(|n| n.text.clone())
        .unwrap_or_default();

    // Empty summaries render the same as missing ones.
    let summary_text = record
        .editorial_summary
        .as_ref()
        .map(|s| s.text.trim().to_string())
        .filter(|s| !s.is_empty());

    Some(Place {
        id: record.id.clone(),
        name,
        location,
        rating: record.rating,
        rating_count: record.user_rating_count,
        photo_uri: record.photos.first().and_then(|p| photos.uri(&p.name)),
        summary_text,
        distance_meters: distance,
        distance_text: format_distance(distance),
    })
}

/// Recomputes distance fields against a new origin.
#[must_use]
pub fn relocate_places(places: &[Place], origin: Origin) -> Vec<Place> {
    places
        .iter()
        .map(|place| {
            let distance = distance_meters(origin, place.location);
            Place {
                distance_meters: distance,
                distance_text: format_distance(distance),
                ..place.clone()
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
