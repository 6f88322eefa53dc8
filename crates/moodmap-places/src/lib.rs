//! Client and normalization for the Google Places (New) nearby search.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{PlacesClient, FIELD_MASK, MAX_RESULT_COUNT, SEARCH_RADIUS_METERS};
pub use error::PlacesError;
pub use normalize::{normalize_places, relocate_places, PhotoMedia};
pub use types::{NearbySearchRequest, RawPlace};
