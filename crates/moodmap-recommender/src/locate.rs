//! Search origin resolution.

use moodmap_core::{Origin, DEFAULT_ORIGIN};

use crate::error::LocateError;
use crate::ports::Geolocator;

/// Asks `locator` for the current position once, falling back to
/// [`DEFAULT_ORIGIN`] when it is denied or unavailable.
pub async fn resolve_origin<L: Geolocator>(locator: &L) -> Origin {
    match locator.current_position().await {
        Ok(origin) => {
            tracing::debug!(lat = origin.lat, lng = origin.lng, "using reported position");
            origin
        }
        Err(e) => {
            tracing::info!(error = %e, "position unavailable, using default origin");
            DEFAULT_ORIGIN
        }
    }
}

/// A locator that reports a position known up front, e.g. from config.
/// `None` behaves like a denied permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<Origin>);

impl Geolocator for FixedLocation {
    async fn current_position(&self) -> Result<Origin, LocateError> {
        self.0.ok_or(LocateError::Denied)
    }
}
