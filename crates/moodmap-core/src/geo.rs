//! Great-circle distance between coordinates.
//!
//! Uses the haversine formula on a sphere of the WGS84 equatorial radius,
//! which is what the Maps geometry library reports for the same inputs.

use crate::types::Origin;

const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Distance in meters between two coordinates.
#[must_use]
pub fn distance_meters(from: Origin, to: Origin) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Formats a distance as whole meters with a trailing unit, e.g. `1113m`.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    format!("{}m", meters.round())
}
