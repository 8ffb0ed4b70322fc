//! # Geographic Utilities
//!
//! Distance, bearing and midpoint helpers shared by the waypoint resolver and
//! the route interpolator.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two points |
//! | [`initial_bearing`] | Initial great-circle bearing from one point to another |
//! | [`lon_lat_midpoint`] | Arithmetic midpoint in lon/lat space |
//! | [`polyline_length`] | Total length of a point sequence in meters |
//!
//! All functions expect WGS84 coordinates in degrees.

use geo::{Bearing, Distance, Haversine, Point};

use crate::GeoPoint;

fn to_point(p: &GeoPoint) -> Point<f64> {
    Point::new(p.longitude, p.latitude)
}

/// Great-circle distance in meters (spherical Earth, radius 6,371 km).
///
/// # Example
///
/// ```rust
/// use voyageline::{GeoPoint, geo_utils};
///
/// let london = GeoPoint::new(51.5074, -0.1278);
/// let paris = GeoPoint::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343_560.0).abs() < 5000.0);
/// ```
#[inline]
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    Haversine::distance(to_point(p1), to_point(p2))
}

/// Initial bearing in degrees from `from` towards `to`, normalized to [0, 360).
///
/// North is 0°, east is 90°.
pub fn initial_bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let bearing = Haversine::bearing(to_point(from), to_point(to));
    let normalized = bearing.rem_euclid(360.0);
    // rem_euclid can round -0.0000001 up to exactly 360.0
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Midpoint by averaging latitude and longitude.
///
/// Consistent with the linear lon/lat interpolation used for the path, so a
/// direction marker sits on the drawn segment between two stops.
pub fn lon_lat_midpoint(a: &GeoPoint, b: &GeoPoint) -> GeoPoint {
    GeoPoint::new(
        (a.latitude + b.latitude) / 2.0,
        (a.longitude + b.longitude) / 2.0,
    )
}

/// Sum of haversine distances between consecutive points.
pub fn polyline_length(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}
