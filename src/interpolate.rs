//! Route interpolation.
//!
//! Expands the mappable route into a dense `[lon, lat]` path. Each leg runs
//! through its resolved waypoints, and every sub-leg is filled with points
//! roughly every `interpolation_spacing_meters` of haversine distance.
//!
//! Points are placed by **linear interpolation in lon/lat space**, not along
//! the great circle. Inter-port distances on a cruise are short enough that
//! the visual difference is negligible, and the drawn line then matches the
//! straight segments a web map renders between vertices.

use crate::geo_utils::{haversine_distance, initial_bearing, lon_lat_midpoint};
use crate::reference::ReferenceTables;
use crate::waypoints::resolve_with_tables;
use crate::{DirectionMarker, GeoPoint, RenderablePath, RouteConfig, RouteStop};

/// Interpolate a route with the built-in tables and default config.
pub fn interpolate(route: &[RouteStop]) -> RenderablePath {
    interpolate_with(route, ReferenceTables::builtin(), &RouteConfig::default())
}

/// Build the renderable path and per-leg bearings for a route.
///
/// A route led by a round-trip anchor is closed back to the anchor. Fewer
/// than two stops give an empty result.
pub fn interpolate_with(
    route: &[RouteStop],
    tables: &ReferenceTables,
    config: &RouteConfig,
) -> RenderablePath {
    if route.len() < 2 {
        return RenderablePath::default();
    }

    let mut stops: Vec<GeoPoint> = route.iter().map(|s| s.coordinates).collect();
    if route[0].is_round_trip_anchor {
        stops.push(route[0].coordinates);
    }

    let mut path: Vec<[f64; 2]> = Vec::new();
    let mut bearings = Vec::with_capacity(stops.len() - 1);

    for pair in stops.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);

        let mut leg = Vec::with_capacity(2);
        leg.push(*start);
        leg.extend(resolve_with_tables(start, end, tables).iter().map(|w| w.point()));
        leg.push(*end);

        for sub_leg in leg.windows(2) {
            let points = linear_interpolate(
                &sub_leg[0],
                &sub_leg[1],
                config.interpolation_spacing_meters,
                config.min_points_per_leg as usize,
            );
            // Joints between sub-legs are emitted once.
            let skip = usize::from(!path.is_empty());
            path.extend(points.iter().skip(skip).map(GeoPoint::to_lon_lat));
        }

        bearings.push(DirectionMarker {
            point: lon_lat_midpoint(start, end).to_lon_lat(),
            bearing_degrees: initial_bearing(start, end),
        });
    }

    RenderablePath { path, bearings }
}

/// Evenly spaced points from `a` to `b`, endpoints included.
///
/// The count is `max(min_points, ceil(distance / spacing_meters))`, so a
/// 1000 km leg at 100 km spacing yields at least 10 points and a 50 km leg
/// yields the minimum. A zero-length leg yields exactly one point.
pub fn linear_interpolate(
    a: &GeoPoint,
    b: &GeoPoint,
    spacing_meters: f64,
    min_points: usize,
) -> Vec<GeoPoint> {
    let distance = haversine_distance(a, b);
    if a == b || distance <= 0.0 || !distance.is_finite() {
        return vec![*a];
    }

    let from_distance = if spacing_meters > 0.0 && spacing_meters.is_finite() {
        (distance / spacing_meters).ceil() as usize
    } else {
        0
    };
    let count = from_distance.max(min_points).max(2);

    let last = count - 1;
    (0..count)
        .map(|i| {
            if i == last {
                return *b;
            }
            let t = i as f64 / last as f64;
            GeoPoint::new(
                a.latitude + t * (b.latitude - a.latitude),
                a.longitude + t * (b.longitude - a.longitude),
            )
        })
        .collect()
}
