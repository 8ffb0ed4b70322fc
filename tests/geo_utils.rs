//! Tests for geo_utils module

use voyageline::GeoPoint;
use voyageline::geo_utils::*;

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_haversine_distance_same_point() {
    let p = GeoPoint::new(50.90, -1.40);
    assert_eq!(haversine_distance(&p, &p), 0.0);
}

#[test]
fn test_haversine_distance_known_value() {
    // London to Paris is approximately 344 km
    let london = GeoPoint::new(51.5074, -0.1278);
    let paris = GeoPoint::new(48.8566, 2.3522);
    let dist = haversine_distance(&london, &paris);
    assert!(approx_eq(dist, 343_560.0, 5000.0));
}

#[test]
fn test_initial_bearing_cardinal_directions() {
    let origin = GeoPoint::new(0.0, 0.0);
    assert!(approx_eq(initial_bearing(&origin, &GeoPoint::new(1.0, 0.0)), 0.0, 0.01));
    assert!(approx_eq(initial_bearing(&origin, &GeoPoint::new(0.0, 1.0)), 90.0, 0.01));
    assert!(approx_eq(initial_bearing(&origin, &GeoPoint::new(-1.0, 0.0)), 180.0, 0.01));
    assert!(approx_eq(initial_bearing(&origin, &GeoPoint::new(0.0, -1.0)), 270.0, 0.01));
}

#[test]
fn test_initial_bearing_is_normalized() {
    let southampton = GeoPoint::new(50.90, -1.40);
    let coruna = GeoPoint::new(43.36, -8.41);
    let outbound = initial_bearing(&southampton, &coruna);
    let inbound = initial_bearing(&coruna, &southampton);
    assert!((0.0..360.0).contains(&outbound));
    assert!((0.0..360.0).contains(&inbound));
    // South-west out, north-east back
    assert!(outbound > 180.0 && outbound < 270.0);
    assert!(inbound > 0.0 && inbound < 90.0);
}

#[test]
fn test_lon_lat_midpoint() {
    let mid = lon_lat_midpoint(&GeoPoint::new(40.0, 10.0), &GeoPoint::new(42.0, 14.0));
    assert!(approx_eq(mid.latitude, 41.0, 1e-12));
    assert!(approx_eq(mid.longitude, 12.0, 1e-12));
}

#[test]
fn test_polyline_length() {
    assert_eq!(polyline_length(&[]), 0.0);
    assert_eq!(polyline_length(&[GeoPoint::new(50.0, 0.0)]), 0.0);

    let a = GeoPoint::new(40.0, 0.0);
    let b = GeoPoint::new(41.0, 0.0);
    let c = GeoPoint::new(42.0, 0.0);
    let total = polyline_length(&[a, b, c]);
    assert!(approx_eq(total, haversine_distance(&a, &c), 1.0));
}
