//! Tests for region classification

use voyageline::{GeoPoint, OTHER_REGION, ReferenceTables, RegionIndex, classify_region};

#[test]
fn test_known_ports() {
    let cases = [
        ("Southampton", 50.90, -1.40, "uk"),
        ("La Coruña", 43.36, -8.41, "iberia_atlantic"),
        ("Lisbon", 38.72, -9.14, "iberia_atlantic"),
        ("Barcelona", 41.38, 2.17, "mediterranean"),
        ("Civitavecchia", 42.09, 11.79, "mediterranean"),
        ("Bilbao", 43.26, -2.93, "biscay"),
        ("Le Havre", 49.49, 0.11, "english_channel"),
        ("St Peter Port", 49.46, -2.54, "english_channel"),
        ("Lorient", 47.75, -3.37, "biscay"),
        ("Amsterdam", 52.37, 4.90, "north_sea"),
        ("Bergen", 60.39, 5.32, "norway"),
        ("Stockholm", 59.33, 18.07, "baltic"),
        ("Funchal", 32.65, -16.91, "atlantic_islands"),
        ("Nassau", 25.06, -77.35, "caribbean"),
        ("Sydney", -33.86, 151.21, OTHER_REGION),
    ];
    for (name, lat, lon, expected) in cases {
        assert_eq!(
            classify_region(&GeoPoint::new(lat, lon)),
            expected,
            "{} classified wrongly",
            name
        );
    }
}

#[test]
fn test_first_region_in_table_order_wins() {
    // Inside both the baltic and norway boxes
    assert_eq!(classify_region(&GeoPoint::new(58.0, 12.5)), "baltic");
    // On the shared iberia_atlantic / mediterranean edge
    assert_eq!(classify_region(&GeoPoint::new(36.0, -5.6)), "iberia_atlantic");
}

#[test]
fn test_non_finite_is_other() {
    assert_eq!(classify_region(&GeoPoint::new(f64::NAN, 0.0)), OTHER_REGION);
    assert_eq!(classify_region(&GeoPoint::new(45.0, f64::INFINITY)), OTHER_REGION);
}

#[test]
fn test_index_matches_ordered_scan() {
    let tables = ReferenceTables::builtin();
    let index = tables.region_index();

    let mut lat = -60.0;
    while lat <= 75.0 {
        let mut lon = -100.0;
        while lon <= 40.0 {
            let point = GeoPoint::new(lat, lon);
            let scanned = tables
                .regions()
                .iter()
                .find(|r| r.bounds.contains(&point))
                .map(|r| r.name.as_str())
                .unwrap_or(OTHER_REGION);
            assert_eq!(index.classify(&point), scanned, "mismatch at {lat},{lon}");
            lon += 2.5;
        }
        lat += 2.5;
    }
}

#[test]
fn test_empty_index() {
    let index = RegionIndex::build(&[]);
    assert!(index.is_empty());
    assert_eq!(index.classify(&GeoPoint::new(50.0, 0.0)), OTHER_REGION);
}
