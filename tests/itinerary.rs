//! Tests for itinerary reduction

use voyageline::itinerary::{is_round_trip, reduce_with_config};
use voyageline::{
    GeoPoint, RawEvent, RouteConfig, Stop, StopCategory, VoyageError, classify_itinerary,
    parse_raw_itinerary, reduce,
};

fn stop(category: StopCategory, day: Option<u32>, name: Option<&str>, coords: Option<(f64, f64)>) -> Stop {
    Stop {
        category,
        day_index: day,
        display_name: name.map(str::to_string),
        country: None,
        coordinates: coords.map(|(lat, lon)| GeoPoint::new(lat, lon)),
        is_overnight: false,
        is_sea_day: category == StopCategory::SeaDay,
        note: None,
    }
}

fn southampton_round_trip() -> Vec<RawEvent> {
    vec![
        RawEvent::new(1, "Southampton")
            .with_type("embark")
            .with_coordinates(50.90, -1.40),
        RawEvent::new(2, "At Sea"),
        RawEvent::new(3, "La Coruña").with_coordinates(43.36, -8.41),
        RawEvent::new(4, "At Sea"),
        RawEvent::new(5, "At Sea"),
        RawEvent::new(15, "Southampton")
            .with_type("disembark")
            .with_coordinates(50.90, -1.40),
    ]
}

#[test]
fn test_empty_input() {
    assert!(reduce(&[]).is_empty());
}

#[test]
fn test_no_on_water_stops() {
    let stops = vec![
        stop(StopCategory::FlightOutbound, Some(1), Some("Gatwick"), Some((51.15, -0.18))),
        stop(StopCategory::Hotel, Some(1), Some("Hotel"), Some((41.38, 2.17))),
        stop(StopCategory::SeaDay, Some(2), None, None),
    ];
    assert!(reduce(&stops).is_empty());
}

#[test]
fn test_filters_off_water_and_unlocated() {
    let stops = vec![
        stop(StopCategory::FlightOutbound, Some(0), Some("Gatwick"), Some((51.15, -0.18))),
        stop(StopCategory::Embarkation, Some(1), Some("Barcelona"), Some((41.38, 2.17))),
        stop(StopCategory::SeaDay, Some(2), None, None),
        stop(StopCategory::CruisePort, Some(3), Some("Nowhere"), None),
        stop(StopCategory::CruisePort, Some(4), Some("Broken"), Some((f64::NAN, 3.0))),
        stop(StopCategory::CruisePort, Some(5), Some("Off the map"), Some((95.0, 3.0))),
        stop(StopCategory::TenderPort, Some(6), Some("Villefranche"), Some((43.70, 7.31))),
        stop(StopCategory::Disembarkation, Some(7), Some("Civitavecchia"), Some((42.09, 11.79))),
    ];
    let route = reduce(&stops);

    let names: Vec<&str> = route.iter().map(|s| s.display_name.as_str()).collect();
    assert_eq!(names, vec!["Barcelona", "Villefranche", "Civitavecchia"]);
    assert!(route.iter().all(|s| s.category.is_on_water()));
    assert!(route.iter().all(|s| s.coordinates.is_valid()));
    assert!(route.iter().all(|s| !s.is_round_trip_anchor));
}

#[test]
fn test_enrichment_defaults() {
    let stops = vec![
        stop(StopCategory::CruisePort, None, None, Some((41.38, 2.17))),
        stop(StopCategory::CruisePort, Some(4), None, Some((43.70, 7.31))),
        stop(StopCategory::CruisePort, None, Some("Livorno"), Some((43.55, 10.30))),
    ];
    let route = reduce(&stops);

    assert_eq!(route.len(), 3);
    assert_eq!(route[0].index, 0);
    assert_eq!(route[0].day_index, 1);
    assert_eq!(route[0].display_name, "Port 1");
    assert_eq!(route[1].day_index, 4);
    assert_eq!(route[1].display_name, "Port 2");
    assert_eq!(route[2].index, 2);
    assert_eq!(route[2].day_index, 3);
    assert_eq!(route[2].display_name, "Livorno");

    assert_eq!(route[1].visit_days, vec![4]);
    assert_eq!(route[1].visits.len(), 1);
    assert_eq!(route[1].visits[0].name, "Port 2");
}

#[test]
fn test_round_trip_merge() {
    let stops = classify_itinerary(&southampton_round_trip());
    let on_water = stops.iter().filter(|s| s.category.is_on_water()).count();
    let route = reduce(&stops);

    assert_eq!(on_water, 3);
    assert_eq!(route.len(), on_water - 1);

    let anchor = &route[0];
    assert!(anchor.is_round_trip_anchor);
    assert_eq!(anchor.display_name, "Southampton");
    assert_eq!(anchor.visit_days, vec![1, 15]);
    assert_eq!(anchor.visits.len(), 2);
    assert_eq!(anchor.visits[0].day, 1);
    assert_eq!(anchor.visits[0].category, StopCategory::Embarkation);
    assert_eq!(anchor.visits[1].day, 15);
    assert_eq!(anchor.visits[1].category, StopCategory::Disembarkation);

    assert_eq!(route[1].display_name, "La Coruña");
    assert!(!route[1].is_round_trip_anchor);
}

#[test]
fn test_round_trip_generic_ports_become_embark_and_disembark() {
    let stops = vec![
        stop(StopCategory::CruisePort, Some(1), Some("Barcelona"), Some((41.380, 2.170))),
        stop(StopCategory::CruisePort, Some(4), Some("Naples"), Some((40.85, 14.27))),
        stop(StopCategory::CruisePort, Some(8), Some("Barcelona (return)"), Some((41.385, 2.175))),
    ];
    let route = reduce(&stops);

    assert_eq!(route.len(), 2);
    assert_eq!(route[0].visits[0].category, StopCategory::Embarkation);
    assert_eq!(route[0].visits[1].category, StopCategory::Disembarkation);
    assert_eq!(route[0].visits[1].name, "Barcelona (return)");
    // The anchor keeps its own category
    assert_eq!(route[0].category, StopCategory::CruisePort);
}

#[test]
fn test_no_merge_beyond_tolerance() {
    let stops = vec![
        stop(StopCategory::Embarkation, Some(1), Some("Barcelona"), Some((41.38, 2.17))),
        stop(StopCategory::CruisePort, Some(4), Some("Naples"), Some((40.85, 14.27))),
        stop(StopCategory::Disembarkation, Some(8), Some("Badalona"), Some((41.40, 2.17))),
    ];
    let route = reduce(&stops);
    assert_eq!(route.len(), 3);
    assert!(!route[0].is_round_trip_anchor);
}

#[test]
fn test_custom_tolerance() {
    let stops = vec![
        stop(StopCategory::Embarkation, Some(1), Some("Barcelona"), Some((41.38, 2.17))),
        stop(StopCategory::CruisePort, Some(4), Some("Naples"), Some((40.85, 14.27))),
        stop(StopCategory::Disembarkation, Some(8), Some("Badalona"), Some((41.40, 2.17))),
    ];
    let config = RouteConfig {
        round_trip_tolerance_degrees: 0.05,
        ..RouteConfig::default()
    };
    let route = reduce_with_config(&stops, &config);
    assert_eq!(route.len(), 2);
    assert_eq!(route[0].visit_days, vec![1, 8]);
}

#[test]
fn test_single_stop_is_not_round_trip() {
    let stops = vec![stop(StopCategory::CruisePort, Some(1), Some("Bergen"), Some((60.39, 5.32)))];
    let route = reduce(&stops);
    assert_eq!(route.len(), 1);
    assert!(!route[0].is_round_trip_anchor);
    assert!(!is_round_trip(&route, 0.01));
}

#[test]
fn test_two_stops_same_place_collapse() {
    let stops = vec![
        stop(StopCategory::Embarkation, Some(1), Some("Miami"), Some((25.77, -80.17))),
        stop(StopCategory::Disembarkation, Some(8), Some("Miami"), Some((25.77, -80.17))),
    ];
    let route = reduce(&stops);
    assert_eq!(route.len(), 1);
    assert!(route[0].is_round_trip_anchor);
    assert_eq!(route[0].visit_days, vec![1, 8]);
}

#[test]
fn test_parse_event_array() {
    let json = r#"[
        {"day": 1, "location": "Southampton", "type": "embark", "lat": 50.90, "lon": -1.40},
        {"day": 2, "location": "At Sea", "isSeaDay": true},
        {"day": 3, "location": "La Coruña", "segment": "somewhere-else"}
    ]"#;
    let events = parse_raw_itinerary(json).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].coordinates(), Some(GeoPoint::new(50.90, -1.40)));
    assert_eq!(events[1].is_sea_day, Some(true));
    // Unknown segment spellings degrade to "no segment"
    assert_eq!(events[2].segment(), None);
}

#[test]
fn test_parse_wrapped_document() {
    let json = r#"{"days": [{"day": 1, "location": "Barcelona", "segment": "pre_cruise"}]}"#;
    let events = parse_raw_itinerary(json).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].segment(), Some(voyageline::Segment::PreCruise));
}

#[test]
fn test_malformed_coordinates_drop_only_that_event() {
    let json = r#"[
        {"day": 1, "location": "Southampton", "type": "embark", "lat": 50.90, "lon": -1.40},
        {"day": "3", "location": "La Coruña", "lat": "unknown", "lon": -8.41},
        {"day": 4, "location": "Lisbon", "lat": "38.72", "lon": "-9.14"},
        {"day": 6, "location": "Vigo", "lat": 42.24, "lon": -8.72}
    ]"#;
    let events = parse_raw_itinerary(json).unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[1].day, Some(3));
    assert_eq!(events[1].coordinates(), None);

    let route = reduce(&classify_itinerary(&events));
    let names: Vec<&str> = route.iter().map(|s| s.display_name.as_str()).collect();
    assert_eq!(names, vec!["Southampton", "Lisbon", "Vigo"]);
}

#[test]
fn test_parse_invalid_document() {
    assert!(matches!(
        parse_raw_itinerary("{\"itinerary\": 5}"),
        Err(VoyageError::Json(_))
    ));
}
