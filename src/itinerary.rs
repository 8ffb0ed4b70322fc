//! Reduction of a classified itinerary to its mappable route.
//!
//! Only on-water stops with usable coordinates reach the map. Everything else
//! (flights, hotels, sea days) stays in the full day-by-day list. A voyage
//! that starts and ends at the same port collapses into a single round-trip
//! anchor so the map shows one pin, not two stacked ones.

use log::debug;
use serde::Deserialize;

use crate::error::Result;
use crate::{RawEvent, RouteConfig, RouteStop, Stop, StopCategory, Visit};

/// Reduce classified stops to the mappable route using the default config.
pub fn reduce(stops: &[Stop]) -> Vec<RouteStop> {
    reduce_with_config(stops, &RouteConfig::default())
}

/// Reduce classified stops to the mappable route.
///
/// 1. keep on-water categories with valid coordinates;
/// 2. assign indices and fill in missing day numbers and names;
/// 3. merge a matching first/last pair into a round-trip anchor.
///
/// An itinerary without on-water stops yields an empty route.
pub fn reduce_with_config(stops: &[Stop], config: &RouteConfig) -> Vec<RouteStop> {
    let mut route: Vec<RouteStop> = stops
        .iter()
        .filter(|stop| stop.category.is_on_water())
        .filter_map(|stop| {
            stop.coordinates
                .filter(|c| c.is_valid())
                .map(|coordinates| (stop, coordinates))
        })
        .enumerate()
        .map(|(index, (stop, coordinates))| {
            let day_index = stop.day_index.unwrap_or(index as u32 + 1);
            let display_name = stop
                .display_name
                .clone()
                .unwrap_or_else(|| format!("Port {}", index + 1));
            RouteStop {
                index,
                category: stop.category,
                day_index,
                display_name: display_name.clone(),
                country: stop.country.clone(),
                coordinates,
                is_overnight: stop.is_overnight,
                note: stop.note.clone(),
                is_round_trip_anchor: false,
                visit_days: vec![day_index],
                visits: vec![Visit {
                    day: day_index,
                    category: stop.category,
                    name: display_name,
                }],
            }
        })
        .collect();

    if is_round_trip(&route, config.round_trip_tolerance_degrees) {
        if let Some(last) = route.pop() {
            let first = &mut route[0];
            debug!(
                "merging round trip at '{}' (days {} and {})",
                first.display_name, first.day_index, last.day_index
            );
            first.is_round_trip_anchor = true;
            first.visit_days = vec![first.day_index, last.day_index];
            first.visits = vec![
                Visit {
                    day: first.day_index,
                    category: anchor_category(first.category, StopCategory::Embarkation),
                    name: first.display_name.clone(),
                },
                Visit {
                    day: last.day_index,
                    category: anchor_category(last.category, StopCategory::Disembarkation),
                    name: last.display_name,
                },
            ];
        }
    }

    route
}

/// True when the route has at least two stops and its ends coincide.
pub fn is_round_trip(route: &[RouteStop], tolerance_degrees: f64) -> bool {
    match (route.first(), route.last()) {
        (Some(first), Some(last)) if route.len() >= 2 => {
            (first.coordinates.latitude - last.coordinates.latitude).abs() < tolerance_degrees
                && (first.coordinates.longitude - last.coordinates.longitude).abs()
                    < tolerance_degrees
        }
        _ => false,
    }
}

/// A generic port call at either end of a round trip is reported as the
/// embark or disembark visit.
fn anchor_category(category: StopCategory, role: StopCategory) -> StopCategory {
    if category == StopCategory::CruisePort {
        role
    } else {
        category
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItineraryDocument {
    Events(Vec<RawEvent>),
    Wrapped { days: Vec<RawEvent> },
}

/// Parse an itinerary from JSON: either an array of events or an object
/// with a `days` array.
pub fn parse_raw_itinerary(json: &str) -> Result<Vec<RawEvent>> {
    let document: ItineraryDocument = serde_json::from_str(json)?;
    Ok(match document {
        ItineraryDocument::Events(events) => events,
        ItineraryDocument::Wrapped { days } => days,
    })
}
