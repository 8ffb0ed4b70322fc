//! Stop classification.
//!
//! Raw itinerary events are tagged inconsistently: some carry an explicit
//! type, many legacy entries carry nothing but a free-text location. The
//! classifier runs an ordered list of rules, strongest signal first, and the
//! first rule that produces a category wins:
//!
//! | # | Rule | Signal |
//! |---|------|--------|
//! | 1 | `explicit_type` | recognized, non-generic type tag |
//! | 2 | `sea_day` | sea-day flag, "at sea"/"cruising" or empty location |
//! | 3 | `airport` | airport name or IATA code in the location |
//! | 4 | `lodging` | "hotel" or "resort" in the location |
//! | 5 | `pre_cruise` | pre-cruise segment |
//! | 6 | `post_cruise` | post-cruise segment |
//! | 7 | `departure_day` | day 1 at a home-country city |
//! | 8 | `default_port` | always matches |

use log::debug;

use crate::{RawEvent, Segment, Stop, StopCategory};

/// Type tag used by the itinerary source when nobody set one.
pub const GENERIC_TYPE_TAG: &str = "port";

const AIRPORT_NAMES: &[&str] = &[
    "airport",
    "heathrow",
    "gatwick",
    "stansted",
    "luton",
    "schiphol",
    "el prat",
    "barajas",
    "fiumicino",
    "charles de gaulle",
];

const AIRPORT_CODES: &[&str] = &[
    "LHR", "LGW", "STN", "LTN", "MAN", "BHX", "BRS", "EDI", "GLA", "NCL", "BFS", "AMS", "BCN",
    "MAD", "AGP", "LIS", "OPO", "FCO", "VCE", "ATH", "IST", "CPH", "OSL", "ARN", "HEL", "MIA",
    "FLL", "MCO", "JFK",
];

/// Inland cities customers typically fly from or return to. Cities with a
/// cruise terminal (Newcastle, Belfast, Edinburgh, Glasgow) are left out so a
/// day-1 embarkation there stays a port call.
const HOME_CITIES: &[&str] = &[
    "london",
    "manchester",
    "birmingham",
    "leeds",
    "sheffield",
    "nottingham",
    "leicester",
];

/// A named classification rule.
///
/// `apply` returns `Some(category)` when the rule's signal is present.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub name: &'static str,
    pub apply: fn(&RawEvent) -> Option<StopCategory>,
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("name", &self.name)
            .finish()
    }
}

/// Rules in priority order. The last rule always matches.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "explicit_type",
        apply: explicit_type,
    },
    ClassificationRule {
        name: "sea_day",
        apply: sea_day,
    },
    ClassificationRule {
        name: "airport",
        apply: airport,
    },
    ClassificationRule {
        name: "lodging",
        apply: lodging,
    },
    ClassificationRule {
        name: "pre_cruise",
        apply: pre_cruise,
    },
    ClassificationRule {
        name: "post_cruise",
        apply: post_cruise,
    },
    ClassificationRule {
        name: "departure_day",
        apply: departure_day,
    },
    ClassificationRule {
        name: "default_port",
        apply: default_port,
    },
];

/// Classify a raw event into a typed stop.
///
/// # Example
/// ```
/// use voyageline::{RawEvent, StopCategory, classify_stop};
///
/// let event = RawEvent::new(1, "Flight to Malaga Airport").with_segment("pre_cruise");
/// assert_eq!(classify_stop(&event).category, StopCategory::FlightOutbound);
/// ```
pub fn classify_stop(event: &RawEvent) -> Stop {
    let (rule, category) = resolve_category(event);
    debug!(
        "classified day {:?} '{}' as {} ({})",
        event.day,
        event.location.as_deref().unwrap_or(""),
        category,
        rule
    );

    let is_sea_day = category == StopCategory::SeaDay
        || category == StopCategory::ScenicCruising
        || event.is_sea_day == Some(true);

    Stop {
        category,
        day_index: event.day,
        display_name: event
            .location
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        country: event.country.clone(),
        coordinates: event.coordinates(),
        is_overnight: event.overnight.unwrap_or(false),
        is_sea_day,
        note: event.description.clone(),
    }
}

/// Classify every event of an itinerary, preserving order.
pub fn classify_itinerary(events: &[RawEvent]) -> Vec<Stop> {
    events.iter().map(classify_stop).collect()
}

/// Run the rule list and report which rule decided.
pub fn resolve_category(event: &RawEvent) -> (&'static str, StopCategory) {
    CLASSIFICATION_RULES
        .iter()
        .find_map(|rule| (rule.apply)(event).map(|category| (rule.name, category)))
        .unwrap_or(("default_port", StopCategory::CruisePort))
}

// ============================================================================
// Rules
// ============================================================================

fn explicit_type(event: &RawEvent) -> Option<StopCategory> {
    let tag = event.event_type.as_deref()?;
    if tag.trim().eq_ignore_ascii_case(GENERIC_TYPE_TAG) {
        return None;
    }
    StopCategory::from_tag(tag)
}

fn sea_day(event: &RawEvent) -> Option<StopCategory> {
    let location = location_lower(event);
    let at_sea = event.is_sea_day == Some(true)
        || location.is_empty()
        || location.contains("at sea")
        || location.contains("cruising");
    at_sea.then_some(StopCategory::SeaDay)
}

fn airport(event: &RawEvent) -> Option<StopCategory> {
    if !mentions_airport(event.location.as_deref().unwrap_or("")) {
        return None;
    }
    if event.segment() == Some(Segment::PostCruise) {
        Some(StopCategory::FlightReturn)
    } else {
        Some(StopCategory::FlightOutbound)
    }
}

fn lodging(event: &RawEvent) -> Option<StopCategory> {
    let location = location_lower(event);
    (location.contains("hotel") || location.contains("resort")).then_some(StopCategory::Hotel)
}

fn pre_cruise(event: &RawEvent) -> Option<StopCategory> {
    if event.segment() != Some(Segment::PreCruise) || is_embarkation_event(event) {
        return None;
    }
    if is_home_city(&location_lower(event)) {
        Some(StopCategory::FlightOutbound)
    } else {
        Some(StopCategory::Hotel)
    }
}

fn post_cruise(event: &RawEvent) -> Option<StopCategory> {
    if event.segment() != Some(Segment::PostCruise) || is_disembarkation_event(event) {
        return None;
    }
    if is_home_city(&location_lower(event)) {
        Some(StopCategory::FlightReturn)
    } else {
        Some(StopCategory::Hotel)
    }
}

fn departure_day(event: &RawEvent) -> Option<StopCategory> {
    (event.day == Some(1) && is_home_city(&location_lower(event)))
        .then_some(StopCategory::FlightOutbound)
}

fn default_port(_event: &RawEvent) -> Option<StopCategory> {
    Some(StopCategory::CruisePort)
}

// ============================================================================
// Signals
// ============================================================================

fn location_lower(event: &RawEvent) -> String {
    event
        .location
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

/// Airport keyword or an exact IATA code token (case-sensitive, so "Man"
/// in a place name does not match "MAN").
pub fn mentions_airport(location: &str) -> bool {
    let lower = location.to_lowercase();
    if AIRPORT_NAMES.iter().any(|name| lower.contains(name)) {
        return true;
    }
    location
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| AIRPORT_CODES.contains(&token))
}

pub fn is_home_city(location_lower: &str) -> bool {
    HOME_CITIES.iter().any(|city| location_lower.contains(city))
}

fn event_text(event: &RawEvent) -> String {
    format!(
        "{} {}",
        event.location.as_deref().unwrap_or(""),
        event.description.as_deref().unwrap_or("")
    )
    .to_lowercase()
}

fn is_embarkation_event(event: &RawEvent) -> bool {
    let text = event_text(event);
    text.replace("disembark", "").contains("embark")
}

fn is_disembarkation_event(event: &RawEvent) -> bool {
    event_text(event).contains("disembark")
}
