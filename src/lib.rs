//! # Voyageline
//!
//! Itinerary normalization and sea-following route synthesis for cruise
//! itineraries.
//!
//! This library provides:
//! - Classification of raw, inconsistently tagged trip events into typed stops
//! - Reduction of a classified itinerary to its mappable, on-water stops,
//!   including round-trip anchor merging
//! - Waypoint resolution through a curated table of maritime chokepoints,
//!   with a landmass heuristic as fallback
//! - Dense polyline interpolation with per-leg direction bearings
//!
//! ## Features
//!
//! - **`parallel`** - Plan batches of itineraries in parallel with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use voyageline::{RawEvent, plan_voyage};
//!
//! let itinerary = vec![
//!     RawEvent::new(1, "Southampton").with_type("embark").with_coordinates(50.90, -1.40),
//!     RawEvent::new(2, "At Sea"),
//!     RawEvent::new(3, "La Coruña").with_coordinates(43.36, -8.41),
//!     RawEvent::new(15, "Southampton").with_type("disembark").with_coordinates(50.90, -1.40),
//! ];
//!
//! let plan = plan_voyage(&itinerary);
//! assert_eq!(plan.stops.len(), 4);
//! assert_eq!(plan.route.len(), 2);
//! assert!(plan.route[0].is_round_trip_anchor);
//! assert!(!plan.path.is_empty());
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, VoyageError};

// Geographic utilities (distance, bearing, midpoints)
pub mod geo_utils;

// Versioned reference data: regions, chokepoints, route patterns, barriers
pub mod reference;
pub use reference::{Barrier, Chokepoint, ReferenceTables, RegionDef, RoutePattern, Waypoint};

// Region classification over the reference table
pub mod region;
pub use region::{OTHER_REGION, RegionIndex, classify_region};

// Raw event to typed stop classification
pub mod classify;
pub use classify::{CLASSIFICATION_RULES, ClassificationRule, classify_itinerary, classify_stop};

// Mappable route reduction and round-trip merging
pub mod itinerary;
pub use itinerary::{parse_raw_itinerary, reduce};

// Waypoint chains between consecutive ports
pub mod waypoints;
pub use waypoints::resolve;

// Dense path and bearing generation
pub mod interpolate;
pub use interpolate::{interpolate, linear_interpolate};

// Pipeline engine owning tables and configuration
pub mod engine;
#[cfg(feature = "parallel")]
pub use engine::plan_voyages_parallel;
pub use engine::{VoyageEngine, VoyagePlan, plan_voyage, plan_voyages};

// ============================================================================
// Core Types
// ============================================================================

/// A WGS84 coordinate in degrees.
///
/// # Example
/// ```
/// use voyageline::GeoPoint;
/// let southampton = GeoPoint::new(50.90, -1.40);
/// assert!(southampton.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has finite, in-range coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// `[lon, lat]` pair, the order renderers expect.
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lng
            && point.longitude <= self.max_lng
    }

    /// True when every edge is finite and min <= max on both axes.
    pub fn is_well_formed(&self) -> bool {
        [self.min_lat, self.max_lat, self.min_lng, self.max_lng]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lat <= self.max_lat
            && self.min_lng <= self.max_lng
    }
}

// ============================================================================
// Itinerary Types
// ============================================================================

/// Transport category of a classified stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCategory {
    CruisePort,
    Embarkation,
    Disembarkation,
    SeaDay,
    ScenicCruising,
    TenderPort,
    PrivateIsland,
    FlightOutbound,
    FlightReturn,
    FlightConnection,
    Rail,
    Hotel,
    Transfer,
}

impl StopCategory {
    /// Parse a free-form type tag. Unrecognized tags yield `None`.
    ///
    /// Matching ignores case and treats spaces and hyphens as underscores, so
    /// `"Scenic Cruising"`, `"scenic-cruising"` and `"scenic"` all resolve.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized = tag.trim().to_lowercase().replace([' ', '-'], "_");
        let category = match normalized.as_str() {
            "port" | "cruise_port" | "call" => Self::CruisePort,
            "embark" | "embarkation" => Self::Embarkation,
            "disembark" | "disembarkation" => Self::Disembarkation,
            "sea" | "sea_day" | "at_sea" => Self::SeaDay,
            "scenic" | "scenic_cruising" => Self::ScenicCruising,
            "tender" | "tender_port" => Self::TenderPort,
            "private_island" => Self::PrivateIsland,
            "flight" | "flight_outbound" => Self::FlightOutbound,
            "flight_return" => Self::FlightReturn,
            "flight_connection" | "connection" => Self::FlightConnection,
            "rail" | "train" => Self::Rail,
            "hotel" => Self::Hotel,
            "transfer" => Self::Transfer,
            _ => return None,
        };
        Some(category)
    }

    /// Whether stops of this category are drawn on the voyage map.
    pub fn is_on_water(&self) -> bool {
        matches!(
            self,
            Self::CruisePort
                | Self::Embarkation
                | Self::Disembarkation
                | Self::ScenicCruising
                | Self::TenderPort
                | Self::PrivateIsland
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CruisePort => "cruise_port",
            Self::Embarkation => "embarkation",
            Self::Disembarkation => "disembarkation",
            Self::SeaDay => "sea_day",
            Self::ScenicCruising => "scenic_cruising",
            Self::TenderPort => "tender_port",
            Self::PrivateIsland => "private_island",
            Self::FlightOutbound => "flight_outbound",
            Self::FlightReturn => "flight_return",
            Self::FlightConnection => "flight_connection",
            Self::Rail => "rail",
            Self::Hotel => "hotel",
            Self::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for StopCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of an event relative to the cruise itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    PreCruise,
    Main,
    PostCruise,
}

impl Segment {
    /// Parse a segment tag, accepting `pre_cruise`, `pre-cruise` and `precruise` spellings.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "precruise" | "pre" => Some(Self::PreCruise),
            "postcruise" | "post" => Some(Self::PostCruise),
            "main" | "cruise" => Some(Self::Main),
            _ => None,
        }
    }
}

/// A trip event as authored in the itinerary source.
///
/// Every field is optional: legacy entries often carry nothing but a
/// free-text location.
///
/// Scalar fields are read leniently: numbers and booleans written as strings
/// are parsed, and values of the wrong shape become `None` instead of
/// failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEvent {
    #[serde(deserialize_with = "lenient")]
    pub day: Option<u32>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// Kept as text so unknown spellings degrade to "no segment" instead of
    /// failing deserialization.
    pub segment: Option<String>,
    #[serde(alias = "lat", deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(alias = "lon", alias = "lng", deserialize_with = "lenient")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub is_sea_day: Option<bool>,
    pub description: Option<String>,
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub overnight: Option<bool>,
}

impl RawEvent {
    pub fn new(day: u32, location: &str) -> Self {
        Self {
            day: Some(day),
            location: Some(location.to_string()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, event_type: &str) -> Self {
        self.event_type = Some(event_type.to_string());
        self
    }

    pub fn with_segment(mut self, segment: &str) -> Self {
        self.segment = Some(segment.to_string());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    pub fn sea_day(mut self) -> Self {
        self.is_sea_day = Some(true);
        self
    }

    pub fn overnight(mut self) -> Self {
        self.overnight = Some(true);
        self
    }

    /// Parsed segment tag, if recognizable.
    pub fn segment(&self) -> Option<Segment> {
        self.segment.as_deref().and_then(Segment::from_tag)
    }

    /// Coordinates when both components are present. Range checks happen later.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}

/// Accept `T` directly or as a parseable string. Anything else is `None`.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned + std::str::FromStr,
{
    let value = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => text.trim().parse().ok(),
        Some(other) => T::deserialize(other).ok(),
        None => None,
    };
    Ok(value)
}

/// A classified itinerary event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub category: StopCategory,
    pub day_index: Option<u32>,
    pub display_name: Option<String>,
    pub country: Option<String>,
    /// Absent coordinates exclude the stop from the map.
    pub coordinates: Option<GeoPoint>,
    pub is_overnight: bool,
    /// True for days spent at sea, including scenic cruising days.
    pub is_sea_day: bool,
    pub note: Option<String>,
}

/// One call at a route stop. Round-trip anchors carry two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub day: u32,
    pub category: StopCategory,
    pub name: String,
}

/// A stop on the mappable route, with resolved defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    /// Zero-based position among the mappable stops.
    pub index: usize,
    pub category: StopCategory,
    pub day_index: u32,
    pub display_name: String,
    pub country: Option<String>,
    pub coordinates: GeoPoint,
    pub is_overnight: bool,
    pub note: Option<String>,
    pub is_round_trip_anchor: bool,
    pub visit_days: Vec<u32>,
    pub visits: Vec<Visit>,
}

/// Direction indicator placed at the midpoint between two route stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionMarker {
    /// `[lon, lat]`
    pub point: [f64; 2],
    /// Initial bearing in degrees, 0 = north, clockwise.
    pub bearing_degrees: f64,
}

/// Dense route line plus direction markers, ready for a map renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderablePath {
    /// `[lon, lat]` pairs in travel order.
    pub path: Vec<[f64; 2]>,
    pub bearings: Vec<DirectionMarker>,
}

impl RenderablePath {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Tunables for reduction and interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteConfig {
    /// Maximum |Δlat| and |Δlon| (degrees) for first and last stop to be merged
    /// into a round-trip anchor. Default: 0.01 (~1 km at mid-latitudes)
    pub round_trip_tolerance_degrees: f64,

    /// Target distance between interpolated path points.
    /// Default: 100_000.0 meters
    pub interpolation_spacing_meters: f64,

    /// Minimum number of points emitted for each interpolated leg.
    /// Default: 2
    pub min_points_per_leg: u32,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            round_trip_tolerance_degrees: 0.01,
            interpolation_spacing_meters: 100_000.0,
            min_points_per_leg: 2,
        }
    }
}

/// Smallest accepted interpolation spacing. Finer spacing on an ocean leg
/// would produce millions of points.
pub const MIN_INTERPOLATION_SPACING_METERS: f64 = 1_000.0;

impl RouteConfig {
    /// Reject settings that would make planning degenerate or unbounded.
    pub fn validate(&self) -> Result<()> {
        let spacing = self.interpolation_spacing_meters;
        if !spacing.is_finite() || spacing < MIN_INTERPOLATION_SPACING_METERS {
            return Err(VoyageError::InvalidConfig {
                field: "interpolationSpacingMeters",
                reason: format!(
                    "{} is below the minimum of {} meters",
                    spacing, MIN_INTERPOLATION_SPACING_METERS
                ),
            });
        }
        let tolerance = self.round_trip_tolerance_degrees;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(VoyageError::InvalidConfig {
                field: "roundTripToleranceDegrees",
                reason: format!("{} is not a non-negative number", tolerance),
            });
        }
        Ok(())
    }
}
