//! # Voyage Engine
//!
//! Runs the full pipeline for an itinerary:
//!
//! ```text
//! raw events -> classify -> reduce -> resolve + interpolate
//! ```
//!
//! The engine only holds immutable reference tables and configuration, so a
//! single instance can be shared across threads. It keeps no cache; callers
//! that replan the same itinerary repeatedly should memoize by itinerary
//! identity.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::classify::classify_itinerary;
use crate::interpolate::interpolate_with;
use crate::itinerary::reduce_with_config;
use crate::reference::{ReferenceTables, Waypoint};
use crate::waypoints::resolve_with_tables;
use crate::{GeoPoint, RawEvent, RenderablePath, RouteConfig, RouteStop, Stop};

/// Everything a map view and a day-by-day view need for one itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoyagePlan {
    /// Every classified event, mappable or not.
    pub stops: Vec<Stop>,
    /// On-water stops in travel order.
    pub route: Vec<RouteStop>,
    pub path: RenderablePath,
}

impl VoyagePlan {
    /// True when there is no route line to draw.
    pub fn is_unmappable(&self) -> bool {
        self.path.is_empty()
    }
}

/// Pipeline runner over a set of reference tables.
#[derive(Debug, Clone)]
pub struct VoyageEngine<'t> {
    tables: &'t ReferenceTables,
    config: RouteConfig,
}

impl Default for VoyageEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl VoyageEngine<'static> {
    /// Engine over the built-in tables with default configuration.
    pub fn new() -> Self {
        Self {
            tables: ReferenceTables::builtin(),
            config: RouteConfig::default(),
        }
    }
}

impl<'t> VoyageEngine<'t> {
    /// Engine over caller-supplied tables.
    pub fn with_tables(tables: &'t ReferenceTables) -> Self {
        Self {
            tables,
            config: RouteConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RouteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tables(&self) -> &ReferenceTables {
        self.tables
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    // ========================================================================
    // Pipeline stages
    // ========================================================================

    pub fn classify_region(&self, point: &GeoPoint) -> &str {
        self.tables.region_index().classify(point)
    }

    pub fn classify(&self, events: &[RawEvent]) -> Vec<Stop> {
        classify_itinerary(events)
    }

    pub fn reduce(&self, stops: &[Stop]) -> Vec<RouteStop> {
        reduce_with_config(stops, &self.config)
    }

    pub fn resolve(&self, start: &GeoPoint, end: &GeoPoint) -> Vec<Waypoint> {
        resolve_with_tables(start, end, self.tables)
    }

    pub fn interpolate(&self, route: &[RouteStop]) -> RenderablePath {
        interpolate_with(route, self.tables, &self.config)
    }

    /// Classify, reduce and interpolate an itinerary.
    pub fn plan(&self, events: &[RawEvent]) -> VoyagePlan {
        let stops = self.classify(events);
        let route = self.reduce(&stops);
        let path = self.interpolate(&route);

        debug!(
            "planned itinerary: {} events, {} route stops, {} path points",
            events.len(),
            route.len(),
            path.path.len()
        );
        if route.len() < 2 {
            debug!("itinerary has no mappable route");
        }

        VoyagePlan { stops, route, path }
    }
}

/// Plan an itinerary with the built-in tables and default configuration.
pub fn plan_voyage(events: &[RawEvent]) -> VoyagePlan {
    VoyageEngine::new().plan(events)
}

/// Plan several independent itineraries.
pub fn plan_voyages(engine: &VoyageEngine<'_>, itineraries: &[Vec<RawEvent>]) -> Vec<VoyagePlan> {
    info!("planning {} itineraries", itineraries.len());
    itineraries.iter().map(|events| engine.plan(events)).collect()
}

/// Plan several independent itineraries in parallel.
///
/// Output order matches input order.
#[cfg(feature = "parallel")]
pub fn plan_voyages_parallel(
    engine: &VoyageEngine<'_>,
    itineraries: &[Vec<RawEvent>],
) -> Vec<VoyagePlan> {
    use rayon::prelude::*;

    info!("planning {} itineraries in parallel", itineraries.len());
    itineraries
        .par_iter()
        .map(|events| engine.plan(events))
        .collect()
}
