//! Waypoint resolution between two ports.
//!
//! Resolution order:
//! 1. a curated passage for the (start region, end region) pair, returned
//!    verbatim (reversed for a bidirectional pattern matched backwards);
//! 2. the landmass barrier heuristic, which inserts one corrective waypoint;
//! 3. nothing, meaning a direct segment.

use log::debug;

use crate::GeoPoint;
use crate::reference::{Barrier, ReferenceTables, RoutePattern, Waypoint};

/// Resolve waypoints against the built-in tables.
///
/// # Example
/// ```
/// use voyageline::{GeoPoint, resolve};
///
/// let southampton = GeoPoint::new(50.90, -1.40);
/// let barcelona = GeoPoint::new(41.38, 2.17);
/// let chain = resolve(&southampton, &barcelona);
/// assert_eq!(chain.last().and_then(|w| w.label.as_deref()), Some("Strait of Gibraltar"));
/// ```
pub fn resolve(start: &GeoPoint, end: &GeoPoint) -> Vec<Waypoint> {
    resolve_with_tables(start, end, ReferenceTables::builtin())
}

/// Ordered waypoints to insert between `start` and `end`. May be empty.
pub fn resolve_with_tables(
    start: &GeoPoint,
    end: &GeoPoint,
    tables: &ReferenceTables,
) -> Vec<Waypoint> {
    let index = tables.region_index();
    let from = index.classify(start);
    let to = index.classify(end);

    if let Some(chain) = pattern_chain(from, to, tables) {
        debug!("passage {} -> {}: {} waypoints", from, to, chain.len());
        return chain;
    }

    if let Some(barrier) = crossed_barrier(start, end, tables.barriers()) {
        if let Some(chokepoint) = tables.chokepoint(&barrier.waypoint) {
            debug!(
                "segment {} -> {} crosses {}, via {}",
                from, to, barrier.name, chokepoint.label
            );
            return vec![chokepoint.to_waypoint()];
        }
    }

    Vec::new()
}

/// Look up a curated passage. An exact `(from, to)` row beats a reversed
/// bidirectional one.
pub fn pattern_chain(from: &str, to: &str, tables: &ReferenceTables) -> Option<Vec<Waypoint>> {
    let patterns = tables.patterns();
    let (pattern, reversed) = patterns
        .iter()
        .find(|p| p.from == from && p.to == to)
        .map(|p| (p, false))
        .or_else(|| {
            patterns
                .iter()
                .find(|p| p.bidirectional && p.from == to && p.to == from)
                .map(|p| (p, true))
        })?;

    Some(expand_pattern(pattern, reversed, tables))
}

fn expand_pattern(pattern: &RoutePattern, reversed: bool, tables: &ReferenceTables) -> Vec<Waypoint> {
    let mut chain: Vec<Waypoint> = pattern
        .via
        .iter()
        .filter_map(|id| tables.chokepoint(id))
        .map(|c| c.to_waypoint())
        .collect();
    if reversed {
        chain.reverse();
    }
    chain
}

/// First barrier the straight segment cuts across.
///
/// Symmetric in its endpoints: the longitude span and the midpoint latitude
/// do not depend on travel direction.
pub fn crossed_barrier<'a>(
    start: &GeoPoint,
    end: &GeoPoint,
    barriers: &'a [Barrier],
) -> Option<&'a Barrier> {
    let west = start.longitude.min(end.longitude);
    let east = start.longitude.max(end.longitude);
    let mid_lat = (start.latitude + end.latitude) / 2.0;

    barriers.iter().find(|barrier| {
        let band = &barrier.bounds;
        west <= band.min_lng
            && east >= band.max_lng
            && mid_lat >= band.min_lat
            && mid_lat <= band.max_lat
    })
}
