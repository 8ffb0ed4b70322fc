//! Region classification.
//!
//! Uses an R-tree over the region boxes to find candidate regions for a
//! point, then resolves overlaps by table order so the result matches a
//! first-match scan of the ordered list.

use rstar::{AABB, RTree, RTreeObject};

use crate::reference::{ReferenceTables, RegionDef};
use crate::{Bounds, GeoPoint};

/// Name returned for points outside every region.
pub const OTHER_REGION: &str = "other";

/// Region box wrapper for R-tree indexing.
#[derive(Debug, Clone)]
struct RegionEnvelope {
    order: usize,
    name: String,
    bounds: Bounds,
}

impl RTreeObject for RegionEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_lng, self.bounds.min_lat],
            [self.bounds.max_lng, self.bounds.max_lat],
        )
    }
}

/// Spatial index over the ordered region list.
#[derive(Debug, Clone)]
pub struct RegionIndex {
    tree: RTree<RegionEnvelope>,
}

impl RegionIndex {
    pub fn build(regions: &[RegionDef]) -> Self {
        let envelopes: Vec<RegionEnvelope> = regions
            .iter()
            .enumerate()
            .map(|(order, region)| RegionEnvelope {
                order,
                name: region.name.clone(),
                bounds: region.bounds,
            })
            .collect();

        Self {
            tree: RTree::bulk_load(envelopes),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// First region in table order containing the point, or [`OTHER_REGION`].
    pub fn classify(&self, point: &GeoPoint) -> &str {
        if !point.latitude.is_finite() || !point.longitude.is_finite() {
            return OTHER_REGION;
        }

        let probe = AABB::from_point([point.longitude, point.latitude]);
        self.tree
            .locate_in_envelope_intersecting(&probe)
            .min_by_key(|region| region.order)
            .map(|region| region.name.as_str())
            .unwrap_or(OTHER_REGION)
    }
}

/// Classify a coordinate against the built-in region table.
///
/// # Example
/// ```
/// use voyageline::{GeoPoint, classify_region};
///
/// assert_eq!(classify_region(&GeoPoint::new(50.90, -1.40)), "uk");
/// assert_eq!(classify_region(&GeoPoint::new(41.38, 2.17)), "mediterranean");
/// assert_eq!(classify_region(&GeoPoint::new(-33.86, 151.21)), "other");
/// ```
pub fn classify_region(point: &GeoPoint) -> &'static str {
    ReferenceTables::builtin().region_index().classify(point)
}
