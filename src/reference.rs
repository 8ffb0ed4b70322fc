//! Versioned reference data for maritime routing.
//!
//! Every geographic constant the router depends on lives here: the ordered
//! region boxes, the chokepoint coordinates, the region-pair passage table and
//! the landmass barriers used by the fallback heuristic. New passages are
//! added by extending the table, either in [`ReferenceTables::builtin`] or in
//! a JSON document loaded with [`ReferenceTables::from_json`].

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{OptionExt, Result, VoyageError};
use crate::region::{OTHER_REGION, RegionIndex};
use crate::{Bounds, GeoPoint};

/// Version of the built-in table. Bump when any row changes.
pub const BUILTIN_TABLE_VERSION: u32 = 4;

/// A named region used to select routing behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDef {
    pub name: String,
    pub bounds: Bounds,
}

/// A strait or cape that routes are pinned through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chokepoint {
    pub id: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Chokepoint {
    pub fn to_waypoint(&self) -> Waypoint {
        Waypoint {
            latitude: self.latitude,
            longitude: self.longitude,
            label: Some(self.label.clone()),
        }
    }
}

/// Intermediate coordinate inserted between two ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Waypoint {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Known passage between two regions, as an ordered list of chokepoint ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePattern {
    pub from: String,
    pub to: String,
    pub via: Vec<String>,
    /// Also serve `to -> from`, with the chain reversed.
    #[serde(default = "default_bidirectional")]
    pub bidirectional: bool,
}

fn default_bidirectional() -> bool {
    true
}

/// Landmass that a straight segment must not cut across.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub name: String,
    /// Latitude band tested against the segment midpoint and longitude span
    /// the segment must cover to be flagged.
    pub bounds: Bounds,
    /// Chokepoint id inserted when the barrier is flagged.
    pub waypoint: String,
}

/// Wire form of the tables. Deserialization goes through validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableData {
    version: u32,
    regions: Vec<RegionDef>,
    chokepoints: Vec<Chokepoint>,
    patterns: Vec<RoutePattern>,
    barriers: Vec<Barrier>,
}

/// Immutable routing reference data plus its region index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TableData", into = "TableData")]
pub struct ReferenceTables {
    version: u32,
    regions: Vec<RegionDef>,
    chokepoints: Vec<Chokepoint>,
    patterns: Vec<RoutePattern>,
    barriers: Vec<Barrier>,
    chokepoint_lookup: HashMap<String, usize>,
    region_index: RegionIndex,
}

static BUILTIN: LazyLock<ReferenceTables> =
    LazyLock::new(|| ReferenceTables::assemble(builtin_data()));

impl ReferenceTables {
    /// The curated built-in table, shared for the process lifetime.
    pub fn builtin() -> &'static ReferenceTables {
        &BUILTIN
    }

    /// Load and validate a table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: TableData = serde_json::from_str(json)?;
        Self::try_from(data)
    }

    /// Export the table as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Regions in classification priority order.
    pub fn regions(&self) -> &[RegionDef] {
        &self.regions
    }

    pub fn chokepoints(&self) -> &[Chokepoint] {
        &self.chokepoints
    }

    pub fn patterns(&self) -> &[RoutePattern] {
        &self.patterns
    }

    pub fn barriers(&self) -> &[Barrier] {
        &self.barriers
    }

    pub fn region_index(&self) -> &RegionIndex {
        &self.region_index
    }

    pub fn chokepoint(&self, id: &str) -> Option<&Chokepoint> {
        self.chokepoint_lookup.get(id).map(|&i| &self.chokepoints[i])
    }

    /// Check internal consistency: well-formed boxes, unique region names,
    /// and every chokepoint or region reference resolvable.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for region in &self.regions {
            if !region.bounds.is_well_formed() {
                return Err(VoyageError::InvalidBounds {
                    name: region.name.clone(),
                });
            }
            if !names.insert(region.name.as_str()) {
                return Err(VoyageError::DuplicateRegion {
                    name: region.name.clone(),
                });
            }
        }

        for chokepoint in &self.chokepoints {
            let point = GeoPoint::new(chokepoint.latitude, chokepoint.longitude);
            if !point.is_valid() {
                return Err(VoyageError::InvalidBounds {
                    name: chokepoint.id.clone(),
                });
            }
        }

        for pattern in &self.patterns {
            let owner = format!("pattern {} -> {}", pattern.from, pattern.to);
            for region in [&pattern.from, &pattern.to] {
                if region != OTHER_REGION && !names.contains(region.as_str()) {
                    return Err(VoyageError::UnknownRegion {
                        owner,
                        name: region.clone(),
                    });
                }
            }
            for id in &pattern.via {
                self.chokepoint(id).ok_or_unknown_chokepoint(&owner, id)?;
            }
        }

        for barrier in &self.barriers {
            if !barrier.bounds.is_well_formed() {
                return Err(VoyageError::InvalidBounds {
                    name: barrier.name.clone(),
                });
            }
            let owner = format!("barrier {}", barrier.name);
            self.chokepoint(&barrier.waypoint)
                .ok_or_unknown_chokepoint(&owner, &barrier.waypoint)?;
        }

        Ok(())
    }

    fn assemble(data: TableData) -> Self {
        let chokepoint_lookup = data
            .chokepoints
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let region_index = RegionIndex::build(&data.regions);

        Self {
            version: data.version,
            regions: data.regions,
            chokepoints: data.chokepoints,
            patterns: data.patterns,
            barriers: data.barriers,
            chokepoint_lookup,
            region_index,
        }
    }
}

impl TryFrom<TableData> for ReferenceTables {
    type Error = VoyageError;

    fn try_from(data: TableData) -> Result<Self> {
        let tables = Self::assemble(data);
        tables.validate()?;
        Ok(tables)
    }
}

impl From<ReferenceTables> for TableData {
    fn from(tables: ReferenceTables) -> Self {
        Self {
            version: tables.version,
            regions: tables.regions,
            chokepoints: tables.chokepoints,
            patterns: tables.patterns,
            barriers: tables.barriers,
        }
    }
}

// ============================================================================
// Built-in data
// ============================================================================

// Order matters: the first region containing a point wins, so the narrower
// northern seas come before the broad UK and Mediterranean boxes.
const REGIONS: &[(&str, Bounds)] = &[
    ("baltic", Bounds::new(53.5, 66.0, 12.0, 30.5)),
    ("norway", Bounds::new(57.5, 72.0, 3.0, 32.0)),
    ("uk", Bounds::new(49.8, 61.0, -11.0, 2.0)),
    ("north_sea", Bounds::new(50.5, 58.0, 2.0, 12.0)),
    // French Channel coast and the Channel Islands, east of Ushant.
    ("english_channel", Bounds::new(48.5, 50.0, -5.0, 2.0)),
    ("biscay", Bounds::new(43.0, 49.7, -5.6, 2.5)),
    ("iberia_atlantic", Bounds::new(36.0, 44.0, -10.5, -5.6)),
    ("mediterranean", Bounds::new(30.0, 46.0, -5.6, 36.5)),
    ("atlantic_islands", Bounds::new(27.0, 40.0, -32.0, -13.0)),
    ("caribbean", Bounds::new(9.0, 27.0, -90.0, -59.0)),
];

// (id, label, lat, lon). Points sit offshore of the named feature.
const CHOKEPOINTS: &[(&str, &str, f64, f64)] = &[
    ("channel_exit", "English Channel exit", 49.6, -5.8),
    ("ushant", "Ushant", 48.6, -5.5),
    ("biscay_corner", "Bay of Biscay", 45.0, -9.0),
    ("cape_finisterre", "Cape Finisterre", 42.9, -9.8),
    ("cape_sao_vicente", "Cape São Vicente", 36.9, -9.4),
    ("gibraltar", "Strait of Gibraltar", 35.95, -5.6),
    ("dover", "Strait of Dover", 51.0, 1.5),
    ("skagen", "Skagen", 57.9, 10.8),
    ("oresund", "Øresund", 55.9, 12.7),
    ("messina", "Strait of Messina", 38.2, 15.62),
];

// (from, to, via). All built-in passages are bidirectional.
const PATTERNS: &[(&str, &str, &[&str])] = &[
    (
        "uk",
        "mediterranean",
        &["channel_exit", "biscay_corner", "cape_finisterre", "cape_sao_vicente", "gibraltar"],
    ),
    ("uk", "iberia_atlantic", &["channel_exit", "biscay_corner", "cape_finisterre"]),
    ("uk", "atlantic_islands", &["channel_exit", "biscay_corner", "cape_finisterre"]),
    ("uk", "biscay", &["channel_exit", "ushant"]),
    ("uk", "north_sea", &["dover"]),
    ("uk", "norway", &["dover"]),
    ("uk", "baltic", &["dover", "skagen", "oresund"]),
    // Channel ports reach the UK and the North Sea directly.
    ("english_channel", "biscay", &["channel_exit", "ushant"]),
    (
        "english_channel",
        "mediterranean",
        &["channel_exit", "biscay_corner", "cape_finisterre", "cape_sao_vicente", "gibraltar"],
    ),
    ("english_channel", "iberia_atlantic", &["channel_exit", "biscay_corner", "cape_finisterre"]),
    ("english_channel", "atlantic_islands", &["channel_exit", "biscay_corner", "cape_finisterre"]),
    ("english_channel", "norway", &["dover"]),
    ("english_channel", "baltic", &["dover", "skagen", "oresund"]),
    ("biscay", "mediterranean", &["cape_finisterre", "cape_sao_vicente", "gibraltar"]),
    ("iberia_atlantic", "mediterranean", &["cape_sao_vicente", "gibraltar"]),
    ("mediterranean", "atlantic_islands", &["gibraltar"]),
    ("norway", "baltic", &["skagen", "oresund"]),
    ("north_sea", "baltic", &["skagen", "oresund"]),
];

// (name, band, corrective chokepoint). Checked in order, first hit wins.
const BARRIERS: &[(&str, Bounds, &str)] = &[
    ("iberian_peninsula", Bounds::new(36.5, 43.5, -7.0, -1.0), "gibraltar"),
    ("brittany_peninsula", Bounds::new(47.3, 49.0, -3.0, -2.5), "ushant"),
    ("italian_peninsula", Bounds::new(38.5, 44.0, 14.5, 16.0), "messina"),
    ("scandinavian_peninsula", Bounds::new(57.0, 64.0, 11.0, 16.0), "skagen"),
];

fn builtin_data() -> TableData {
    TableData {
        version: BUILTIN_TABLE_VERSION,
        regions: REGIONS
            .iter()
            .map(|&(name, bounds)| RegionDef {
                name: name.to_string(),
                bounds,
            })
            .collect(),
        chokepoints: CHOKEPOINTS
            .iter()
            .map(|&(id, label, latitude, longitude)| Chokepoint {
                id: id.to_string(),
                label: label.to_string(),
                latitude,
                longitude,
            })
            .collect(),
        patterns: PATTERNS
            .iter()
            .map(|&(from, to, via)| RoutePattern {
                from: from.to_string(),
                to: to.to_string(),
                via: via.iter().map(|id| id.to_string()).collect(),
                bidirectional: true,
            })
            .collect(),
        barriers: BARRIERS
            .iter()
            .map(|&(name, bounds, waypoint)| Barrier {
                name: name.to_string(),
                bounds,
                waypoint: waypoint.to_string(),
            })
            .collect(),
    }
}
