//! Serialization and deserialization of dungeon snapshots.
//!
//! A snapshot is written to the backing document as JSON with three named
//! sections plus bookkeeping:
//!
//! ```json
//! {
//!   "version": 1,
//!   "metadata": { "savedAt": "2026-10-19T12:00:00Z", "savedBy": "gm" },
//!   "geometry": [ [ [[0,0],[100,0],[100,100],[0,100]] ] ],
//!   "doors": [ [50,0,50,10] ],
//!   "config": { "wallThickness": 8, ... }
//! }
//! ```
//!
//! `geometry` is `null` for an empty region, otherwise a list of polygons;
//! each polygon is a list of rings whose first ring is the exterior and the
//! rest are holes. Rings carry no repeated closing point.

use chrono::{DateTime, Utc};
use dungeondraw_core::{ActorId, StateError};
use dungeondraw_settings::StyleConfig;
use serde::{Deserialize, Serialize};

use crate::region::{Region, RegionPolygon};
use crate::shapes::{Door, Point};

/// Payload format version
pub const PAYLOAD_VERSION: u32 = 1;

pub type RingData = Vec<[f64; 2]>;
pub type PolygonData = Vec<RingData>;

/// Complete persisted snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonPayload {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PayloadMetadata>,
    #[serde(default)]
    pub geometry: Option<Vec<PolygonData>>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub config: StyleConfig,
}

/// Who wrote the payload and when. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadMetadata {
    pub saved_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_by: Option<ActorId>,
}

fn default_version() -> u32 {
    PAYLOAD_VERSION
}

impl DungeonPayload {
    pub fn to_json(&self) -> Result<String, StateError> {
        serde_json::to_string(self).map_err(|e| StateError::Malformed {
            reason: format!("failed to serialize: {}", e),
        })
    }

    pub fn from_json(content: &str) -> Result<Self, StateError> {
        let payload: Self = serde_json::from_str(content).map_err(|e| StateError::Malformed {
            reason: e.to_string(),
        })?;
        if payload.version > PAYLOAD_VERSION {
            return Err(StateError::UnsupportedVersion {
                found: payload.version,
                supported: PAYLOAD_VERSION,
            });
        }
        Ok(payload)
    }
}

pub fn encode_region(region: &Region) -> Option<Vec<PolygonData>> {
    if region.is_empty() {
        return None;
    }
    let encode_ring = |ring: &[Point]| ring.iter().map(|p| [p.x, p.y]).collect::<RingData>();
    Some(
        region
            .polygons()
            .iter()
            .map(|poly| {
                std::iter::once(encode_ring(&poly.exterior))
                    .chain(poly.holes.iter().map(|h| encode_ring(h)))
                    .collect()
            })
            .collect(),
    )
}

pub fn decode_region(geometry: Option<&[PolygonData]>) -> Result<Region, StateError> {
    let Some(polygons) = geometry else {
        return Ok(Region::empty());
    };

    let mut decoded = Vec::with_capacity(polygons.len());
    for (index, rings) in polygons.iter().enumerate() {
        let mut rings = rings.iter().map(|ring| decode_ring(ring, index));
        let exterior = match rings.next() {
            Some(ring) => ring?,
            None => {
                return Err(StateError::Malformed {
                    reason: format!("polygon {} has no rings", index),
                })
            }
        };
        let holes = rings.collect::<Result<Vec<_>, _>>()?;
        decoded.push(RegionPolygon::with_holes(exterior, holes));
    }
    Ok(Region::from_polygons(decoded))
}

fn decode_ring(ring: &RingData, polygon: usize) -> Result<Vec<Point>, StateError> {
    if ring.len() < 3 {
        return Err(StateError::Malformed {
            reason: format!("polygon {} has a ring with {} points", polygon, ring.len()),
        });
    }
    if ring.iter().flatten().any(|v| !v.is_finite()) {
        return Err(StateError::Malformed {
            reason: format!("polygon {} has a non-finite coordinate", polygon),
        });
    }
    Ok(ring.iter().map(|&c| Point::from(c)).collect())
}

pub fn validate_doors(doors: &[Door]) -> Result<(), StateError> {
    for (index, door) in doors.iter().enumerate() {
        let values: [f64; 4] = (*door).into();
        if values.iter().any(|v| !v.is_finite()) {
            return Err(StateError::Malformed {
                reason: format!("door {} has a non-finite coordinate", index),
            });
        }
    }
    Ok(())
}
