//! JSON snapshot interchange.
//!
//! The island round-trips through a single JSON document:
//!
//! ```json
//! {
//!   "island":  { "id": "...", "cameraPosition": [x, y, z], "cameraTarget": [x, y, z] },
//!   "history": { "terrainGeomAttrsPosArr": [..], "placedItems": [..] }
//! }
//! ```
//!
//! Field names match the original persisted stores, so exports from older
//! islands import unchanged. Loading is tolerant: a malformed or mis-sized
//! terrain array falls back to the pristine plane rather than failing the
//! import.

use serde::{Deserialize, Serialize};

use crate::decor::DecorItem;
use crate::error::SnapshotError;
use crate::state::IslandState;

/// Complete serialized island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandSnapshot {
    pub island: IslandMeta,
    pub history: HistoryPayload,
}

/// Island identity and camera framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IslandMeta {
    pub id: String,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
}

impl Default for IslandMeta {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            camera_position: [0.0, 2.0, 2.0],
            camera_target: [0.0, 0.0, 0.0],
        }
    }
}

/// The persisted editing state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPayload {
    /// Flat terrain position array, 3 floats per vertex.
    pub terrain_geom_attrs_pos_arr: Vec<f32>,
    pub placed_items: Vec<DecorItem>,
}

impl IslandSnapshot {
    /// Capture the current committed state.
    pub fn capture(meta: IslandMeta, state: &IslandState) -> Self {
        Self {
            island: meta,
            history: HistoryPayload {
                terrain_geom_attrs_pos_arr: state.terrain.clone(),
                placed_items: state.placed_items.clone(),
            },
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed export, matching the downloadable island files.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Terrain array from the snapshot, validated against the expected
    /// buffer length. Callers are expected to fall back to the pristine
    /// plane on error rather than failing the whole import.
    pub fn terrain_for(&self, expected_len: usize) -> Result<&[f32], SnapshotError> {
        let terrain = &self.history.terrain_geom_attrs_pos_arr;
        if terrain.len() == expected_len {
            Ok(terrain)
        } else {
            Err(SnapshotError::TerrainLength {
                expected: expected_len,
                actual: terrain.len(),
            })
        }
    }
}
