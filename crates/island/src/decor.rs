//! Decorative item data model.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A placed decorative object.
///
/// Serializes with the interchange field names (`type` for the kind key,
/// quaternion as `[x, y, z, w]`), so placed items round-trip through the
/// island snapshot format unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Vec3,
    pub quaternion: Quat,
    pub scale: Vec3,
    pub color: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_interchange_field_names() {
        let item = DecorItem {
            id: 7,
            kind: "tree".to_string(),
            position: Vec3::new(0.1, 0.2, 0.3),
            quaternion: Quat::IDENTITY,
            scale: Vec3::ONE,
            color: [0.4, 0.3, 0.2],
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "tree");
        assert_eq!(json["quaternion"][3], 1.0);
        assert_eq!(json["position"][2], serde_json::json!(0.3f32));

        let back: DecorItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
