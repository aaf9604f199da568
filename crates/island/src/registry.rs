//! Per-kind placement rules and decor defaults.
//!
//! Rules are plain data plus a small tagged variant for height handling:
//! intersect-style kinds are gated on the hit height, float-style kinds
//! compute their height from it. No per-kind behaviour lives anywhere else.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How a kind's vertical placement is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HeightRule {
    /// Valid iff the hit height lies within the (optional) bounds.
    Intersect {
        min: Option<f32>,
        max: Option<f32>,
    },
    /// Height is computed, never gated:
    /// `y = base + (hit_y − base) · ratio`, clamped into
    /// `[hit_y + min, max]`.
    Float {
        base: f32,
        ratio: f32,
        min: f32,
        max: f32,
    },
}

/// Placement constraints for one decor kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRule {
    /// Whether a terrain intersection is required at all.
    pub must_intersect: bool,
    pub height: HeightRule,
    /// Fixed vertical offset applied to the hit point (docks sink slightly
    /// below the surface, for example).
    pub y_compensation: f32,
    /// Width of the uniform scale jitter applied on commit; the final
    /// multiplier lies in `1 ± scale_variance / 2`.
    pub scale_variance: f32,
}

impl Default for PlacementRule {
    fn default() -> Self {
        Self {
            must_intersect: true,
            height: HeightRule::Intersect { min: None, max: None },
            y_compensation: 0.0,
            scale_variance: 0.0,
        }
    }
}

/// Rule plus visual defaults for one decor kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorDefinition {
    pub rule: PlacementRule,
    pub scale: Vec3,
    pub color: [f32; 3],
}

/// Maps decor kind keys to their definitions.
#[derive(Debug, Clone)]
pub struct DecorRegistry {
    definitions: HashMap<String, DecorDefinition>,
}

impl DecorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in island decor kinds.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.insert(
            "tree",
            DecorDefinition {
                rule: PlacementRule {
                    // Above the shoreline, anywhere upwards.
                    height: HeightRule::Intersect {
                        min: Some(0.02),
                        max: None,
                    },
                    scale_variance: 0.3,
                    ..Default::default()
                },
                scale: Vec3::ONE,
                color: [0.36, 0.25, 0.13],
            },
        );

        registry.insert(
            "house",
            DecorDefinition {
                rule: PlacementRule {
                    height: HeightRule::Intersect {
                        min: Some(0.02),
                        max: Some(0.6),
                    },
                    scale_variance: 0.1,
                    ..Default::default()
                },
                scale: Vec3::ONE,
                color: [0.2, 0.35, 0.8],
            },
        );

        registry.insert(
            "dock",
            DecorDefinition {
                rule: PlacementRule {
                    // Shoreline only, sunk slightly into the surface.
                    height: HeightRule::Intersect {
                        min: None,
                        max: Some(0.02),
                    },
                    y_compensation: -0.01,
                    ..Default::default()
                },
                scale: Vec3::ONE,
                color: [0.55, 0.42, 0.26],
            },
        );

        registry.insert(
            "cloud",
            DecorDefinition {
                rule: PlacementRule {
                    must_intersect: false,
                    height: HeightRule::Float {
                        base: 0.5,
                        ratio: 0.3,
                        min: 0.2,
                        max: 0.9,
                    },
                    scale_variance: 0.2,
                    ..Default::default()
                },
                scale: Vec3::ONE,
                color: [0.95, 0.95, 0.97],
            },
        );

        registry.insert(
            "debugBox",
            DecorDefinition {
                rule: PlacementRule::default(),
                scale: Vec3::splat(0.1),
                color: [1.0, 0.0, 0.0],
            },
        );

        registry.insert(
            "debugSphere",
            DecorDefinition {
                rule: PlacementRule::default(),
                scale: Vec3::splat(0.05),
                color: [0.0, 0.0, 1.0],
            },
        );

        registry
    }

    pub fn insert(&mut self, kind: impl Into<String>, definition: DecorDefinition) {
        self.definitions.insert(kind.into(), definition);
    }

    pub fn get(&self, kind: &str) -> Option<&DecorDefinition> {
        self.definitions.get(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for DecorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
