//! Sculpt brush: settings, falloff kernel, and in-place height application.
//!
//! The brush operates in UV space. UI-facing size/strength are normalized
//! [0, 1] values mapped onto fixed engineering ranges
//! ([`MIN_RADIUS`]..[`MAX_RADIUS`], [`MIN_STRENGTH`]..[`MAX_STRENGTH`]) so raw
//! units never leak out of the engine.
//!
//! One [`BrushEngine::apply`] call is a single application; a stroke is many
//! such calls, one per rendered frame while the pointer is held. Committing
//! the result to history is the pipeline's job, not the brush's.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    FALLOFF_GAIN, MAX_HEIGHT, MAX_RADIUS, MAX_STRENGTH, MIN_HEIGHT, MIN_RADIUS, MIN_STRENGTH,
};
use crate::edge_weight::EdgeWeightMap;
use crate::spatial::SpatialIndex;
use crate::surface::TerrainSurface;

/// Direction of the height delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushMode {
    /// Raise terrain.
    #[default]
    Add,
    /// Lower terrain.
    Subtract,
}

impl BrushMode {
    fn sign(self) -> f32 {
        match self {
            BrushMode::Add => 1.0,
            BrushMode::Subtract => -1.0,
        }
    }
}

/// Normalized brush parameters as the UI hands them over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    /// Brush size, 0..1.
    pub size: f32,
    /// Brush strength, 0..1. Zero is an inert brush.
    pub strength: f32,
    pub mode: BrushMode,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            size: 0.5,
            strength: 0.5,
            mode: BrushMode::Add,
        }
    }
}

impl BrushSettings {
    pub fn set_size(&mut self, size: f32) {
        self.size = size.clamp(0.0, 1.0);
    }

    pub fn set_strength(&mut self, strength: f32) {
        self.strength = strength.clamp(0.0, 1.0);
    }

    /// Brush radius in UV units.
    pub fn radius(&self) -> f32 {
        map_linear(self.size.clamp(0.0, 1.0), MIN_RADIUS, MAX_RADIUS)
    }

    /// Height delta per application at full falloff.
    pub fn strength_units(&self) -> f32 {
        map_linear(self.strength.clamp(0.0, 1.0), MIN_STRENGTH, MAX_STRENGTH)
    }
}

/// Quadratic falloff kernel: soft peak at the center, exactly zero at the
/// rim, continuous in between.
pub fn falloff(distance: f32, radius: f32) -> f32 {
    let t = 1.0 - distance / radius;
    t * t
}

/// Applies height deltas around a UV center, constrained by the spatial
/// index and the edge weight map.
#[derive(Debug, Default)]
pub struct BrushEngine {
    pub settings: BrushSettings,
}

impl BrushEngine {
    pub fn new(settings: BrushSettings) -> Self {
        Self { settings }
    }

    /// Apply one brush application centered at `center` (UV space).
    ///
    /// Candidates come from the spatial index and are filtered by true UV
    /// distance. A vertex is skipped when its edge weight is missing or
    /// zero, and when the resulting height would leave
    /// [`MIN_HEIGHT`]..[`MAX_HEIGHT`] (the delta is rejected for that vertex
    /// only; the rest of the application proceeds).
    ///
    /// Returns the number of vertices modified. Normals are not recomputed
    /// here; the surface is marked dirty and the caller batches the
    /// recompute once per frame.
    pub fn apply(
        &self,
        surface: &mut TerrainSurface,
        index: &SpatialIndex,
        weights: &EdgeWeightMap,
        center: Vec2,
    ) -> usize {
        if self.settings.strength <= 0.0 {
            return 0;
        }

        let radius = self.settings.radius();
        let strength = self.settings.strength_units();
        let sign = self.settings.mode.sign();

        let mut modified = 0;
        for vertex in index.query(center, radius) {
            let vertex = vertex as usize;
            let dist = surface.uv(vertex).distance(center);
            if dist > radius {
                continue;
            }

            // A missing weight means the map predates this vertex; skip
            // rather than treating it as frozen-by-default.
            let Some(weight) = weights.weight(vertex) else {
                continue;
            };
            if weight <= 0.0 {
                continue;
            }

            let delta = strength * FALLOFF_GAIN * falloff(dist, radius) * sign * weight;
            let new_height = surface.height(vertex) + delta;
            if (MIN_HEIGHT..=MAX_HEIGHT).contains(&new_height) {
                surface.set_height(vertex, new_height);
                modified += 1;
            }
        }

        if modified > 0 {
            surface.mark_dirty();
        }
        debug!(
            "brush {:?} at ({:.3}, {:.3}) radius {:.3}: {} vertices",
            self.settings.mode, center.x, center.y, radius, modified
        );
        modified
    }
}

fn map_linear(t: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (out_max - out_min) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_EDGE_CLAMP_RADIUS;

    fn setup(resolution: u32) -> (TerrainSurface, SpatialIndex, EdgeWeightMap) {
        let surface = TerrainSurface::flat_plane(resolution);
        let index = SpatialIndex::build(surface.uvs());
        let weights = EdgeWeightMap::build(
            surface.positions(),
            surface.uvs(),
            DEFAULT_EDGE_CLAMP_RADIUS,
        );
        (surface, index, weights)
    }

    fn brush(strength: f32, mode: BrushMode) -> BrushEngine {
        BrushEngine::new(BrushSettings {
            size: 0.5,
            strength,
            mode,
        })
    }

    #[test]
    fn test_settings_map_to_engineering_ranges() {
        let mut settings = BrushSettings::default();
        settings.set_size(0.0);
        assert_eq!(settings.radius(), MIN_RADIUS);
        settings.set_size(1.0);
        assert_eq!(settings.radius(), MAX_RADIUS);
        settings.set_strength(1.0);
        assert_eq!(settings.strength_units(), MAX_STRENGTH);

        // Setters clamp out-of-range input.
        settings.set_size(2.5);
        assert_eq!(settings.size, 1.0);
        settings.set_strength(-1.0);
        assert_eq!(settings.strength, 0.0);
    }

    #[test]
    fn test_falloff_shape() {
        assert_eq!(falloff(0.0, 0.1), 1.0);
        assert_eq!(falloff(0.1, 0.1), 0.0);
        let mid = falloff(0.05, 0.1);
        assert!((mid - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_zero_strength_is_noop() {
        let (mut surface, index, weights) = setup(32);
        let before = surface.snapshot();

        let modified = brush(0.0, BrushMode::Add).apply(
            &mut surface,
            &index,
            &weights,
            Vec2::splat(0.5),
        );

        assert_eq!(modified, 0);
        assert_eq!(surface.positions(), before.as_slice());
    }

    #[test]
    fn test_add_raises_center() {
        let (mut surface, index, weights) = setup(32);
        let modified = brush(0.5, BrushMode::Add).apply(
            &mut surface,
            &index,
            &weights,
            Vec2::splat(0.5),
        );

        assert!(modified > 0);
        assert!(surface.needs_normal_update());
        let (min, max) = surface.z_extrema();
        assert_eq!(min, 0.0);
        assert!(max > 0.0);
    }

    #[test]
    fn test_subtract_then_add_restores_heights() {
        let (mut surface, index, weights) = setup(32);
        let before = surface.snapshot();
        let center = Vec2::new(0.5, 0.5);

        brush(0.5, BrushMode::Subtract).apply(&mut surface, &index, &weights, center);
        brush(0.5, BrushMode::Add).apply(&mut surface, &index, &weights, center);

        for (a, b) in surface.positions().iter().zip(before.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_boundary_vertices_never_move() {
        let (mut surface, index, weights) = setup(32);

        // Paint directly on the UV boundary; frozen vertices must hold.
        brush(1.0, BrushMode::Add).apply(&mut surface, &index, &weights, Vec2::new(0.0, 0.5));

        for i in 0..surface.vertex_count() {
            let uv = surface.uv(i);
            if uv.x == 0.0 || uv.x == 1.0 || uv.y == 0.0 || uv.y == 1.0 {
                assert_eq!(surface.height(i), 0.0, "boundary vertex {i} moved");
            }
        }
    }

    #[test]
    fn test_rejects_out_of_bounds_delta() {
        let (mut surface, index, weights) = setup(32);
        let center = Vec2::splat(0.5);

        // Pin the vertex closest to the brush center at the ceiling.
        let peak = surface
            .uvs()
            .chunks_exact(2)
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = Vec2::new(a[0], a[1]).distance(center);
                let db = Vec2::new(b[0], b[1]).distance(center);
                da.total_cmp(&db)
            })
            .map(|(i, _)| i)
            .unwrap();
        surface.set_height(peak, MAX_HEIGHT);

        let modified = brush(1.0, BrushMode::Add).apply(&mut surface, &index, &weights, center);

        // The saturated vertex is rejected (not clamped) while in-range
        // neighbours still move.
        assert_eq!(surface.height(peak), MAX_HEIGHT);
        assert!(modified > 0);
    }

    #[test]
    fn test_missing_edge_weights_skip_vertices() {
        let (mut surface, index, _) = setup(32);

        // A weight map built for a smaller mesh covers none of these
        // vertices; every candidate must be skipped, not frozen to zero and
        // not defaulted into motion.
        let tiny = TerrainSurface::flat_plane(2);
        let stale = EdgeWeightMap::build(tiny.positions(), tiny.uvs(), 0.1);
        let before = surface.snapshot();

        // Every candidate near (0.9, 0.9) lies beyond the stale map's
        // coverage, so the whole application is a no-op.
        let modified = BrushEngine::new(BrushSettings {
            size: 1.0,
            strength: 1.0,
            mode: BrushMode::Add,
        })
        .apply(&mut surface, &index, &stale, Vec2::new(0.9, 0.9));

        assert_eq!(modified, 0);
        assert_eq!(surface.positions(), before.as_slice());
    }
}
