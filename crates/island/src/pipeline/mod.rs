//! The frame-synchronous editor pipeline.
//!
//! Connects the pieces end to end:
//! 1. Pointer input arrives as `begin_stroke` / `stroke_to` / `end_stroke`
//!    (sculpting) or `preview_placement` / `commit_placement` (decor)
//! 2. The brush mutates the live surface in place, one application per
//!    rendered frame
//! 3. Stroke and placement boundaries commit atomic snapshots to the store
//! 4. Undo/redo/reset restore snapshots back onto the live buffers
//!
//! Everything is single-threaded and runs inside the render loop callback;
//! nothing here blocks or suspends.

mod placing;
mod stroke;
mod undo;

use glam::Vec2;
use tracing::{debug, warn};

use terrain::{
    BrushEngine, BrushSettings, EdgeWeightMap, SpatialIndex, TerrainSurface,
    DEFAULT_EDGE_CLAMP_RADIUS, DEFAULT_RESOLUTION,
};

use crate::placement::PlacementValidator;
use crate::registry::DecorRegistry;
use crate::snapshot::{IslandMeta, IslandSnapshot};
use crate::state::IslandStore;

/// Editor pipeline owning the live surface and the committed state.
pub struct EditorPipeline {
    /// Live mesh buffers consumed by the render layer.
    pub(crate) surface: TerrainSurface,
    /// Rebuilt only when the geometry is replaced, never per edit.
    pub(crate) spatial: SpatialIndex,
    pub(crate) edge_weights: EdgeWeightMap,
    pub(crate) brush: BrushEngine,
    pub(crate) validator: PlacementValidator,
    pub(crate) store: IslandStore,
    /// True between `begin_stroke` and `end_stroke`.
    pub(crate) stroking: bool,
}

impl EditorPipeline {
    /// Fresh island: flat plane at the default resolution, built-in decor
    /// registry.
    pub fn new() -> Self {
        Self::with_resolution(DEFAULT_RESOLUTION, DEFAULT_EDGE_CLAMP_RADIUS)
    }

    pub fn with_resolution(resolution: u32, edge_clamp_radius: f32) -> Self {
        let surface = TerrainSurface::flat_plane(resolution);
        Self::from_parts(surface, edge_clamp_radius, DecorRegistry::with_defaults(), Vec::new())
    }

    /// Restore an island from a snapshot. A missing or mis-sized terrain
    /// array falls back to the default flat plane; placed items load
    /// regardless.
    pub fn from_snapshot(
        resolution: u32,
        edge_clamp_radius: f32,
        snapshot: &IslandSnapshot,
    ) -> Self {
        let mut surface = TerrainSurface::flat_plane(resolution);
        match snapshot.terrain_for(surface.positions().len()) {
            Ok(terrain) => {
                // Length was just validated; apply cannot fail.
                let _ = surface.apply_snapshot(terrain);
                surface.recompute_normals();
            }
            Err(err) => warn!("{err}; using default plane"),
        }

        Self::from_parts(
            surface,
            edge_clamp_radius,
            DecorRegistry::with_defaults(),
            snapshot.history.placed_items.clone(),
        )
    }

    fn from_parts(
        surface: TerrainSurface,
        edge_clamp_radius: f32,
        registry: DecorRegistry,
        placed_items: Vec<crate::decor::DecorItem>,
    ) -> Self {
        let spatial = SpatialIndex::build(surface.uvs());
        let edge_weights =
            EdgeWeightMap::build(surface.positions(), surface.uvs(), edge_clamp_radius);
        let store = IslandStore::new(surface.snapshot(), placed_items);

        debug!(
            "pipeline ready: {} vertices, edge clamp radius {edge_clamp_radius}",
            surface.vertex_count()
        );

        Self {
            surface,
            spatial,
            edge_weights,
            brush: BrushEngine::default(),
            validator: PlacementValidator::new(registry),
            store,
            stroking: false,
        }
    }

    /// The live surface the render layer reads (positions, normals, dirty
    /// flag, byte views).
    pub fn surface(&self) -> &TerrainSurface {
        &self.surface
    }

    pub fn store(&self) -> &IslandStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut IslandStore {
        &mut self.store
    }

    pub fn brush_settings(&self) -> &BrushSettings {
        &self.brush.settings
    }

    pub fn brush_settings_mut(&mut self) -> &mut BrushSettings {
        &mut self.brush.settings
    }

    pub fn validator(&self) -> &PlacementValidator {
        &self.validator
    }

    pub fn registry(&self) -> &DecorRegistry {
        self.validator.registry()
    }

    /// Change the edge falloff band width. Weights are recomputed; the
    /// pristine position capture from first build is preserved.
    pub fn set_edge_clamp_radius(&mut self, radius: f32) {
        self.edge_weights.rebuild(self.surface.uvs(), radius);
    }

    pub fn edge_weights(&self) -> &EdgeWeightMap {
        &self.edge_weights
    }

    /// Grid cell lookup for debug overlays.
    pub fn spatial_cell_of(&self, uv: Vec2) -> (u32, u32) {
        self.spatial.cell_of(uv.x, uv.y)
    }

    /// Export the committed state (not the in-progress stroke).
    pub fn export_snapshot(&self, meta: IslandMeta) -> IslandSnapshot {
        IslandSnapshot::capture(meta, self.store.state())
    }
}

impl Default for EditorPipeline {
    fn default() -> Self {
        Self::new()
    }
}
