//! Decor placement through the pipeline.
//!
//! Placement runs once per rendered frame while placement mode is active:
//! raycast, evaluate, preview. Nothing touches committed state until a
//! committing input lands on a valid preview.

use tracing::debug;

use crate::placement::PlacementPreview;
use crate::raycast::{Ray, RaycastProvider, TerrainRaycaster};

use super::EditorPipeline;

impl EditorPipeline {
    /// Evaluate a placement frame against an external raycast provider.
    ///
    /// `None` means nothing to preview this frame (no hit, or unknown
    /// kind); not an error.
    pub fn preview_placement(
        &self,
        kind: &str,
        ray: &Ray,
        provider: &dyn RaycastProvider,
    ) -> Option<PlacementPreview> {
        let hit = provider.cast(ray);
        self.validator.evaluate(kind, hit.as_ref())
    }

    /// Evaluate a placement frame against the pipeline's own terrain.
    pub fn preview_on_terrain(&self, kind: &str, ray: &Ray) -> Option<PlacementPreview> {
        self.preview_placement(kind, ray, &TerrainRaycaster::new(&self.surface))
    }

    /// Commit a valid preview: allocate an id, apply scale variance, append
    /// to the decor list, and push one atomic history entry.
    ///
    /// Invalid previews commit nothing and return `None`.
    pub fn commit_placement(&mut self, preview: &PlacementPreview) -> Option<u64> {
        if !preview.valid {
            debug!("placement commit suppressed: invalid preview");
            return None;
        }
        let id = self.store.next_decor_id();
        let item = self.validator.finalize(preview, id)?;
        self.store.place(item);
        Some(id)
    }

    /// Remove placed items by id (single history entry).
    pub fn delete_placed(&mut self, ids: &[u64]) {
        self.store.delete_placed(ids);
    }
}
