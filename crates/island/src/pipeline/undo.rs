//! Undo/redo/reset applied to the live buffers.
//!
//! The store moves the history cursor; this file copies the restored
//! snapshot back onto the surface and refreshes normals so the render layer
//! sees a consistent island the same frame.

use tracing::warn;

use super::EditorPipeline;

impl EditorPipeline {
    /// Undo the last committed change. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        let Some(state) = self.store.undo() else {
            return false;
        };
        if let Err(err) = self.surface.apply_snapshot(&state.terrain) {
            warn!("undo skipped: {err}");
            return false;
        }
        self.surface.recompute_normals();
        true
    }

    /// Redo the last undone change. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        let Some(state) = self.store.redo() else {
            return false;
        };
        if let Err(err) = self.surface.apply_snapshot(&state.terrain) {
            warn!("redo skipped: {err}");
            return false;
        }
        self.surface.recompute_normals();
        true
    }

    /// Full island reset: pristine terrain from the edge-weight capture,
    /// decor cleared, history emptied down to the reset baseline.
    pub fn reset_island(&mut self) {
        let original = self.edge_weights.original_positions().to_vec();
        if let Err(err) = self.surface.apply_snapshot(&original) {
            warn!("reset skipped: {err}");
            return;
        }
        self.surface.recompute_normals();
        self.stroking = false;
        self.store.reset(original);
    }
}
