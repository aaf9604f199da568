//! Stroke handling for the editor pipeline.
//!
//! A stroke is one pointer-down-to-pointer-up sequence: many brush
//! applications (one per rendered frame) mutating the live buffer, then a
//! single atomic history commit at release. There is no mid-stroke
//! rollback; releasing the pointer commits whatever state exists.

use glam::Vec2;
use tracing::debug;

use super::EditorPipeline;

impl EditorPipeline {
    /// Begin a sculpt stroke (pointer down on the terrain).
    pub fn begin_stroke(&mut self) {
        self.stroking = true;
    }

    /// Apply one brush application at a UV position (called once per frame
    /// while the pointer is held). Returns the number of modified vertices.
    ///
    /// Normals are recomputed once per application, after the full
    /// candidate pass.
    pub fn stroke_to(&mut self, center_uv: Vec2) -> usize {
        if !self.stroking {
            debug!("stroke_to without active stroke, ignoring");
            return 0;
        }

        let modified = self.brush.apply(
            &mut self.surface,
            &self.spatial,
            &self.edge_weights,
            center_uv,
        );
        if modified > 0 {
            self.surface.recompute_normals();
        }
        modified
    }

    /// End the stroke (pointer up) and commit the resulting terrain as one
    /// history entry. A stroke with no net change is coalesced by the
    /// store and leaves history untouched.
    pub fn end_stroke(&mut self) {
        if !self.stroking {
            return;
        }
        self.stroking = false;
        self.store.commit_terrain(self.surface.snapshot());
    }

    pub fn is_stroking(&self) -> bool {
        self.stroking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain::BrushMode;

    #[test]
    fn test_stroke_lifecycle_commits_once() {
        let mut pipeline = EditorPipeline::with_resolution(32, 0.1);

        pipeline.begin_stroke();
        assert!(pipeline.is_stroking());
        let moved_a = pipeline.stroke_to(Vec2::new(0.5, 0.5));
        let moved_b = pipeline.stroke_to(Vec2::new(0.52, 0.5));
        assert!(moved_a > 0 && moved_b > 0);
        pipeline.end_stroke();

        assert!(!pipeline.is_stroking());
        // Seed entry + one stroke entry, no matter how many applications.
        assert_eq!(pipeline.store().history().depth(), 2);
        let (_, max) = pipeline.surface().z_extrema();
        assert!(max > 0.0);
    }

    #[test]
    fn test_stroke_to_without_begin_is_ignored() {
        let mut pipeline = EditorPipeline::with_resolution(32, 0.1);
        assert_eq!(pipeline.stroke_to(Vec2::splat(0.5)), 0);
        assert_eq!(pipeline.surface().z_extrema(), (0.0, 0.0));
    }

    #[test]
    fn test_no_net_change_stroke_is_coalesced() {
        let mut pipeline = EditorPipeline::with_resolution(32, 0.1);
        pipeline.brush_settings_mut().set_strength(0.0);

        pipeline.begin_stroke();
        pipeline.stroke_to(Vec2::splat(0.5));
        pipeline.end_stroke();

        assert_eq!(pipeline.store().history().depth(), 1);
    }

    #[test]
    fn test_lower_then_raise_restores_terrain() {
        let mut pipeline = EditorPipeline::with_resolution(32, 0.1);
        let before = pipeline.surface().snapshot();

        pipeline.brush_settings_mut().mode = BrushMode::Subtract;
        pipeline.begin_stroke();
        pipeline.stroke_to(Vec2::splat(0.5));
        pipeline.end_stroke();

        pipeline.brush_settings_mut().mode = BrushMode::Add;
        pipeline.begin_stroke();
        pipeline.stroke_to(Vec2::splat(0.5));
        pipeline.end_stroke();

        for (a, b) in pipeline.surface().positions().iter().zip(before.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mid_stroke_release_commits_partial_state() {
        let mut pipeline = EditorPipeline::with_resolution(32, 0.1);

        pipeline.begin_stroke();
        pipeline.stroke_to(Vec2::splat(0.5));
        // Pointer leaves the window mid-stroke: commit what exists.
        pipeline.end_stroke();

        let committed = &pipeline.store().state().terrain;
        assert_eq!(committed, &pipeline.surface().snapshot());
    }
}
