//! UV-space spatial index for brush queries.
//!
//! Buckets vertex indices into a fixed G×G grid over the UV unit square so
//! that a brush application only visits vertices in the cells its radius
//! overlaps. Query cost is bounded by the candidate cell count and is
//! independent of total vertex count for a fixed radius.
//!
//! The index is rebuilt only when the underlying geometry is replaced
//! (load/resize), never per edit.

use glam::Vec2;
use tracing::debug;

use crate::constants::DEFAULT_GRID_SIZE;

/// Grid partition of vertex indices keyed by UV cell.
#[derive(Debug)]
pub struct SpatialIndex {
    /// Row-major G×G cells, each holding the vertex indices inside it.
    cells: Vec<Vec<u32>>,
    grid_size: u32,
    vertex_count: usize,
}

impl SpatialIndex {
    /// Build an index over a UV buffer (2 floats per vertex) with the
    /// default grid size.
    pub fn build(uvs: &[f32]) -> Self {
        Self::with_grid_size(uvs, DEFAULT_GRID_SIZE)
    }

    /// Build an index with an explicit grid size.
    pub fn with_grid_size(uvs: &[f32], grid_size: u32) -> Self {
        let grid_size = grid_size.max(1);
        let vertex_count = uvs.len() / 2;
        let mut cells = vec![Vec::new(); (grid_size * grid_size) as usize];

        for i in 0..vertex_count {
            let u = uvs[i * 2];
            let v = uvs[i * 2 + 1];
            let (cu, cv) = cell_of(u, v, grid_size);
            cells[(cv * grid_size + cu) as usize].push(i as u32);
        }

        debug!(
            "spatial index built: {} vertices across {}x{} cells",
            vertex_count, grid_size, grid_size
        );

        Self {
            cells,
            grid_size,
            vertex_count,
        }
    }

    /// Collect every vertex index in the cells a brush of `radius` around
    /// `center` can overlap.
    ///
    /// This is a conservative superset: every vertex whose true UV distance
    /// from `center` is within `radius` is included, along with others in
    /// the same cells. Callers must still filter by actual distance.
    pub fn query(&self, center: Vec2, radius: f32) -> Vec<u32> {
        let g = self.grid_size;
        let span = (radius * g as f32).ceil() as i64;
        let (cu, cv) = cell_of(center.x, center.y, g);

        let u_start = (cu as i64 - span).max(0) as u32;
        let u_end = (cu as i64 + span).min(g as i64 - 1) as u32;
        let v_start = (cv as i64 - span).max(0) as u32;
        let v_end = (cv as i64 + span).min(g as i64 - 1) as u32;

        let mut results = Vec::new();
        for v in v_start..=v_end {
            for u in u_start..=u_end {
                results.extend_from_slice(&self.cells[(v * g + u) as usize]);
            }
        }
        results
    }

    /// Grid cell containing a UV coordinate.
    pub fn cell_of(&self, u: f32, v: f32) -> (u32, u32) {
        cell_of(u, v, self.grid_size)
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Total number of indexed vertices.
    pub fn len(&self) -> usize {
        self.vertex_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}

fn cell_of(u: f32, v: f32, grid_size: u32) -> (u32, u32) {
    let clamp = |t: f32| ((t * grid_size as f32).floor() as i64).clamp(0, grid_size as i64 - 1);
    (clamp(u) as u32, clamp(v) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evenly spaced (res+1)² UV grid over the unit square.
    fn grid_uvs(res: usize) -> Vec<f32> {
        let mut uvs = Vec::new();
        for row in 0..=res {
            for col in 0..=res {
                uvs.push(col as f32 / res as f32);
                uvs.push(row as f32 / res as f32);
            }
        }
        uvs
    }

    #[test]
    fn test_build_indexes_every_vertex() {
        let uvs = grid_uvs(8);
        let index = SpatialIndex::build(&uvs);
        assert_eq!(index.len(), 81);

        let total: usize = index.query(Vec2::splat(0.5), 1.0).len();
        assert_eq!(total, 81);
    }

    #[test]
    fn test_boundary_uvs_stay_in_grid() {
        // u/v of exactly 1.0 must clamp into the last cell, not fall off.
        let uvs = [1.0, 1.0, 0.0, 0.0, 1.0, 0.0];
        let index = SpatialIndex::with_grid_size(&uvs, 4);
        assert_eq!(index.cell_of(1.0, 1.0), (3, 3));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_query_is_superset_of_radius() {
        let uvs = grid_uvs(16);
        let index = SpatialIndex::build(&uvs);

        let center = Vec2::new(0.37, 0.61);
        let radius = 0.12;
        let candidates = index.query(center, radius);

        // No false negatives: every vertex truly inside the radius must be
        // among the candidates.
        for i in 0..index.len() {
            let uv = Vec2::new(uvs[i * 2], uvs[i * 2 + 1]);
            if uv.distance(center) <= radius {
                assert!(
                    candidates.contains(&(i as u32)),
                    "vertex {i} at {uv:?} missing from query results"
                );
            }
        }
    }

    #[test]
    fn test_query_near_corner_clamps_span() {
        let uvs = grid_uvs(8);
        let index = SpatialIndex::build(&uvs);

        // Must not panic or wrap when the span extends past the grid edge.
        let candidates = index.query(Vec2::new(0.01, 0.99), 0.3);
        assert!(!candidates.is_empty());
    }

    #[test]
    fn test_query_is_local() {
        let uvs = grid_uvs(16);
        let index = SpatialIndex::build(&uvs);

        // A small brush far from a vertex must not return it.
        let candidates = index.query(Vec2::new(0.1, 0.1), 0.05);
        assert!(candidates.len() < index.len());
        assert!(!candidates.contains(&((index.len() - 1) as u32)));
    }
}
