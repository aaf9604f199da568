//! Per-vertex edge falloff weights.
//!
//! The island boundary must stay pinned while sculpting: a weight of 0 means
//! the vertex is frozen, 1 means it is fully sculptable, with a smooth
//! transition band of configurable width between the two.
//!
//! Distance from the UV center blends Chebyshev and Euclidean metrics
//! (0.7/0.3) so the frozen band follows the island silhouette without
//! grid-aligned banding. The transition uses the smootherstep polynomial
//! `t³(t(6t−15)+10)`, which is C¹-continuous at both ends.
//!
//! Building the map also captures the pristine position buffer exactly once;
//! the capture survives rebuilds triggered by clamp-radius changes and backs
//! the full-reset operation.

use crate::constants::EDGE_BLEND;

/// Edge falloff weights plus the one-time pristine position capture.
#[derive(Debug, Clone)]
pub struct EdgeWeightMap {
    weights: Vec<f32>,
    edge_clamp_radius: f32,
    original_positions: Vec<f32>,
}

impl EdgeWeightMap {
    /// Compute weights for a UV buffer (2 floats per vertex) and capture the
    /// untouched position buffer for later reset.
    pub fn build(positions: &[f32], uvs: &[f32], edge_clamp_radius: f32) -> Self {
        Self {
            weights: compute_weights(uvs, edge_clamp_radius),
            edge_clamp_radius,
            original_positions: positions.to_vec(),
        }
    }

    /// Recompute weights for a new clamp radius.
    ///
    /// The pristine position capture from the first build is kept as-is.
    pub fn rebuild(&mut self, uvs: &[f32], edge_clamp_radius: f32) {
        self.weights = compute_weights(uvs, edge_clamp_radius);
        self.edge_clamp_radius = edge_clamp_radius;
    }

    /// Weight for a vertex, or `None` if no weight was computed for it
    /// (e.g. the geometry grew after the map was built).
    pub fn weight(&self, vertex: usize) -> Option<f32> {
        self.weights.get(vertex).copied()
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// The untouched position buffer captured at first build.
    pub fn original_positions(&self) -> &[f32] {
        &self.original_positions
    }

    pub fn edge_clamp_radius(&self) -> f32 {
        self.edge_clamp_radius
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn compute_weights(uvs: &[f32], edge_clamp_radius: f32) -> Vec<f32> {
    let vertex_count = uvs.len() / 2;
    let mut weights = Vec::with_capacity(vertex_count);
    for i in 0..vertex_count {
        weights.push(weight_for_uv(uvs[i * 2], uvs[i * 2 + 1], edge_clamp_radius));
    }
    weights
}

fn weight_for_uv(u: f32, v: f32, edge_clamp_radius: f32) -> f32 {
    let dist_u = (u - 0.5).abs();
    let dist_v = (v - 0.5).abs();

    // Blend Chebyshev and Euclidean distance to soften the square silhouette.
    let chebyshev = dist_u.max(dist_v);
    let euclidean = (dist_u * dist_u + dist_v * dist_v).sqrt();
    let dist_from_center = chebyshev * EDGE_BLEND + euclidean * (1.0 - EDGE_BLEND);

    // 0.5 is the half-width of the plane in UV space.
    let dist_from_edge = 0.5 - dist_from_center;

    if dist_from_edge <= 0.0 {
        0.0
    } else if dist_from_edge >= edge_clamp_radius {
        1.0
    } else {
        smootherstep(dist_from_edge / edge_clamp_radius)
    }
}

/// Smootherstep: `6t⁵ − 15t⁴ + 10t³`.
fn smootherstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}
