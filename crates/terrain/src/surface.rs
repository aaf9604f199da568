//! CPU-side terrain surface buffers.
//!
//! [`TerrainSurface`] owns the live position/uv/normal/index buffers the
//! render layer consumes. Geometry is a subdivided plane in geometry-local
//! space: x/y span the plane, z is height (the render layer lays the plane
//! flat, so world-space "up" is y). Heights are the only brush-mutable
//! component.
//!
//! Edits mark the surface dirty; the caller recomputes normals once per
//! frame (batched) and clears the flag, mirroring a
//! "position needsUpdate + computeVertexNormals" cycle.

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::constants::{DEFAULT_RESOLUTION, PLANE_SIZE};
use crate::error::SurfaceError;

/// Live terrain mesh buffers with dirty tracking.
#[derive(Debug, Clone)]
pub struct TerrainSurface {
    /// Interleaved x/y/z, 3 floats per vertex. z is height.
    positions: Vec<f32>,
    /// Interleaved u/v over the unit square, 2 floats per vertex.
    uvs: Vec<f32>,
    /// Interleaved vertex normals, 3 floats per vertex.
    normals: Vec<f32>,
    /// Triangle indices, 3 per face.
    indices: Vec<u32>,
    /// Quad segments per side.
    resolution: u32,
    /// Set on any height edit; cleared by [`Self::recompute_normals`].
    needs_normal_update: bool,
}

impl Default for TerrainSurface {
    fn default() -> Self {
        Self::flat_plane(DEFAULT_RESOLUTION)
    }
}

impl TerrainSurface {
    /// Build a flat plane of `resolution × resolution` quads spanning
    /// [-PLANE_SIZE/2, PLANE_SIZE/2] with UVs over the unit square.
    pub fn flat_plane(resolution: u32) -> Self {
        let resolution = resolution.max(1);
        let side = resolution + 1;
        let vertex_count = (side * side) as usize;

        let mut positions = Vec::with_capacity(vertex_count * 3);
        let mut uvs = Vec::with_capacity(vertex_count * 2);
        let half = PLANE_SIZE * 0.5;

        for row in 0..side {
            for col in 0..side {
                let u = col as f32 / resolution as f32;
                let v = row as f32 / resolution as f32;
                positions.extend_from_slice(&[u * PLANE_SIZE - half, v * PLANE_SIZE - half, 0.0]);
                uvs.extend_from_slice(&[u, v]);
            }
        }

        let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);
        for row in 0..resolution {
            for col in 0..resolution {
                let a = row * side + col;
                let b = a + 1;
                let c = a + side;
                let d = c + 1;
                indices.extend_from_slice(&[a, b, c, b, d, c]);
            }
        }

        let normals = vec![0.0; vertex_count * 3];
        let mut surface = Self {
            positions,
            uvs,
            normals,
            indices,
            resolution,
            needs_normal_update: true,
        };
        surface.recompute_normals();
        surface
    }

    /// Build a plane and restore a stored position array onto it.
    pub fn from_snapshot(resolution: u32, snapshot: &[f32]) -> Result<Self, SurfaceError> {
        let mut surface = Self::flat_plane(resolution);
        surface.apply_snapshot(snapshot)?;
        surface.recompute_normals();
        Ok(surface)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Height (z component) of a vertex.
    #[inline]
    pub fn height(&self, vertex: usize) -> f32 {
        self.positions[vertex * 3 + 2]
    }

    /// Set the height of a vertex and mark the surface dirty.
    #[inline]
    pub fn set_height(&mut self, vertex: usize, height: f32) {
        self.positions[vertex * 3 + 2] = height;
        self.needs_normal_update = true;
    }

    /// UV coordinates of a vertex.
    #[inline]
    pub fn uv(&self, vertex: usize) -> Vec2 {
        Vec2::new(self.uvs[vertex * 2], self.uvs[vertex * 2 + 1])
    }

    /// Copy-on-write snapshot of the position buffer.
    pub fn snapshot(&self) -> Vec<f32> {
        self.positions.clone()
    }

    /// Overwrite the position buffer from a snapshot of matching length.
    pub fn apply_snapshot(&mut self, snapshot: &[f32]) -> Result<(), SurfaceError> {
        if snapshot.len() != self.positions.len() {
            return Err(SurfaceError::SnapshotLength {
                expected: self.positions.len(),
                actual: snapshot.len(),
            });
        }
        self.positions.copy_from_slice(snapshot);
        self.needs_normal_update = true;
        Ok(())
    }

    /// Whether heights changed since the last normal recompute. This is the
    /// "normals need recompute" signal consumed by the render layer.
    pub fn needs_normal_update(&self) -> bool {
        self.needs_normal_update
    }

    pub fn mark_dirty(&mut self) {
        self.needs_normal_update = true;
    }

    /// Recompute vertex normals by face-normal accumulation and clear the
    /// dirty flag. Batched: call once per frame after all edits, never per
    /// vertex.
    pub fn recompute_normals(&mut self) {
        self.normals.fill(0.0);

        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = self.position_vec(i0);
            let p1 = self.position_vec(i1);
            let p2 = self.position_vec(i2);
            let face_normal = (p1 - p0).cross(p2 - p0);

            for &i in &[i0, i1, i2] {
                self.normals[i * 3] += face_normal.x;
                self.normals[i * 3 + 1] += face_normal.y;
                self.normals[i * 3 + 2] += face_normal.z;
            }
        }

        for n in self.normals.chunks_exact_mut(3) {
            let v = Vec3::new(n[0], n[1], n[2]).normalize_or_zero();
            n.copy_from_slice(&[v.x, v.y, v.z]);
        }

        self.needs_normal_update = false;
        debug!("normals recomputed for {} vertices", self.vertex_count());
    }

    /// Minimum and maximum height across the surface.
    pub fn z_extrema(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for chunk in self.positions.chunks_exact(3) {
            min = min.min(chunk[2]);
            max = max.max(chunk[2]);
        }
        (min, max)
    }

    /// Position buffer as raw bytes, for handing to a GPU vertex buffer.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    #[inline]
    fn position_vec(&self, vertex: usize) -> Vec3 {
        Vec3::new(
            self.positions[vertex * 3],
            self.positions[vertex * 3 + 1],
            self.positions[vertex * 3 + 2],
        )
    }
}
