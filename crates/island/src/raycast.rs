//! Ray-terrain intersection.
//!
//! The render layer owns the real picking machinery; the editor only needs
//! "closest hit point + face normal or nothing", which [`RaycastProvider`]
//! captures. [`TerrainRaycaster`] is the built-in implementation against a
//! [`TerrainSurface`], using Möller–Trumbore ray-triangle intersection.
//!
//! Frame convention: surface geometry is z-up (z is height); the island is
//! rendered lying flat, so hits are reported in world space with y up.
//! A local vertex `(x, y, z)` sits at world `(x, z, -y)`.

use glam::Vec3;
use terrain::TerrainSurface;

/// Epsilon for ray-triangle determinant and near-plane tests.
const EPSILON: f32 = 1e-6;

/// A world-space ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    /// Should be normalized for meaningful hit distances.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// Closest intersection between a ray and the terrain, in world space.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    pub point: Vec3,
    /// Face normal of the hit triangle.
    pub normal: Vec3,
}

/// External raycast boundary: origin/direction in, closest hit or nothing
/// out. A provider without a ready terrain reference reports no hit rather
/// than erroring.
pub trait RaycastProvider {
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit>;
}

/// Möller–Trumbore raycaster over a terrain surface.
pub struct TerrainRaycaster<'a> {
    surface: Option<&'a TerrainSurface>,
}

impl<'a> TerrainRaycaster<'a> {
    pub fn new(surface: &'a TerrainSurface) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// A raycaster whose terrain is not available yet; every cast misses.
    pub fn not_ready() -> Self {
        Self { surface: None }
    }
}

impl RaycastProvider for TerrainRaycaster<'_> {
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit> {
        let surface = self.surface?;

        let mut closest: Option<(f32, Vec3)> = None;
        for tri in surface.indices().chunks_exact(3) {
            let v0 = world_vertex(surface, tri[0] as usize);
            let v1 = world_vertex(surface, tri[1] as usize);
            let v2 = world_vertex(surface, tri[2] as usize);

            if let Some(t) = ray_triangle_intersection(ray.origin, ray.direction, v0, v1, v2) {
                let dominated = matches!(closest, Some((prev, _)) if t >= prev);
                if !dominated {
                    let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
                    closest = Some((t, normal));
                }
            }
        }

        closest.map(|(t, normal)| SurfaceHit {
            point: ray.origin + ray.direction * t,
            normal,
        })
    }
}

/// Geometry-local vertex lifted into world space (plane laid flat, y up).
#[inline]
fn world_vertex(surface: &TerrainSurface, vertex: usize) -> Vec3 {
    let p = surface.positions();
    let base = vertex * 3;
    Vec3::new(p[base], p[base + 2], -p[base + 1])
}

/// Möller–Trumbore ray-triangle intersection. Returns the hit distance
/// along the ray, or `None` for a miss, a backface-parallel ray, or a hit
/// behind the origin.
pub fn ray_triangle_intersection(
    origin: Vec3,
    direction: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = direction.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = origin - v0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    (t >= EPSILON).then_some(t)
}
