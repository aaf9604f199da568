//! Surface placement validation and commit.
//!
//! Runs once per rendered frame while placement mode is active: raycast the
//! cursor (outside this module), evaluate the hit against the kind's rule,
//! and hand back a preview pose with a validity flag. The render layer draws
//! the preview (ghost-tinted when invalid); committed state only changes
//! through [`PlacementValidator::finalize`].

use glam::{Quat, Vec3};
use tracing::debug;

use crate::decor::DecorItem;
use crate::raycast::SurfaceHit;
use crate::registry::{DecorRegistry, HeightRule};

/// Pose computed for the current frame's placement preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPreview {
    pub kind: String,
    pub position: Vec3,
    pub quaternion: Quat,
    pub scale: Vec3,
    pub color: [f32; 3],
    /// False when the hit height fails the kind's rule; the preview still
    /// renders (ghosted) but cannot be committed.
    pub valid: bool,
}

/// Validates and finalizes decor placements against registry rules.
#[derive(Debug, Clone, Default)]
pub struct PlacementValidator {
    registry: DecorRegistry,
}

impl PlacementValidator {
    pub fn new(registry: DecorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DecorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DecorRegistry {
        &mut self.registry
    }

    /// Evaluate one frame of placement input.
    ///
    /// `None` when the kind is unknown or there is no surface hit to anchor
    /// the preview (a miss is not an error; placement is simply inert this
    /// frame). Otherwise the preview carries the computed pose and whether
    /// the height rule passed.
    pub fn evaluate(&self, kind: &str, hit: Option<&SurfaceHit>) -> Option<PlacementPreview> {
        let definition = self.registry.get(kind)?;
        let rule = &definition.rule;
        let hit = hit?;

        let mut position = hit.point;
        position.y += rule.y_compensation;

        let valid = match rule.height {
            HeightRule::Intersect { min, max } => {
                min.is_none_or(|lo| hit.point.y >= lo) && max.is_none_or(|hi| hit.point.y <= hi)
            }
            HeightRule::Float { base, ratio, min, max } => {
                // Height is computed rather than gated.
                let target = base + (hit.point.y - base) * ratio;
                position.y = target.max(hit.point.y + min).min(max);
                true
            }
        };

        Some(PlacementPreview {
            kind: kind.to_string(),
            position,
            quaternion: yaw_from_normal(hit.normal),
            scale: definition.scale,
            color: definition.color,
            valid,
        })
    }

    /// Turn a valid preview into a committed item, applying the kind's scale
    /// variance as one uniform multiplier across all axes.
    ///
    /// Returns `None` for invalid previews and unknown kinds.
    pub fn finalize(&self, preview: &PlacementPreview, id: u64) -> Option<DecorItem> {
        if !preview.valid {
            return None;
        }
        let definition = self.registry.get(&preview.kind)?;

        let variance = definition.rule.scale_variance;
        let multiplier = 1.0 + (hash01(id ^ seed_from_position(preview.position)) - 0.5) * variance;

        debug!(
            "placing {} #{id} at {:?} (scale x{multiplier:.3})",
            preview.kind, preview.position
        );

        Some(DecorItem {
            id,
            kind: preview.kind.clone(),
            position: preview.position,
            quaternion: preview.quaternion,
            scale: preview.scale * multiplier,
            color: preview.color,
        })
    }
}

/// Yaw-only orientation from a surface normal.
///
/// Placed objects never tilt with the slope; they only rotate about the
/// vertical axis to face the normal's horizontal projection. A (near-)
/// vertical normal keeps the default orientation.
pub fn yaw_from_normal(normal: Vec3) -> Quat {
    let horizontal = Vec3::new(normal.x, 0.0, normal.z);
    if horizontal.length_squared() < 1e-10 {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y(horizontal.x.atan2(horizontal.z))
}

/// Deterministic [0, 1) hash. Scale jitter needs no statistical rigor, just
/// stable spread across ids and positions.
fn hash01(seed: u64) -> f32 {
    let mut x = seed.wrapping_add(0x9e3779b97f4a7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
    x ^= x >> 31;
    (x >> 40) as f32 / (1u64 << 24) as f32
}

fn seed_from_position(position: Vec3) -> u64 {
    (position.x.to_bits() as u64) << 32 | position.z.to_bits() as u64
}
