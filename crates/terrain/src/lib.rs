//! Island terrain sculpting core.
//!
//! This crate provides the height-field editing primitives for the island
//! editor:
//! - [`surface::TerrainSurface`] - CPU-side position/uv/normal buffers with
//!   dirty tracking and batched normal recomputation
//! - [`spatial::SpatialIndex`] - UV-grid vertex bucketing for O(local)
//!   brush queries
//! - [`edge_weight::EdgeWeightMap`] - per-vertex falloff keeping the island
//!   boundary frozen, plus the pristine position capture used for reset
//! - [`brush::BrushEngine`] - additive/subtractive height brush
//!
//! The crate is renderer-agnostic: the render layer reads the surface
//! buffers (see [`surface::TerrainSurface::position_bytes`]) and reacts to
//! the dirty flag; nothing here depends on a GPU or windowing stack.

pub mod brush;
pub mod constants;
pub mod edge_weight;
pub mod error;
pub mod spatial;
pub mod surface;

pub use brush::{BrushEngine, BrushMode, BrushSettings};
pub use constants::*;
pub use edge_weight::EdgeWeightMap;
pub use error::SurfaceError;
pub use spatial::SpatialIndex;
pub use surface::TerrainSurface;
