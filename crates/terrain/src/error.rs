//! Error types for terrain buffer operations.

use thiserror::Error;

/// Errors raised by [`crate::surface::TerrainSurface`] buffer operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("snapshot length {actual} does not match surface position buffer ({expected})")]
    SnapshotLength { expected: usize, actual: usize },

    #[error("uv buffer length {uvs} does not pair with position buffer ({positions})")]
    BufferMismatch { positions: usize, uvs: usize },
}
