//! Error types for island persistence.

use thiserror::Error;

/// Errors that can occur while importing or exporting island snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse island snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("snapshot terrain array length {actual} does not match surface ({expected})")]
    TerrainLength { expected: usize, actual: usize },
}
