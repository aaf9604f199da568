//! Island editor layer on top of the [`terrain`] sculpting core.
//!
//! This crate owns everything above raw height-field editing:
//! - [`decor`] - decorative item data model
//! - [`registry`] - per-kind placement rules and defaults
//! - [`raycast`] - ray/hit types, the external raycast boundary, and a
//!   Möller–Trumbore terrain raycaster
//! - [`placement`] - surface placement validation, orientation, and commit
//! - [`history`] - linear undo/redo over atomic (terrain, decor) snapshots
//! - [`state`] - the explicit island state container with subscriptions
//! - [`snapshot`] - JSON interchange for persistence/import/export
//! - [`pipeline`] - the frame-synchronous editor pipeline tying it together

pub mod decor;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod placement;
pub mod raycast;
pub mod registry;
pub mod snapshot;
pub mod state;

pub use decor::DecorItem;
pub use error::SnapshotError;
pub use history::{HistoryEntry, HistoryStore};
pub use pipeline::EditorPipeline;
pub use placement::{PlacementPreview, PlacementValidator};
pub use raycast::{Ray, RaycastProvider, SurfaceHit, TerrainRaycaster};
pub use registry::{DecorDefinition, DecorRegistry, HeightRule, PlacementRule};
pub use snapshot::{HistoryPayload, IslandMeta, IslandSnapshot};
pub use state::{IslandState, IslandStore, StateEvent};
