//! Explicit island state container.
//!
//! Terrain and decor are reachable from many call sites (brush, placement,
//! persistence, reset), so the live committed state sits in one injected
//! container instead of ambient globals: read through [`IslandStore::state`],
//! write through the commit methods, observe through
//! [`IslandStore::subscribe`]. Every committed write lands in history as one
//! atomic (terrain, decor) entry.
//!
//! The container holds snapshots by value, never aliases into the live
//! mesh buffers, so ownership stays one-directional: the render layer owns
//! the surface, the store owns serialized copies.

use tracing::debug;

use crate::decor::DecorItem;
use crate::history::{HistoryEntry, HistoryStore};

/// The committed island state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IslandState {
    /// Flat terrain position array, 3 floats per vertex.
    pub terrain: Vec<f32>,
    pub placed_items: Vec<DecorItem>,
}

/// Change notifications emitted to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// A stroke committed new terrain.
    TerrainChanged,
    /// The decor list changed (place/delete/clear).
    DecorChanged,
    /// Undo/redo restored an earlier state onto the live buffers.
    HistoryRestored,
    /// Full reset back to the pristine island.
    IslandReset,
}

type Listener = Box<dyn FnMut(StateEvent)>;

/// State container + history + subscriptions.
pub struct IslandStore {
    state: IslandState,
    history: HistoryStore,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
    next_decor_id: u64,
}

impl IslandStore {
    /// Create a store seeded with an initial terrain snapshot; the seed
    /// becomes the first history entry (so the first undo target is the
    /// loaded state, not emptiness).
    pub fn new(terrain: Vec<f32>, placed_items: Vec<DecorItem>) -> Self {
        let mut history = HistoryStore::new();
        history.commit(terrain.clone(), placed_items.clone());
        let next_decor_id = placed_items.iter().map(|i| i.id + 1).max().unwrap_or(0);

        Self {
            state: IslandState {
                terrain,
                placed_items,
            },
            history,
            listeners: Vec::new(),
            next_listener_id: 0,
            next_decor_id,
        }
    }

    pub fn state(&self) -> &IslandState {
        &self.state
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Commit a fresh terrain snapshot (stroke end). Decor is carried over
    /// unchanged; the pair lands in history atomically.
    pub fn commit_terrain(&mut self, terrain: Vec<f32>) {
        self.state.terrain = terrain;
        if self.push_history() {
            self.emit(StateEvent::TerrainChanged);
        }
    }

    /// Append a placed item and commit.
    pub fn place(&mut self, item: DecorItem) {
        self.state.placed_items.push(item);
        if self.push_history() {
            self.emit(StateEvent::DecorChanged);
        }
    }

    /// Remove placed items by id and commit. Unknown ids are ignored.
    pub fn delete_placed(&mut self, ids: &[u64]) {
        let before = self.state.placed_items.len();
        self.state.placed_items.retain(|item| !ids.contains(&item.id));
        if self.state.placed_items.len() != before && self.push_history() {
            self.emit(StateEvent::DecorChanged);
        }
    }

    /// Remove all placed items and commit.
    pub fn clear_placed(&mut self) {
        if self.state.placed_items.is_empty() {
            return;
        }
        self.state.placed_items.clear();
        if self.push_history() {
            self.emit(StateEvent::DecorChanged);
        }
    }

    /// Step history back and adopt the restored state. Returns the restored
    /// state, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&IslandState> {
        let entry = self.history.undo()?;
        self.state = state_from_entry(entry);
        self.emit(StateEvent::HistoryRestored);
        Some(&self.state)
    }

    /// Step history forward and adopt the restored state.
    pub fn redo(&mut self) -> Option<&IslandState> {
        let entry = self.history.redo()?;
        self.state = state_from_entry(entry);
        self.emit(StateEvent::HistoryRestored);
        Some(&self.state)
    }

    /// Full island reset: pristine terrain, no decor, empty history (the
    /// reset state becomes the new baseline entry).
    pub fn reset(&mut self, original_terrain: Vec<f32>) {
        self.state = IslandState {
            terrain: original_terrain,
            placed_items: Vec::new(),
        };
        self.history.clear();
        self.push_history();
        self.emit(StateEvent::IslandReset);
        debug!("island reset");
    }

    /// Register a change listener. Returns an id for [`Self::unsubscribe`].
    pub fn subscribe(&mut self, listener: impl FnMut(StateEvent) + 'static) -> u64 {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: u64) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Allocate the next decor item id.
    pub fn next_decor_id(&mut self) -> u64 {
        let id = self.next_decor_id;
        self.next_decor_id += 1;
        id
    }

    fn push_history(&mut self) -> bool {
        self.history
            .commit(self.state.terrain.clone(), self.state.placed_items.clone())
    }

    fn emit(&mut self, event: StateEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

fn state_from_entry(entry: &HistoryEntry) -> IslandState {
    IslandState {
        terrain: entry.terrain.clone(),
        placed_items: entry.placed_items.clone(),
    }
}
