//! Undo/redo history over atomic island snapshots.
//!
//! Each entry pairs a terrain position snapshot with the full placed-item
//! list; the two always commit and restore together, so an undo can never
//! desynchronize decor from the ground it stands on. Terrain is kept as a
//! plain `Vec<f32>` (serialization-safe across persistence boundaries) and
//! only becomes a typed GPU buffer when applied to the live mesh.

use tracing::debug;

use crate::decor::DecorItem;

/// Maximum number of snapshots retained. Oldest entries are dropped first.
const MAX_HISTORY: usize = 50;

/// One committed island state.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Flat position array, 3 floats per vertex, copy-on-write.
    pub terrain: Vec<f32>,
    pub placed_items: Vec<DecorItem>,
}

/// Linear undo/redo stack with a cursor at the current state.
///
/// Entries `[0..cursor]` are the past, `entries[cursor]` is the present,
/// `[cursor+1..]` is the redo tail. Committing after an undo discards the
/// tail (standard undo/redo semantics).
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a new state.
    ///
    /// A state deep-equal to the current entry is coalesced into a no-op,
    /// so repeated commits with no net change leave history depth
    /// untouched. Otherwise the redo tail is discarded and the entry
    /// pushed; when the stack exceeds [`MAX_HISTORY`] the oldest entries
    /// are dropped.
    ///
    /// Returns whether a new entry was pushed.
    pub fn commit(&mut self, terrain: Vec<f32>, placed_items: Vec<DecorItem>) -> bool {
        let entry = HistoryEntry {
            terrain,
            placed_items,
        };

        if let Some(current) = self.current() {
            if *current == entry {
                debug!("history commit coalesced (no net change)");
                return false;
            }
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > MAX_HISTORY {
            let excess = self.entries.len() - MAX_HISTORY;
            self.entries.drain(0..excess);
            self.cursor -= excess;
        }

        debug!("history commit: depth {} cursor {}", self.entries.len(), self.cursor);
        true
    }

    /// The entry the island currently sits at.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    /// Step back and return the entry to restore, or `None` at the bottom
    /// of the stack (no-op).
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        debug!("history undo -> cursor {}", self.cursor);
        self.entries.get(self.cursor)
    }

    /// Step forward and return the entry to restore, or `None` at the top
    /// of the stack (no-op).
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        debug!("history redo -> cursor {}", self.cursor);
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of committed entries.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Drop all history (used on full island reset).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn item(id: u64) -> DecorItem {
        DecorItem {
            id,
            kind: "tree".to_string(),
            position: Vec3::ZERO,
            quaternion: Quat::IDENTITY,
            scale: Vec3::ONE,
            color: [0.0; 3],
        }
    }

    fn terrain(tag: f32) -> Vec<f32> {
        vec![0.0, 0.0, tag]
    }

    #[test]
    fn test_empty_store_noops() {
        let mut store = HistoryStore::new();
        assert!(store.undo().is_none());
        assert!(store.redo().is_none());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.depth(), 0);
    }

    #[test]
    fn test_identical_commit_is_coalesced() {
        let mut store = HistoryStore::new();
        assert!(store.commit(terrain(0.1), vec![item(1)]));
        assert!(!store.commit(terrain(0.1), vec![item(1)]));
        assert_eq!(store.depth(), 1);
    }

    #[test]
    fn test_undo_restores_previous_entry_exactly() {
        let mut store = HistoryStore::new();
        store.commit(terrain(0.1), vec![item(1)]);
        store.commit(terrain(0.2), vec![item(1), item(2)]);

        let restored = store.undo().unwrap();
        assert_eq!(restored.terrain, terrain(0.1));
        assert_eq!(restored.placed_items, vec![item(1)]);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut store = HistoryStore::new();
        store.commit(terrain(0.1), vec![]);
        store.commit(terrain(0.2), vec![]);
        store.commit(terrain(0.3), vec![]);

        assert_eq!(store.undo().unwrap().terrain, terrain(0.2));
        assert_eq!(store.undo().unwrap().terrain, terrain(0.1));
        assert!(store.undo().is_none());

        assert_eq!(store.redo().unwrap().terrain, terrain(0.2));
        assert_eq!(store.redo().unwrap().terrain, terrain(0.3));
        assert!(store.redo().is_none());
    }

    #[test]
    fn test_commit_after_undo_discards_redo_tail() {
        let mut store = HistoryStore::new();
        store.commit(terrain(0.1), vec![]);
        store.commit(terrain(0.2), vec![]);
        store.undo();

        store.commit(terrain(0.9), vec![]);
        assert!(!store.can_redo());
        assert_eq!(store.depth(), 2);
        assert_eq!(store.current().unwrap().terrain, terrain(0.9));
    }

    #[test]
    fn test_terrain_and_decor_restore_together() {
        let mut store = HistoryStore::new();
        store.commit(terrain(0.1), vec![]);
        store.commit(terrain(0.2), vec![item(1)]);

        // One undo moves both fields back at once.
        let restored = store.undo().unwrap();
        assert_eq!(restored.terrain, terrain(0.1));
        assert!(restored.placed_items.is_empty());
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let mut store = HistoryStore::new();
        for i in 0..(MAX_HISTORY + 5) {
            store.commit(terrain(i as f32), vec![]);
        }
        assert_eq!(store.depth(), MAX_HISTORY);

        // Walk all the way down; the oldest five entries are gone.
        let mut last = None;
        while let Some(entry) = store.undo() {
            last = Some(entry.terrain.clone());
        }
        assert_eq!(last.unwrap(), terrain(5.0));
    }

    #[test]
    fn test_clear() {
        let mut store = HistoryStore::new();
        store.commit(terrain(0.1), vec![]);
        store.commit(terrain(0.2), vec![]);
        store.clear();
        assert_eq!(store.depth(), 0);
        assert!(store.undo().is_none());
    }
}
