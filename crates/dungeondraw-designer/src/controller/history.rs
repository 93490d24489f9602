//! Linear undo/redo history of dungeon snapshots.

use std::sync::Arc;

use crate::dungeon_state::DungeonState;

/// Ordered snapshots plus a cursor.
///
/// Never empty, and the cursor always points at an entry. Snapshots are
/// shared behind `Arc` so undo and redo hand back the very same value that
/// was committed.
#[derive(Debug, Clone)]
pub struct History {
    states: Vec<Arc<DungeonState>>,
    index: usize,
}

impl History {
    pub fn new(initial: DungeonState) -> Self {
        Self {
            states: vec![Arc::new(initial)],
            index: 0,
        }
    }

    pub fn current(&self) -> &Arc<DungeonState> {
        &self.states[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Never true once constructed: a history holds at least its start state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[Arc<DungeonState>] {
        &self.states
    }

    pub fn get(&self, index: usize) -> Option<&Arc<DungeonState>> {
        self.states.get(index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.states.len()
    }

    /// Drop everything after the cursor, append `state` and move onto it.
    ///
    /// Returns the number of redo entries that were discarded.
    pub fn push(&mut self, state: Arc<DungeonState>) -> usize {
        let discarded = self.states.len() - self.index - 1;
        self.states.truncate(self.index + 1);
        self.states.push(state);
        self.index = self.states.len() - 1;
        discarded
    }

    /// Entry one step back, without moving. `None` at the start.
    pub fn peek_back(&self) -> Option<&Arc<DungeonState>> {
        self.index.checked_sub(1).and_then(|i| self.states.get(i))
    }

    /// Entry one step forward, without moving. `None` at the end.
    pub fn peek_forward(&self) -> Option<&Arc<DungeonState>> {
        self.states.get(self.index + 1)
    }

    /// Move back one entry. Returns false, leaving the cursor alone, at index 0.
    pub fn step_back(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move forward one entry. Returns false at the last entry.
    pub fn step_forward(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Replace the whole history with a single entry.
    pub fn reset(&mut self, state: Arc<DungeonState>) {
        self.states.clear();
        self.states.push(state);
        self.index = 0;
    }

    /// Panics if the structural invariants do not hold.
    pub fn assert_invariants(&self) {
        assert!(!self.states.is_empty(), "history must never be empty");
        assert!(
            self.index < self.states.len(),
            "history index {} out of bounds for length {}",
            self.index,
            self.states.len()
        );
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DungeonState::start_state())
    }
}
