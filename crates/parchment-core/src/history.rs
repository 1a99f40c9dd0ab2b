//! Linear snapshot history for undo/redo.

use crate::store::{CanvasSnapshot, EntityStore};

/// Snapshot-based undo/redo stack.
///
/// `snapshots[step]` is the state currently shown. With no step set the board
/// is at its baseline: the state the history started from, which is an empty
/// canvas or a freshly loaded document.
#[derive(Debug, Clone, Default)]
pub struct History {
    baseline: CanvasSnapshot,
    snapshots: Vec<CanvasSnapshot>,
    step: Option<usize>,
    limit: Option<usize>,
}

impl History {
    /// Create an empty history. `limit` caps the number of snapshots kept.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|&n| n > 0),
            ..Self::default()
        }
    }

    /// Record the store's current collections as the newest snapshot.
    ///
    /// Anything after the current step is discarded first, so history never
    /// branches.
    pub fn snapshot(&mut self, store: &EntityStore) {
        let keep = self.step.map_or(0, |step| step + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(store.snapshot());

        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                // The oldest state is no longer reachable by redo, but undo
                // still lands on it.
                self.baseline = self.snapshots.remove(0);
            }
        }

        self.step = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot and write it into the store.
    /// Returns true if undo was performed.
    pub fn undo(&mut self, store: &mut EntityStore) -> bool {
        match self.step {
            None => false,
            Some(0) => {
                self.step = None;
                store.restore(self.baseline.clone());
                true
            }
            Some(step) => {
                self.step = Some(step - 1);
                store.restore(self.snapshots[step - 1].clone());
                true
            }
        }
    }

    /// Step forward one snapshot and write it into the store.
    /// Returns true if redo was performed.
    pub fn redo(&mut self, store: &mut EntityStore) -> bool {
        let next = self.step.map_or(0, |step| step + 1);
        match self.snapshots.get(next) {
            Some(snapshot) => {
                store.restore(snapshot.clone());
                self.step = Some(next);
                true
            }
            None => false,
        }
    }

    /// Drop all snapshots and return to an empty baseline.
    pub fn clear(&mut self) {
        self.reset(CanvasSnapshot::default());
    }

    /// Drop all snapshots and use `baseline` as the state undo returns to.
    pub fn reset(&mut self, baseline: CanvasSnapshot) {
        self.baseline = baseline;
        self.snapshots.clear();
        self.step = None;
    }

    pub fn can_undo(&self) -> bool {
        self.step.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.step.map_or(0, |step| step + 1) < self.snapshots.len()
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the current snapshot, if any.
    pub fn step(&self) -> Option<usize> {
        self.step
    }
}
