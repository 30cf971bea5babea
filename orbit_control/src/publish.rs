//! Single-writer / single-reader hand-off of controller state to the
//! render loop.
//!
//! The gesture worker publishes whole [`SceneSnapshot`] values; the render
//! loop polls with [`SnapshotReader::latest`], which never blocks.  The
//! mutex guards only the snapshot value and is held for a copy.

use std::sync::{Arc, Mutex, TryLockError};
use std::time::Instant;

use crate::idle::IdleRotation;
use crate::transform::{Density, ObjectTransform};

/// Everything the render loop reads from the controller in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSnapshot {
    pub transform: ObjectTransform,
    pub density:   Density,
    pub idle:      IdleRotation,
    /// Object creation time; `idle` is evaluated relative to it.
    pub epoch:     Instant,
    /// Commands applied so far.
    pub updates:   u64,
}

impl SceneSnapshot {
    /// Yaw including the idle spin as of `now`.
    pub fn yaw_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.epoch);
        self.transform.yaw + self.idle.angle_at(elapsed)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SnapshotCell
// ════════════════════════════════════════════════════════════════════════════

/// The shared slot between the gesture worker and the render loop.
#[derive(Debug)]
pub struct SnapshotCell {
    slot: Mutex<SceneSnapshot>,
}

impl SnapshotCell {
    pub fn new(initial: SceneSnapshot) -> Arc<Self> {
        Arc::new(SnapshotCell { slot: Mutex::new(initial) })
    }

    /// Replace the published snapshot.
    pub fn publish(&self, snapshot: SceneSnapshot) {
        // A reader panicking mid-copy can't leave a torn value behind,
        // so a poisoned slot is still usable.
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = snapshot;
    }

    /// The current snapshot, or `None` if the writer holds the slot.
    pub fn try_load(&self) -> Option<SceneSnapshot> {
        match self.slot.try_lock() {
            Ok(slot)                          => Some(*slot),
            Err(TryLockError::Poisoned(e))    => Some(*e.into_inner()),
            Err(TryLockError::WouldBlock)     => None,
        }
    }

    /// Blocking read, for tests and shutdown paths only.
    pub fn load(&self) -> SceneSnapshot {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SnapshotReader
// ════════════════════════════════════════════════════════════════════════════

/// Render-side handle that falls back to the last snapshot it saw.
#[derive(Debug)]
pub struct SnapshotReader {
    cell: Arc<SnapshotCell>,
    last: SceneSnapshot,
}

impl SnapshotReader {
    pub fn new(cell: Arc<SnapshotCell>) -> Self {
        let last = cell.load();
        SnapshotReader { cell, last }
    }

    /// Latest published snapshot without waiting on the writer.
    pub fn latest(&mut self) -> &SceneSnapshot {
        if let Some(s) = self.cell.try_load() {
            self.last = s;
        }
        &self.last
    }
}
