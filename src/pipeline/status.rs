//! Status tracker: single-slot holder of the latest [`IndexationStatus`] snapshot.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{IndexationStatus, StartOutcome};

/// Last-writer-wins snapshot cell. Readers copy the whole snapshot under the lock, so a
/// load between two stores returns one of them intact.
///
/// Starts at [`IndexationStatus::idle`]; there is no "absent" state.
#[derive(Debug, Default)]
pub struct StatusTracker {
    slot: RwLock<IndexationStatus>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // The slot holds plain `Copy` data, so a panic mid-store cannot leave it half-written.
    fn read(&self) -> RwLockReadGuard<'_, IndexationStatus> {
        self.slot.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexationStatus> {
        self.slot.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn load(&self) -> IndexationStatus {
        *self.read()
    }

    pub fn store(&self, status: IndexationStatus) {
        *self.write() = status;
    }

    /// Start guard: atomically move an inactive slot to `Preparing`.
    ///
    /// Returns `AlreadyRunning` without touching the slot when a run is preparing or running.
    /// Check and store happen under one write lock, so two concurrent callers cannot both win.
    pub fn try_begin(&self) -> StartOutcome {
        let mut slot = self.write();
        if slot.phase.is_active() {
            return StartOutcome::AlreadyRunning;
        }
        *slot = IndexationStatus::preparing();
        StartOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemTally, Phase};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_idle() {
        assert_eq!(StatusTracker::new().load(), IndexationStatus::idle());
        assert_eq!(StatusTracker::new().load().phase, Phase::Idle);
    }

    #[test]
    fn try_begin_rejects_active_phases_without_mutation() {
        let t = StatusTracker::new();
        assert_eq!(t.try_begin(), StartOutcome::Accepted);
        assert_eq!(t.load(), IndexationStatus::preparing());
        assert_eq!(t.try_begin(), StartOutcome::AlreadyRunning);

        let running = IndexationStatus::running(7, 3, ItemTally::default());
        t.store(running);
        assert_eq!(t.try_begin(), StartOutcome::AlreadyRunning);
        assert_eq!(t.load(), running);
    }

    #[test]
    fn try_begin_accepts_after_finished_or_failed() {
        let t = StatusTracker::new();
        t.store(IndexationStatus::finished(ItemTally::default()));
        assert_eq!(t.try_begin(), StartOutcome::Accepted);
        t.store(IndexationStatus::failed());
        assert_eq!(t.try_begin(), StartOutcome::Accepted);
    }

    #[test]
    fn concurrent_begins_have_one_winner() {
        for _ in 0..50 {
            let t = Arc::new(StatusTracker::new());
            let barrier = Arc::new(std::sync::Barrier::new(8));
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let t = Arc::clone(&t);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        t.try_begin()
                    })
                })
                .collect();
            let accepted = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|o| *o == StartOutcome::Accepted)
                .count();
            assert_eq!(accepted, 1);
        }
    }

    #[test]
    fn readers_never_see_torn_snapshots() {
        let t = Arc::new(StatusTracker::new());
        let writer = {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                for i in 0..5_000 {
                    t.store(IndexationStatus::running(i, i, ItemTally::default()));
                }
            })
        };
        let reader = {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                for _ in 0..5_000 {
                    let s = t.load();
                    assert_eq!(s.total_count, s.current_index);
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();
    }
}
