//! Pipeline context: collaborators and settings shared with the run thread and workers.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::engine::db_ops::RecordStore;
use crate::engine::output::OutputSink;
use crate::error::{IndexError, IndexResult};
use crate::remote::RemoteArchive;
use crate::{ItemTally, Opts, RemoteFile, ScaleTarget};

/// Per-run tuning and targets, taken from [`Opts`].
#[derive(Clone, Debug)]
pub struct RunSettings {
    pub base_directory: String,
    pub target: ScaleTarget,
    pub num_workers: usize,
    /// Capacity of the item queue; enqueue blocks when it is full.
    pub queue_cap: usize,
    /// Abort on the first listing error (otherwise skip the directory and keep walking).
    pub strict: bool,
}

impl From<&Opts> for RunSettings {
    fn from(o: &Opts) -> Self {
        RunSettings {
            base_directory: o.base_directory.clone(),
            target: ScaleTarget::from(o),
            num_workers: o.num_workers,
            queue_cap: o.queue_cap,
            strict: o.strict,
        }
    }
}

impl RunSettings {
    pub fn validate(&self) -> IndexResult<()> {
        if !(self.target.width.is_finite() && self.target.width > 0.0) {
            return Err(IndexError::Config(format!(
                "scale width must be positive, got {}",
                self.target.width
            )));
        }
        if self.num_workers == 0 {
            return Err(IndexError::Config("worker count must be at least 1".into()));
        }
        if self.queue_cap == 0 {
            return Err(IndexError::Config("queue capacity must be at least 1".into()));
        }
        Ok(())
    }
}

/// Collaborators every worker calls into. Shared read-only behind `Arc`.
#[derive(Clone)]
pub struct Collaborators {
    pub archive: Arc<dyn RemoteArchive>,
    pub records: Arc<dyn RecordStore>,
    pub sink: Arc<dyn OutputSink>,
}

/// Per-item outcome counters, bumped by workers and read by the orchestrator at checkpoints.
#[derive(Debug, Default)]
pub struct ItemCounters {
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

impl ItemCounters {
    pub fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ItemTally {
        ItemTally {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// What one worker needs: collaborators, resize target and the shared counters.
pub struct WorkerContext {
    pub collaborators: Collaborators,
    pub target: ScaleTarget,
    pub counters: Arc<ItemCounters>,
}

/// Bounded queue between the orchestrator (sender) and workers (receivers).
pub struct ItemQueue {
    pub tx: Sender<RemoteFile>,
    pub rx: Receiver<RemoteFile>,
}

pub fn create_item_queue(cap: usize) -> ItemQueue {
    let (tx, rx) = bounded::<RemoteFile>(cap);
    ItemQueue { tx, rx }
}
