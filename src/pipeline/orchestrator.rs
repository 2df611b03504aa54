use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::engine::tools::filter_images;
use crate::error::IndexResult;
use crate::pipeline;
use crate::{IndexationStatus, ItemTally, RemoteFile, StartOutcome};

use super::context::{Collaborators, ItemCounters, RunSettings, WorkerContext};
use super::status::StatusTracker;

/// Summary of a completed run, returned by [`Indexer::wait`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Number of images enqueued.
    pub total: usize,
    pub tally: ItemTally,
    /// Directories a lenient walk could not list.
    pub skipped_dirs: usize,
}

/// Everything the run thread owns. Cheap to clone (all shared state is behind `Arc`).
#[derive(Clone)]
struct RunJob {
    collaborators: Collaborators,
    settings: RunSettings,
    status: Arc<StatusTracker>,
}

/// Moves the tracker to `Failed` if the run thread unwinds, so the start guard does not stay latched.
struct FailOnUnwind<'a>(&'a StatusTracker);

impl Drop for FailOnUnwind<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.store(IndexationStatus::failed());
        }
    }
}

/// Pipeline orchestrator. Owns at most one background run at a time.
///
/// ```ignore
/// let indexer = Indexer::new(collaborators, RunSettings::from(&opts))?;
/// if indexer.start_run() == StartOutcome::Accepted {
///     let report = indexer.wait()?;
/// }
/// println!("{:?}", indexer.status());
/// ```
pub struct Indexer {
    job: RunJob,
    run_handle: Mutex<Option<JoinHandle<IndexResult<RunReport>>>>,
}

impl Indexer {
    pub fn new(collaborators: Collaborators, settings: RunSettings) -> IndexResult<Self> {
        Self::with_tracker(collaborators, settings, Arc::new(StatusTracker::new()))
    }

    /// Like [`Indexer::new`] but reporting into an existing tracker (e.g. one shared with a reader).
    pub fn with_tracker(
        collaborators: Collaborators,
        settings: RunSettings,
        status: Arc<StatusTracker>,
    ) -> IndexResult<Self> {
        settings.validate()?;
        Ok(Self {
            job: RunJob {
                collaborators,
                settings,
                status,
            },
            run_handle: Mutex::new(None),
        })
    }

    /// Latest snapshot. Never blocks on the run.
    pub fn status(&self) -> IndexationStatus {
        self.job.status.load()
    }

    pub fn tracker(&self) -> Arc<StatusTracker> {
        Arc::clone(&self.job.status)
    }

    /// Begin a run on a background thread unless one is preparing or running.
    ///
    /// On `Accepted` the tracker already holds `Preparing` when this returns.
    pub fn start_run(&self) -> StartOutcome {
        // Held across guard, spawn and store so the slot always holds the newest run.
        let mut slot = self.run_handle.lock().unwrap_or_else(|e| e.into_inner());
        if self.job.status.try_begin() == StartOutcome::AlreadyRunning {
            debug!("Start rejected: indexation already in progress");
            return StartOutcome::AlreadyRunning;
        }
        // The previous run already stored its terminal snapshot; joining only reaps the thread.
        if let Some(prev) = slot.take() {
            match prev.join() {
                Ok(Ok(report)) => debug!("Reaped unawaited run: {} images", report.total),
                Ok(Err(e)) => warn!("Previous run ended with an error nobody waited on: {}", e),
                Err(_) => warn!("Previous indexation thread panicked"),
            }
        }
        let job = self.job.clone();
        *slot = Some(thread::spawn(move || run_indexation(&job)));
        StartOutcome::Accepted
    }

    /// Block until the current run ends. Returns None if no run was started since the last wait.
    pub fn wait(&self) -> Result<Option<RunReport>> {
        let handle = self
            .run_handle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        let Some(handle) = handle else {
            return Ok(None);
        };
        let report = handle
            .join()
            .map_err(|_| anyhow::anyhow!("indexation thread panicked"))??;
        Ok(Some(report))
    }
}

/// Walk and filter. Strict mode aborts on the first listing error; otherwise unreadable
/// directories are skipped. Returns (images, skipped directory count).
fn collect_images(job: &RunJob) -> IndexResult<(Vec<RemoteFile>, usize)> {
    let archive = job.collaborators.archive.as_ref();
    let base = job.settings.base_directory.as_str();
    let (files, skipped) = if job.settings.strict {
        (pipeline::walk(archive, base)?, 0)
    } else {
        let outcome = pipeline::walk_lenient(archive, base);
        pipeline::report_skipped_dirs(&outcome.skipped);
        (outcome.files, outcome.skipped.len())
    };
    let listed = files.len();
    let images = filter_images(files);
    info!("Found {} images among {} entries", images.len(), listed);
    Ok((images, skipped))
}

/// One run: PREPARING (walk + filter) → RUNNING (enqueue) → drain → FINISHED.
///
/// `current_index` in RUNNING snapshots counts dispatched items, not completed ones.
fn run_indexation(job: &RunJob) -> IndexResult<RunReport> {
    let status = job.status.as_ref();
    let _guard = FailOnUnwind(status);
    info!("Indexation started at {}", job.settings.base_directory);

    let (images, skipped_dirs) = match collect_images(job) {
        Ok(found) => found,
        Err(e) => {
            error!("Indexation aborted while walking: {}", e);
            status.store(IndexationStatus::failed());
            return Err(e);
        }
    };

    let counters = Arc::new(ItemCounters::default());
    let ctx = Arc::new(WorkerContext {
        collaborators: job.collaborators.clone(),
        target: job.settings.target,
        counters: Arc::clone(&counters),
    });
    let queue = pipeline::create_item_queue(job.settings.queue_cap);
    let workers = pipeline::spawn_workers(queue.rx, &ctx, job.settings.num_workers);

    let total = images.len();
    for (index, file) in images.into_iter().enumerate() {
        status.store(IndexationStatus::running(total, index, counters.snapshot()));
        if queue.tx.send(file).is_err() {
            warn!("All workers exited early; stopping enqueue at item {}", index);
            break;
        }
    }
    // Dropping the last sender closes the queue so workers exit once it drains.
    drop(queue.tx);

    for h in workers {
        if h.join().is_err() {
            warn!("A worker thread panicked");
        }
    }

    let tally = counters.snapshot();
    status.store(IndexationStatus::finished(tally));
    info!(
        "Indexation finished: {} images, {} succeeded, {} failed",
        total, tally.succeeded, tally.failed
    );
    Ok(RunReport {
        total,
        tally,
        skipped_dirs,
    })
}
