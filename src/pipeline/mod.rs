//! Pipeline components: walk, worker pool, orchestrator, status tracker.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod status;
pub mod walk;
pub mod worker;

pub use context::{
    Collaborators, ItemCounters, ItemQueue, RunSettings, WorkerContext, create_item_queue,
};
pub use error_handler::report_skipped_dirs;
pub use orchestrator::{Indexer, RunReport};
pub use status::StatusTracker;
pub use walk::{WalkOutcome, walk, walk_lenient};
pub use worker::{process_item, spawn_workers};
