//! Photodex: indexes a NAS photo archive into downscaled JPEG copies with per-item records.

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod remote;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use error::{IndexError, IndexResult};
pub use pipeline::{Collaborators, Indexer, RunReport, RunSettings, StatusTracker};

use log::debug;
use std::sync::Arc;

use crate::engine::db_ops::RecordStore;
use crate::engine::output::OutputSink;
use crate::remote::RemoteArchive;

/// Result alias used by the CLI-facing API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Build an [`Indexer`] from `opts` and the three collaborators. Does not start a run.
///
/// ```ignore
/// let indexer = photodex::indexer(&opts, archive, records, sink)?;
/// indexer.start_run();
/// let report = indexer.wait()?;
/// ```
pub fn indexer(
    opts: &Opts,
    archive: Arc<dyn RemoteArchive>,
    records: Arc<dyn RecordStore>,
    sink: Arc<dyn OutputSink>,
) -> IndexResult<Indexer> {
    let settings = RunSettings::from(opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        settings
    );
    Indexer::new(
        Collaborators {
            archive,
            records,
            sink,
        },
        settings,
    )
}
