//! Public and internal types for the photodex API and pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::config::{DEFAULT_BASE_DIRECTORY, PipelineDefaults};

/// One node of the remote hierarchy (file or directory). Identity is `path`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteFile {
    pub path: String,
    pub name: String,
    #[serde(rename = "isdir")]
    pub is_dir: bool,
}

impl RemoteFile {
    pub fn file(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Phase of the indexation state machine.
///
/// `Idle` is the "no run yet" sentinel. `Failed` marks a run whose walk aborted in strict mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Idle,
    Preparing,
    Running,
    Finished,
    Failed,
}

impl Phase {
    /// True while a run owns the pipeline (start requests must be rejected).
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Preparing | Phase::Running)
    }
}

/// Snapshot of one run. Replaced as a whole on every transition, never mutated in place.
///
/// While `Running`, `total_count`/`current_index` are raw enqueue counts. The terminal
/// `Finished` snapshot carries the fixed pair 100/100 regardless of item count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexationStatus {
    pub total_count: usize,
    pub current_index: usize,
    pub phase: Phase,
    /// Items whose resized copy was saved and record marked processed.
    pub succeeded: usize,
    /// Items dropped after a download/decode/encode/storage error.
    pub failed: usize,
}

impl IndexationStatus {
    /// Terminal value used for both fields of a finished run (reads as 100%).
    pub const FINISHED_SENTINEL: usize = 100;

    pub fn idle() -> Self {
        Self::default()
    }

    pub fn preparing() -> Self {
        Self {
            phase: Phase::Preparing,
            ..Self::default()
        }
    }

    pub fn running(total_count: usize, current_index: usize, outcome: ItemTally) -> Self {
        Self {
            total_count,
            current_index,
            phase: Phase::Running,
            succeeded: outcome.succeeded,
            failed: outcome.failed,
        }
    }

    pub fn finished(outcome: ItemTally) -> Self {
        Self {
            total_count: Self::FINISHED_SENTINEL,
            current_index: Self::FINISHED_SENTINEL,
            phase: Phase::Finished,
            succeeded: outcome.succeeded,
            failed: outcome.failed,
        }
    }

    pub fn failed() -> Self {
        Self {
            phase: Phase::Failed,
            ..Self::default()
        }
    }
}

/// Success/failure counts read from the worker pool at a checkpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemTally {
    pub succeeded: usize,
    pub failed: usize,
}

/// Answer to a start request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Accepted,
    AlreadyRunning,
}

/// Persisted metadata for one item (row of the `images` table).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub id: String,
    pub source_path: String,
    pub processed: bool,
}

/// Where the archive is read from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Synology FileStation web API.
    #[default]
    Synology,
    /// A local or mounted directory tree.
    Local,
}

/// NAS connection settings (FileStation web API).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NasOpts {
    pub host: String,
    pub port: String,
    pub user: String,
    /// When empty and the Synology source is used, the CLI prompts for it.
    pub password: String,
}

/// Full options for a run (CLI, config file and environment merged).
#[derive(Clone, Debug)]
pub struct Opts {
    pub source: SourceKind,
    pub nas: NasOpts,
    /// Directory walked recursively (remote path, or local root for [`SourceKind::Local`]).
    pub base_directory: String,
    /// Target width; the scale factor is derived from this alone.
    pub scale_width: f64,
    /// Accepted for configuration symmetry; not used by the resize math.
    pub scale_height: f64,
    pub num_workers: usize,
    pub queue_cap: usize,
    /// Directory receiving `<record id>` files.
    pub output_dir: Option<PathBuf>,
    /// Record database. When None, uses `<package>.db` in the working directory.
    pub db_path: Option<PathBuf>,
    /// Strict walk: abort the run on the first listing error. Otherwise skip that directory.
    pub strict: bool,
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Opts {
            source: SourceKind::default(),
            nas: NasOpts::default(),
            base_directory: DEFAULT_BASE_DIRECTORY.to_string(),
            scale_width: 0.0,
            scale_height: 0.0,
            num_workers: PipelineDefaults::NUM_WORKERS,
            queue_cap: PipelineDefaults::QUEUE_CAP,
            output_dir: None,
            db_path: None,
            strict: true,
            verbose: false,
        }
    }
}

/// Resize target handed to workers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTarget {
    pub width: f64,
    pub height: f64,
}

impl From<&Opts> for ScaleTarget {
    fn from(o: &Opts) -> Self {
        ScaleTarget {
            width: o.scale_width,
            height: o.scale_height,
        }
    }
}
