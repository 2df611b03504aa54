//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived paths: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    db_filename: String,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache paths from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                db_filename: format!("{pkg}.db"),
                config_filename: format!("{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Default record database filename (relative to the working directory).
    pub fn db_filename(&self) -> &str {
        &self.db_filename
    }

    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Pipeline ----

/// Defaults for the worker pool and the bounded item queue.
pub struct PipelineDefaults;

impl PipelineDefaults {
    /// Concurrent download/resize/persist workers.
    pub const NUM_WORKERS: usize = 5;
    /// Bounded queue between the orchestrator and workers. Enqueue blocks when full.
    pub const QUEUE_CAP: usize = 12;
}

/// Remote directory walked when nothing is configured.
pub const DEFAULT_BASE_DIRECTORY: &str = "/photo";

/// File extensions (lowercase, with dot) treated as images by the filter.
pub const IMAGE_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

// ---- Image processing ----

/// JPEG quality (0-100) of resized copies.
pub const OUTPUT_JPEG_QUALITY: u8 = 50;

// ---- Remote ----

/// Per-request timeout for NAS web API calls (seconds).
pub const NAS_HTTP_TIMEOUT_SECS: u64 = 60;

// ---- CLI ----

/// Interval between status polls while rendering progress (milliseconds).
pub const STATUS_POLL_INTERVAL_MS: u64 = 200;
