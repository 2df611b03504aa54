//! Database operations: schema, open, image records.

mod connection;
mod records;

pub use connection::{open_db, open_db_in_memory};
pub use records::SqliteRecordStore;

use crate::error::IndexResult;

/// Persistence collaborator used by workers. Records are created unprocessed and flipped once
/// the resized copy is saved.
pub trait RecordStore: Send + Sync {
    /// Insert a record for `source_path` with `processed = false`; returns its id.
    fn create_record(&self, source_path: &str) -> IndexResult<String>;

    /// Set `processed = true` on record `id`.
    fn mark_processed(&self, id: &str) -> IndexResult<()>;
}

/// WAL tuning pragmas. Use after PRAGMA journal_mode = WAL.
pub(crate) const WAL_PRAGMAS: &str = r#"
        PRAGMA synchronous = NORMAL;
        "#;

pub(crate) const INSERT_RECORD_SQL: &str =
    "INSERT INTO images (source_path, processed) VALUES (?1, 0)";

pub(crate) const MARK_PROCESSED_SQL: &str = "UPDATE images SET processed = 1 WHERE id = ?1";

/// Schema for the images table.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_path TEXT NOT NULL,
    processed INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_images_processed ON images(processed);
"#;
