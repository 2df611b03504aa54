//! SQLite-backed image records shared by all workers.

use rusqlite::{Connection, OptionalExtension, Row};
use std::sync::{Mutex, MutexGuard};

use crate::ImageRecord;
use crate::error::{IndexError, IndexResult};

use super::{INSERT_RECORD_SQL, MARK_PROCESSED_SQL, RecordStore};

/// One connection behind a mutex; workers serialize on it for the short insert/update.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

fn parse_id(id: &str) -> IndexResult<i64> {
    id.parse::<i64>()
        .map_err(|_| IndexError::Storage(format!("malformed record id {:?}", id)))
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ImageRecord> {
    let id: i64 = row.get(0)?;
    let processed: i64 = row.get(2)?;
    Ok(ImageRecord {
        id: id.to_string(),
        source_path: row.get(1)?,
        processed: processed != 0,
    })
}

impl SqliteRecordStore {
    /// Wrap a connection whose schema has been applied (see [`open_db`](super::open_db)).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> IndexResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| IndexError::Storage("record store lock poisoned".to_string()))
    }

    /// Fetch one record by id.
    pub fn get(&self, id: &str) -> IndexResult<Option<ImageRecord>> {
        let key = parse_id(id)?;
        let conn = self.conn()?;
        let rec = conn
            .query_row(
                "SELECT id, source_path, processed FROM images WHERE id = ?1",
                [key],
                row_to_record,
            )
            .optional()?;
        Ok(rec)
    }

    /// A random processed record, or None when nothing has been processed yet.
    pub fn random_processed(&self) -> IndexResult<Option<ImageRecord>> {
        let conn = self.conn()?;
        let rec = conn
            .query_row(
                "SELECT id, source_path, processed FROM images WHERE processed = 1 ORDER BY RANDOM() LIMIT 1",
                [],
                row_to_record,
            )
            .optional()?;
        Ok(rec)
    }

    /// Number of records, optionally only those with the given `processed` flag.
    pub fn count(&self, processed: Option<bool>) -> IndexResult<usize> {
        let conn = self.conn()?;
        let n: i64 = match processed {
            None => conn.query_row("SELECT COUNT(*) FROM images", [], |r| r.get(0))?,
            Some(p) => conn.query_row(
                "SELECT COUNT(*) FROM images WHERE processed = ?1",
                [p as i64],
                |r| r.get(0),
            )?,
        };
        Ok(n.max(0) as usize)
    }

    /// All records in insertion order.
    pub fn all(&self) -> IndexResult<Vec<ImageRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, source_path, processed FROM images ORDER BY id")?;
        let rows = stmt.query_map([], row_to_record)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

impl RecordStore for SqliteRecordStore {
    fn create_record(&self, source_path: &str) -> IndexResult<String> {
        let conn = self.conn()?;
        conn.execute(INSERT_RECORD_SQL, [source_path])?;
        Ok(conn.last_insert_rowid().to_string())
    }

    fn mark_processed(&self, id: &str) -> IndexResult<()> {
        let key = parse_id(id)?;
        let changed = self.conn()?.execute(MARK_PROCESSED_SQL, [key])?;
        if changed == 0 {
            return Err(IndexError::Storage(format!("no record with id {}", id)));
        }
        Ok(())
    }
}
