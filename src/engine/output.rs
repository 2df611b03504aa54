//! Output sink for resized copies.

use std::path::{Path, PathBuf};

use crate::error::{IndexError, IndexResult};

/// Destination for processed bytes, keyed by record id.
pub trait OutputSink: Send + Sync {
    fn save(&self, record_id: &str, bytes: &[u8]) -> IndexResult<()>;
}

/// Writes `<dir>/<record id>` files.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Create the directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> IndexResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| IndexError::Storage(format!("create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the copy for `record_id` lives (whether or not it exists yet).
    pub fn path_for(&self, record_id: &str) -> PathBuf {
        self.dir.join(record_id)
    }
}

impl OutputSink for DirSink {
    fn save(&self, record_id: &str, bytes: &[u8]) -> IndexResult<()> {
        let path = self.path_for(record_id);
        std::fs::write(&path, bytes)
            .map_err(|e| IndexError::Storage(format!("write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_file_named_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirSink::create(tmp.path().join("nested").join("out")).unwrap();
        sink.save("42", b"bytes").unwrap();
        assert_eq!(std::fs::read(sink.path_for("42")).unwrap(), b"bytes");
        assert!(sink.dir().ends_with("nested/out"));
    }
}
