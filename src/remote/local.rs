//! Archive backed by a local or mounted directory tree.

use walkdir::WalkDir;

use crate::RemoteFile;
use crate::engine::tools::path_to_archive_string;
use crate::error::{IndexError, IndexResult};

use super::RemoteArchive;

/// Lists one directory level at a time, children sorted by name, so walk order is stable.
/// Paths are plain filesystem paths with forward slashes.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalArchive;

impl RemoteArchive for LocalArchive {
    fn list(&self, dir: &str) -> IndexResult<Vec<RemoteFile>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| IndexError::listing(dir, e))?;
            files.push(RemoteFile {
                path: path_to_archive_string(entry.path()),
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(files)
    }

    fn download(&self, path: &str) -> IndexResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| IndexError::download(path, e))
    }
}
