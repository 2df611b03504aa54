//! Remote archive collaborators: listing and download.

pub mod local;
pub mod synology;

pub use local::LocalArchive;
pub use synology::SynologyClient;

use crate::RemoteFile;
use crate::error::IndexResult;

/// Read-only access to a photo archive. Shared by the walker and every worker.
pub trait RemoteArchive: Send + Sync {
    /// List the direct children of `dir`. Fails with [`IndexError::Listing`](crate::error::IndexError::Listing).
    fn list(&self, dir: &str) -> IndexResult<Vec<RemoteFile>>;

    /// Fetch the raw bytes of the file at `path`. Fails with [`IndexError::Download`](crate::error::IndexError::Download).
    fn download(&self, path: &str) -> IndexResult<Vec<u8>>;
}
