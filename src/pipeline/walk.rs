//! Directory walker: depth-first pre-order expansion of a remote directory via repeated listings.

use log::debug;

use crate::RemoteFile;
use crate::error::{IndexError, IndexResult};
use crate::remote::RemoteArchive;

/// Result of a lenient walk: everything that could be listed, plus the directories that could not.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub files: Vec<RemoteFile>,
    /// (directory path, error message)
    pub skipped: Vec<(String, String)>,
}

/// Walk `root` and return every reachable entry exactly once, in pre-order.
///
/// Any failed listing aborts the walk and partial results are discarded.
/// No cycle detection and no depth limit; the whole list is materialized before returning.
pub fn walk(archive: &dyn RemoteArchive, root: &str) -> IndexResult<Vec<RemoteFile>> {
    let mut out = Vec::new();
    walk_strict_into(archive, root, &mut out)?;
    debug!("walk: {} entries under {}", out.len(), root);
    Ok(out)
}

fn walk_strict_into(
    archive: &dyn RemoteArchive,
    dir: &str,
    out: &mut Vec<RemoteFile>,
) -> IndexResult<()> {
    for file in archive.list(dir)? {
        let subdir = file.is_dir.then(|| file.path.clone());
        out.push(file);
        if let Some(subdir) = subdir {
            walk_strict_into(archive, &subdir, out)?;
        }
    }
    Ok(())
}

/// Like [`walk`], but a directory whose listing fails is recorded in `skipped` and the walk
/// continues with its siblings.
pub fn walk_lenient(archive: &dyn RemoteArchive, root: &str) -> WalkOutcome {
    let mut outcome = WalkOutcome::default();
    walk_lenient_into(archive, root, &mut outcome);
    debug!(
        "walk: {} entries under {} ({} directories skipped)",
        outcome.files.len(),
        root,
        outcome.skipped.len()
    );
    outcome
}

fn walk_lenient_into(archive: &dyn RemoteArchive, dir: &str, outcome: &mut WalkOutcome) {
    let listed = match archive.list(dir) {
        Ok(listed) => listed,
        Err(err) => {
            let msg = match err {
                IndexError::Listing { reason, .. } => reason,
                other => other.to_string(),
            };
            outcome.skipped.push((dir.to_string(), msg));
            return;
        }
    };
    for file in listed {
        let subdir = file.is_dir.then(|| file.path.clone());
        outcome.files.push(file);
        if let Some(subdir) = subdir {
            walk_lenient_into(archive, &subdir, outcome);
        }
    }
}
