//! Path and filter utilities

use std::path::Path;

use crate::RemoteFile;
use crate::utils::config::IMAGE_EXTENSIONS;

/// Path as stored in records and passed to the archive: forward slashes on every platform.
pub fn path_to_archive_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// True if `name` ends with one of [`IMAGE_EXTENSIONS`], ignoring ASCII case.
pub fn has_image_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Image filter: a non-directory entry with a `.jpg`/`.jpeg` suffix (case-insensitive).
pub fn is_image(file: &RemoteFile) -> bool {
    !file.is_dir && has_image_extension(&file.name)
}

/// Keep only images, preserving input order.
pub fn filter_images(files: Vec<RemoteFile>) -> Vec<RemoteFile> {
    files.into_iter().filter(is_image).collect()
}
