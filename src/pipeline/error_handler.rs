use log::{debug, warn};

/// Log directories a lenient walk could not list. Call once the walk is done.
pub fn report_skipped_dirs(skipped: &[(String, String)]) {
    if skipped.is_empty() {
        return;
    }
    warn!(
        "Skipped {} directories that could not be listed; indexing the rest",
        skipped.len()
    );
    for (dir, msg) in skipped {
        debug!("  skipped: {} ({})", dir, msg);
    }
}
