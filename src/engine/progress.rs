//! Progress bar driven by polling the status tracker.

use kdam::{Animation, Bar, BarExt};
use std::thread;
use std::time::Duration;

use crate::pipeline::StatusTracker;
use crate::{IndexationStatus, Phase};

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

pub fn create_progress_bar(config: ProgressBarConfig) -> Bar {
    kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " images"
    )
}

/// Mirror one snapshot onto the bar. Total only grows once RUNNING reports it.
pub fn apply_status(bar: &mut Bar, status: &IndexationStatus) {
    match status.phase {
        Phase::Running => {
            if bar.total != status.total_count {
                bar.total = status.total_count;
            }
            let _ = bar.update_to(status.current_index);
        }
        Phase::Finished => {
            let total = bar.total;
            let _ = bar.update_to(total);
        }
        Phase::Idle | Phase::Preparing | Phase::Failed => {
            let _ = bar.refresh();
        }
    }
}

/// Poll `tracker` every `interval` until the run leaves PREPARING/RUNNING; returns the last snapshot.
pub fn watch_status(tracker: &StatusTracker, interval: Duration, show_bar: bool) -> IndexationStatus {
    let mut bar = show_bar.then(|| {
        create_progress_bar(ProgressBarConfig::new(0, "Indexing", Animation::Classic))
    });
    loop {
        let status = tracker.load();
        if let Some(bar) = bar.as_mut() {
            apply_status(bar, &status);
        }
        if !status.phase.is_active() {
            if bar.is_some() {
                eprintln!();
            }
            return status;
        }
        thread::sleep(interval);
    }
}
