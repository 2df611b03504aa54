use crossbeam_channel::Receiver;
use log::{debug, warn};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::RemoteFile;
use crate::engine::imaging;
use crate::error::IndexResult;

use super::context::WorkerContext;

/// Single worker: take items until the queue is closed and drained. A failed item is logged and
/// counted; the worker moves on to the next one.
fn worker_loop(item_rx: Receiver<RemoteFile>, ctx: Arc<WorkerContext>) {
    while let Ok(file) = item_rx.recv() {
        match process_item(&ctx, &file) {
            Ok(id) => {
                debug!("Indexed {} as record {}", file.path, id);
                ctx.counters.record_success();
            }
            Err(e) => {
                warn!("Skipping {}: {}", file.path, e);
                ctx.counters.record_failure();
            }
        }
    }
}

/// Spawn `num_workers` workers reading from `item_rx`. The caller drops its sender to let them exit.
pub fn spawn_workers(
    item_rx: Receiver<RemoteFile>,
    ctx: &Arc<WorkerContext>,
    num_workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_workers)
        .map(|_| {
            let item_rx = item_rx.clone();
            let ctx = Arc::clone(ctx);
            thread::spawn(move || worker_loop(item_rx, ctx))
        })
        .collect()
}

/// Create record → download → resize → save → mark processed. Stops at the first failing step,
/// leaving the record (if created) unprocessed. Returns the record id.
pub fn process_item(ctx: &WorkerContext, file: &RemoteFile) -> IndexResult<String> {
    let c = &ctx.collaborators;
    let id = c.records.create_record(&file.path)?;
    debug!("Record {} created for {}", id, file.path);
    let raw = c.archive.download(&file.path)?;
    let resized = imaging::resize(&raw, ctx.target)?;
    c.sink.save(&id, &resized)?;
    c.records.mark_processed(&id)?;
    Ok(id)
}
