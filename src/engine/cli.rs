//! CLI command handlers: index (default flow), random, show.

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::engine::arg_parser::{Cli, Commands, IndexArgs};
use crate::engine::db_ops::{SqliteRecordStore, open_db};
use crate::engine::output::DirSink;
use crate::engine::progress::watch_status;
use crate::engine::tools::path_to_archive_string;
use crate::remote::{LocalArchive, RemoteArchive, SynologyClient};
use crate::utils::photodex_toml::{apply_file_to_opts, load_photodex_toml};
use crate::utils::{
    Colors, PackagePaths, STATUS_POLL_INTERVAL_MS, apply_env, load_dotenv, nas_password,
    setup_logging,
};
use crate::{Opts, SourceKind};

/// Apply index flags on top of `opts` (highest precedence).
fn apply_index_args(args: &IndexArgs, opts: &mut Opts) {
    if let Some(ref root) = args.local {
        opts.source = SourceKind::Local;
        opts.base_directory = path_to_archive_string(root);
    }
    if let Some(ref base) = args.base {
        opts.base_directory = base.clone();
    }
    if let Some(w) = args.width {
        opts.scale_width = w;
    }
    if let Some(h) = args.height {
        opts.scale_height = h;
    }
    if let Some(n) = args.workers {
        opts.num_workers = n;
    }
    if let Some(n) = args.queue_cap {
        opts.queue_cap = n;
    }
    if let Some(s) = args.strict {
        opts.strict = s;
    }
}

/// Defaults → `photodex.toml` → environment (with `.env`) → CLI flags.
pub fn build_opts(cli: &Cli, cwd: &Path) -> Opts {
    let mut opts = Opts::default();
    if let Some(file) = load_photodex_toml(cwd) {
        apply_file_to_opts(&file, &mut opts);
    }
    load_dotenv(cwd);
    apply_env(&mut opts);
    if let Some(ref db) = cli.db {
        opts.db_path = Some(db.clone());
    }
    if let Some(ref out) = cli.out {
        opts.output_dir = Some(out.clone());
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Commands::Index(ref args) = cli.command {
        apply_index_args(args, &mut opts);
    }
    opts
}

fn db_path(opts: &Opts) -> PathBuf {
    opts.db_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(PackagePaths::get().db_filename()))
}

fn output_dir(opts: &Opts) -> Result<PathBuf> {
    opts.output_dir
        .clone()
        .ok_or_else(|| anyhow!("output directory not set (use --out or INDEXED_IMG_TMP_DIR)"))
}

fn open_records(opts: &Opts) -> Result<SqliteRecordStore> {
    let path = db_path(opts);
    debug!("Record database: {}", path.display());
    Ok(SqliteRecordStore::new(open_db(&path)?))
}

fn connect_archive(opts: &Opts) -> Result<Arc<dyn RemoteArchive>> {
    match opts.source {
        SourceKind::Local => Ok(Arc::new(LocalArchive)),
        SourceKind::Synology => {
            let mut nas = opts.nas.clone();
            if nas.host.is_empty() {
                return Err(anyhow!("NAS host not set (SYN_HOST or [nas] host)"));
            }
            nas.password = nas_password(&nas)?;
            let client = SynologyClient::login(&nas).context("log in to NAS")?;
            Ok(Arc::new(client))
        }
    }
}

/// Run one indexation in the foreground: start, render progress, print the final snapshot as JSON.
pub fn handle_index(opts: &Opts) -> Result<()> {
    let archive = connect_archive(opts)?;
    let records = Arc::new(open_records(opts)?);
    let sink = Arc::new(DirSink::create(output_dir(opts)?)?);
    let indexer = crate::indexer(opts, archive, records.clone(), sink)?;

    indexer.start_run();
    let last = watch_status(
        &indexer.tracker(),
        Duration::from_millis(STATUS_POLL_INTERVAL_MS),
        !opts.verbose,
    );
    let outcome = indexer.wait();

    // Printed before the run's error so a failed run still reports its terminal snapshot.
    println!("{}", serde_json::to_string_pretty(&last)?);
    let report = outcome.with_context(|| format!("indexation {:?}", last.phase))?;
    if let Some(report) = report {
        let processed = records.count(Some(true))?;
        info!(
            "{} | {} | {}",
            Colors::colorize(Colors::PHASE, &format!("Images: {}", report.total)),
            Colors::colorize(Colors::OK, &format!("Succeeded: {}", report.tally.succeeded)),
            Colors::colorize(Colors::FAILED, &format!("Failed: {}", report.tally.failed)),
        );
        debug!("Processed records in database: {}", processed);
        if report.skipped_dirs > 0 {
            warn!("{} directories could not be listed", report.skipped_dirs);
        }
    }
    Ok(())
}

/// Print a random processed record as JSON, with the path of its resized copy when known.
pub fn handle_random(opts: &Opts) -> Result<()> {
    let records = open_records(opts)?;
    let rec = records
        .random_processed()?
        .ok_or_else(|| anyhow!("no processed images yet"))?;
    print_record(opts, &rec)
}

/// Print record `id` as JSON, with the path of its resized copy when known.
pub fn handle_show(opts: &Opts, id: &str) -> Result<()> {
    let records = open_records(opts)?;
    let rec = records
        .get(id)?
        .ok_or_else(|| anyhow!("no record with id {}", id))?;
    print_record(opts, &rec)
}

fn print_record(opts: &Opts, rec: &crate::ImageRecord) -> Result<()> {
    let mut value = serde_json::to_value(rec)?;
    if let Some(ref dir) = opts.output_dir
        && rec.processed
    {
        value["image"] = serde_json::Value::String(dir.join(&rec.id).display().to_string());
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Dispatch the parsed command line.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("read working directory")?;
    let opts = build_opts(cli, &cwd);
    setup_logging(opts.verbose);
    debug!("Options resolved from {}", cwd.display());
    match cli.command {
        Commands::Index(_) => handle_index(&opts),
        Commands::Random => handle_random(&opts),
        Commands::Show { ref id } => handle_show(&opts, id),
    }
}
