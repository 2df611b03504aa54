use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Index a NAS photo archive into downscaled JPEG copies.
#[derive(Clone, Parser)]
#[command(name = "photodex")]
#[command(about = "Walk a photo archive, downscale every JPEG and record the result.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the record database. Default: `photodex.db` in the working directory.
    #[arg(long, short, global = true)]
    pub db: Option<PathBuf>,

    /// Directory holding resized copies (one file per record id).
    #[arg(long, short, global = true)]
    pub out: Option<PathBuf>,

    /// Verbose output.
    #[arg(long, short = 'v', global = true, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Run one indexation and show its progress.
    Index(IndexArgs),
    /// Print a random processed record.
    Random,
    /// Print one record and the path of its resized copy.
    Show {
        /// Record id.
        id: String,
    },
}

#[derive(Clone, Args, Default)]
pub struct IndexArgs {
    /// Archive directory to walk recursively. Default: `/photo` (or BASE_DIRECTORY).
    #[arg(long, short)]
    pub base: Option<String>,

    /// Index a local or mounted directory instead of the NAS web API.
    #[arg(long, value_name = "ROOT", conflicts_with = "base")]
    pub local: Option<PathBuf>,

    /// Target width of resized copies; height follows the source aspect ratio.
    #[arg(long, short = 'W')]
    pub width: Option<f64>,

    /// Target height (kept for configuration symmetry; width alone sets the scale).
    #[arg(long, short = 'H')]
    pub height: Option<f64>,

    /// Number of concurrent workers.
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Capacity of the queue between the walker and workers.
    #[arg(long)]
    pub queue_cap: Option<usize>,

    /// Strict mode: abort the run when a directory cannot be listed (default). `--strict=false` skips it.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,
}
