//! Engine module: CLI, image processing, record store and output sink

pub mod arg_parser;
pub mod cli;
pub mod db_ops;
pub mod imaging;
pub mod output;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::{Cli, Commands, IndexArgs};
pub use db_ops::{RecordStore, SqliteRecordStore, open_db, open_db_in_memory};
pub use imaging::{resize, scaled_dimensions};
pub use output::{DirSink, OutputSink};
pub use tools::{filter_images, has_image_extension, is_image, path_to_archive_string};
