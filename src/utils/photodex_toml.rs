//! Load `photodex.toml` from a directory (CLI only). Lib callers build [`Opts`] themselves.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;
use crate::{Opts, SourceKind};

#[derive(Debug, Deserialize)]
pub(crate) struct PhotodexToml {
    #[serde(default)]
    settings: SettingsSection,
    #[serde(default)]
    nas: NasSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    source: Option<SourceKind>,
    base_directory: Option<String>,
    scale_width: Option<f64>,
    scale_height: Option<f64>,
    workers: Option<usize>,
    queue_cap: Option<usize>,
    output_dir: Option<String>,
    db_path: Option<String>,
    strict: Option<bool>,
    verbose: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct NasSection {
    host: Option<String>,
    port: Option<String>,
    user: Option<String>,
    password: Option<String>,
}

/// Parse a config document. Errors are logged and yield None.
pub(crate) fn parse_photodex_toml(s: &str, origin: &Path) -> Option<PhotodexToml> {
    toml::from_str(s)
        .map_err(|e| log::warn!("{}: {}", origin.display(), e))
        .ok()
}

/// Load `photodex.toml` from `dir` if present. Returns None if file missing or unreadable.
pub(crate) fn load_photodex_toml(dir: &Path) -> Option<PhotodexToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_photodex_toml(&s, &path)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $sec.$sec_field.clone() {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Apply file config to opts (only set fields present in the file). Call before env and CLI.
pub(crate) fn apply_file_to_opts(file: &PhotodexToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, source => source);
    apply_file_opt!(s, opts, base_directory => base_directory);
    apply_file_opt!(s, opts, scale_width => scale_width);
    apply_file_opt!(s, opts, scale_height => scale_height);
    apply_file_opt!(s, opts, workers => num_workers);
    apply_file_opt!(s, opts, queue_cap => queue_cap);
    if let Some(ref p) = s.output_dir {
        opts.output_dir = Some(PathBuf::from(p));
    }
    if let Some(ref p) = s.db_path {
        opts.db_path = Some(PathBuf::from(p));
    }
    apply_file_opt!(s, opts, strict => strict);
    apply_file_opt!(s, opts, verbose => verbose);

    let n = &file.nas;
    apply_file_opt!(n, opts, host => nas.host);
    apply_file_opt!(n, opts, port => nas.port);
    apply_file_opt!(n, opts, user => nas.user);
    apply_file_opt!(n, opts, password => nas.password);
}
