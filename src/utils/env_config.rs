//! Environment overrides (`.env` in the working directory is loaded first).

use std::path::{Path, PathBuf};

use crate::Opts;

pub const ENV_SYN_HOST: &str = "SYN_HOST";
pub const ENV_SYN_PORT: &str = "SYN_PORT";
pub const ENV_SYN_USER: &str = "SYN_USER";
pub const ENV_SYN_PSSWD: &str = "SYN_PSSWD";
pub const ENV_BASE_DIRECTORY: &str = "BASE_DIRECTORY";
pub const ENV_SCALE_WIDTH: &str = "SCALE_WIDTH";
pub const ENV_SCALE_HEIGHT: &str = "SCALE_HEIGHT";
pub const ENV_OUTPUT_DIR: &str = "INDEXED_IMG_TMP_DIR";
pub const ENV_DB_PATH: &str = "PHOTODEX_DB";

/// Load `dir/.env` into the process environment (existing variables win).
pub fn load_dotenv(dir: &Path) {
    let env_path = dir.join(".env");
    if env_path.is_file()
        && let Err(e) = dotenvy::from_path(&env_path)
    {
        log::warn!("{}: {}", env_path.display(), e);
    }
}

/// Apply environment variables on top of `opts`, reading through `lookup`.
/// Unparseable numbers are logged and ignored.
pub fn apply_env_with<F>(opts: &mut Opts, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let get_f64 = |key: &str| {
        get(key).and_then(|v| {
            v.parse::<f64>()
                .map_err(|e| log::warn!("{}={:?}: {}", key, v, e))
                .ok()
        })
    };

    if let Some(v) = get(ENV_SYN_HOST) {
        opts.nas.host = v;
    }
    if let Some(v) = get(ENV_SYN_PORT) {
        opts.nas.port = v;
    }
    if let Some(v) = get(ENV_SYN_USER) {
        opts.nas.user = v;
    }
    if let Some(v) = get(ENV_SYN_PSSWD) {
        opts.nas.password = v;
    }
    if let Some(v) = get(ENV_BASE_DIRECTORY) {
        opts.base_directory = v;
    }
    if let Some(v) = get_f64(ENV_SCALE_WIDTH) {
        opts.scale_width = v;
    }
    if let Some(v) = get_f64(ENV_SCALE_HEIGHT) {
        opts.scale_height = v;
    }
    if let Some(v) = get(ENV_OUTPUT_DIR) {
        opts.output_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = get(ENV_DB_PATH) {
        opts.db_path = Some(PathBuf::from(v));
    }
}

/// Apply the process environment on top of `opts`.
pub fn apply_env(opts: &mut Opts) {
    apply_env_with(opts, |k| std::env::var(k).ok());
}
