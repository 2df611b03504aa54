//! NAS password loading: already configured → secure prompt.

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use crate::NasOpts;

/// Return the configured NAS password, or prompt for it when empty.
pub fn nas_password(nas: &NasOpts) -> Result<String> {
    if !nas.password.trim().is_empty() {
        return Ok(nas.password.trim().to_string());
    }
    info!("No NAS password in config or environment");
    let label = format!("[{}]", env!("CARGO_PKG_NAME")).cyan().bold();
    let prompt = format!("{} Password for {}@{}: ", label, nas.user, nas.host);
    let pass = rpassword::prompt_password(prompt).context("read NAS password")?;
    Ok(pass.trim().to_string())
}
