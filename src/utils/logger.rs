use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Terminal colors for status summaries and log tags.
pub struct Colors;

impl Colors {
    pub const OK: &'static str = "green";
    pub const FAILED: &'static str = "red";
    pub const PHASE: &'static str = "cyan";
    pub const WARN: &'static str = "yellow";
    pub const DETAIL: &'static str = "white";

    pub fn colorize(color: &str, text: &str) -> String {
        text.color(color).to_string()
    }
}

/// Module path without the crate prefix: `photodex::pipeline::worker` → `pipeline::worker`.
fn short_target(target: &str) -> &str {
    target
        .strip_prefix(env!("CARGO_PKG_NAME"))
        .map(|rest| rest.trim_start_matches("::"))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(target)
}

/// One log line. Info is bare; debug names the module; warnings and errors carry a level tag.
fn render_line(level: Level, target: &str, msg: &str) -> String {
    let name = Colors::colorize(Colors::PHASE, env!("CARGO_PKG_NAME"));
    let module = Colors::colorize(Colors::DETAIL, short_target(target));
    match level {
        Level::Error => {
            let tag = Colors::colorize(Colors::FAILED, "ERROR");
            format!("[{} {} {}] {}", name, tag, module, msg)
        }
        Level::Warn => {
            let tag = Colors::colorize(Colors::WARN, "WARN");
            format!("[{} {} {}] {}", name, tag, module, msg)
        }
        Level::Info => format!("[{}] {}", name, msg),
        Level::Debug | Level::Trace => format!("[{} {}] {}", name, module, msg),
    }
}

/// Install the global logger. Safe to call more than once (later calls are ignored).
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn) // dependencies: warnings only
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            let msg = record.args().to_string();
            writeln!(buf, "{}", render_line(record.level(), record.target(), &msg))
        })
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_by_level() {
        colored::control::set_override(false);
        assert_eq!(
            render_line(Level::Info, "photodex::pipeline::orchestrator", "started"),
            "[photodex] started"
        );
        assert_eq!(
            render_line(Level::Debug, "photodex::pipeline::worker", "saved 3"),
            "[photodex pipeline::worker] saved 3"
        );
        assert_eq!(
            render_line(Level::Warn, "reqwest::connect", "slow"),
            "[photodex WARN reqwest::connect] slow"
        );
        assert_eq!(
            render_line(Level::Error, "photodex", "boom"),
            "[photodex ERROR photodex] boom"
        );
    }
}
