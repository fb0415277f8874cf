use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::settings::{config_dir, load_settings};

pub const LOG_ENV: &str = "CREWBOOK_LOG";

/// `CREWBOOK_LOG` wins over the configured level; an unparseable level becomes `info`.
pub fn filter_for(configured: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn log_path(dir: &Path) -> std::path::PathBuf {
    dir.join("crewbook.log")
}

/// Send tracing output to `~/.config/crewbook/crewbook.log`. The terminal
/// belongs to the TUI, so nothing is written to stderr. Logging is skipped
/// if the file cannot be opened.
pub fn init() {
    let settings = load_settings();
    let dir = config_dir();
    let _ = std::fs::create_dir_all(&dir);
    let file = match OpenOptions::new().create(true).append(true).open(log_path(&dir)) {
        Ok(f) => f,
        Err(_) => return,
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter_for(&settings.log_level))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_config_dir() {
        let dir = Path::new("/tmp/crewbook-test");
        assert_eq!(log_path(dir), dir.join("crewbook.log"));
    }

    #[test]
    fn configured_level_is_used() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }
        assert_eq!(filter_for("debug").to_string(), "debug");
    }

    #[test]
    fn bad_level_falls_back_to_info() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }
        assert_eq!(filter_for("crewbook=loud").to_string(), "info");
    }
}
