//! Logging configuration using tracing
//!
//! The terminal belongs to the dashboard, so every log line goes to a daily
//! rolling file instead of stderr.

use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "VETKOTO_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "vetkoto=info,warn";

const LOG_FILE_NAME: &str = "vetkoto.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/vetkoto/logs/`.
/// Log level is controlled by the `VETKOTO_LOG` environment variable.
///
/// # Examples
/// ```bash
/// VETKOTO_LOG=debug vetkoto --demo
/// VETKOTO_LOG=vetkoto_remote=trace vetkoto
/// ```
pub fn init() -> Result<()> {
    init_in(&get_log_directory())
}

/// Initialize logging into an explicit directory.
pub fn init_in(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| crate::Error::config(format!("logging already initialized: {e}")))?;

    tracing::info!("VetKoto starting, logs in {}", log_dir.display());

    Ok(())
}

/// Directory the rolling log files are written to.
pub fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("vetkoto").join("logs")
}

/// Base path of the log file (the appender adds a date suffix).
pub fn get_current_log_file() -> PathBuf {
    get_log_directory().join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_under_vetkoto_logs() {
        let path = get_current_log_file();
        assert!(path.ends_with("vetkoto/logs/vetkoto.log"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
