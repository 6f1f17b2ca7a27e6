//! File-based tracing setup.
//!
//! The TUI owns the terminal, so log output goes to
//! `<data_dir>/gpt-term.log` without ANSI colors. The filter comes from
//! `GPT_TERM_LOG` (standard `EnvFilter` syntax).

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use super::config::AppConfig;

/// Install the global subscriber.
///
/// Returns false if the log file could not be opened or a subscriber was
/// already installed; logging is then silently disabled.
pub fn init_tracing(config: &AppConfig) -> bool {
    if fs::create_dir_all(&config.data_dir).is_err() {
        return false;
    }

    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
    {
        Ok(file) => file,
        Err(_) => return false,
    };

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(super::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok()
}
