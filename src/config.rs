//! Runtime configuration.
//!
//! Values come from command-line flags, falling back to environment
//! variables and then to defaults (see [`crate::cli::Args`]). The core only
//! ever sees the plain values collected here.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "abacus.log";
pub const DEFAULT_CONSOLE_LEVEL: LevelFilter = LevelFilter::WARN;
pub const DEFAULT_FILE_LEVEL: LevelFilter = LevelFilter::DEBUG;

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    /// Directory holding the rotating log files
    pub directory: PathBuf,
    /// File name prefix for the rotating log files
    pub file_name: String,
    /// Minimum level written to stderr
    pub console_level: LevelFilter,
    /// Minimum level written to the log file
    pub file_level: LevelFilter,
    /// Whether the file sink is installed at all
    pub file_enabled: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            file_name: DEFAULT_LOG_FILE.to_string(),
            console_level: DEFAULT_CONSOLE_LEVEL,
            file_level: DEFAULT_FILE_LEVEL,
            file_enabled: true,
        }
    }
}

/// Complete startup configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub log: LogSettings,
    /// Show at most this many records in `history`; `None` shows all
    pub history_limit: Option<NonZeroUsize>,
}
