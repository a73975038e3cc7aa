//! Command-line argument parsing.

use crate::config::{Config, LogSettings, DEFAULT_LOG_DIR, DEFAULT_LOG_FILE};
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Interactive arithmetic and statistics calculator
#[derive(Parser, Debug)]
#[command(name = "abacus")]
#[command(about = "Interactive calculator with computation history", long_about = None)]
#[command(version)]
pub struct Args {
    /// Directory for rotating log files
    #[arg(long, env = "ABACUS_LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// File name prefix for log files
    #[arg(long, env = "ABACUS_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: String,

    /// Minimum level printed to the console (off, error, warn, info, debug, trace)
    #[arg(long, env = "ABACUS_LOG_LEVEL_CONSOLE", default_value = "warn")]
    pub console_level: LevelFilter,

    /// Minimum level written to the log file
    #[arg(long, env = "ABACUS_LOG_LEVEL_FILE", default_value = "debug")]
    pub file_level: LevelFilter,

    /// Show at most this many records in `history`
    #[arg(long, env = "ABACUS_HISTORY_LIMIT")]
    pub history_limit: Option<NonZeroUsize>,

    /// Do not write a log file
    #[arg(long)]
    pub no_file_log: bool,
}

impl Args {
    /// Build the runtime configuration from parsed arguments.
    pub fn config(&self) -> Config {
        Config {
            log: LogSettings {
                directory: self.log_dir.clone(),
                file_name: self.log_file.clone(),
                console_level: self.console_level,
                file_level: self.file_level,
                file_enabled: !self.no_file_log,
            },
            history_limit: self.history_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "abacus",
            "--log-dir",
            "/tmp/abacus-logs",
            "--log-file",
            "calc.log",
            "--console-level",
            "error",
            "--file-level",
            "trace",
            "--history-limit",
            "5",
            "--no-file-log",
        ])
        .unwrap();

        let config = args.config();
        assert_eq!(config.log.directory, PathBuf::from("/tmp/abacus-logs"));
        assert_eq!(config.log.file_name, "calc.log");
        assert_eq!(config.log.console_level, LevelFilter::ERROR);
        assert_eq!(config.log.file_level, LevelFilter::TRACE);
        assert!(!config.log.file_enabled);
        assert_eq!(config.history_limit, NonZeroUsize::new(5));
    }

    #[test]
    fn invalid_level_is_rejected() {
        let result = Args::try_parse_from(["abacus", "--console-level", "loud"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_history_limit_is_rejected() {
        let result = Args::try_parse_from(["abacus", "--history-limit", "0"]);
        assert!(result.is_err());
    }
}
