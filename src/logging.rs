//! Logging setup.
//!
//! Installs a `tracing` subscriber with two sinks: a rotating log file
//! with a detailed format, and a compact stderr sink that by default only
//! shows warnings and errors.

use crate::config::LogSettings;
use crate::error::StartupError;
use std::fs;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Rotated log files kept on disk.
pub const MAX_LOG_FILES: usize = 5;

/// Build the rolling file appender described by `settings`.
pub fn file_appender(settings: &LogSettings) -> Result<RollingFileAppender, StartupError> {
    fs::create_dir_all(&settings.directory).map_err(|source| StartupError::LogDirectory {
        dir: settings.directory.clone(),
        source,
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(settings.file_name.as_str())
        .max_log_files(MAX_LOG_FILES)
        .build(&settings.directory)
        .map_err(|source| StartupError::LogSink {
            dir: settings.directory.clone(),
            source,
        })
}

/// Install the global subscriber.
///
/// The returned guard flushes the file sink when dropped and must be held
/// for as long as the process logs.
pub fn init(settings: &LogSettings) -> Result<Option<WorkerGuard>, StartupError> {
    let (file_layer, guard) = if settings.file_enabled {
        let (writer, guard) = tracing_appender::non_blocking(file_appender(settings)?);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_filter(settings.file_level);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(settings.console_level);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    info!(
        directory = %settings.directory.display(),
        file_enabled = settings.file_enabled,
        "logging configured"
    );
    Ok(guard)
}
