//! Logging setup.
//!
//! Logs are written to the console and, as JSON, to a daily rolling file.
use crate::error::{Error, Result};
use std::{fs, io};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, time::UtcTime};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry};

const LOG_PREFIX: &str = "updraft.cli.log";
const FILE_LOG_LEVEL: LevelFilter = LevelFilter::DEBUG;

/// Console log level.
pub fn console_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Installs the global logger.
///
/// # Returns
/// Guard flushing the file logger, which must be held for the lifetime of the program.
pub fn init(log_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;
    let file_logger = tracing_appender::rolling::daily(log_dir, LOG_PREFIX);
    let (file_logger, log_guard) = tracing_appender::non_blocking(file_logger);
    let file_logger = fmt::layer()
        .with_writer(file_logger)
        .with_timer(UtcTime::rfc_3339())
        .json()
        .with_filter(FILE_LOG_LEVEL);

    let console_logger = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .pretty()
        .with_filter(console_level(verbose));

    let subscriber = Registry::default().with(console_logger).with(file_logger);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Logging(err.to_string()))?;

    Ok(log_guard)
}

#[cfg(test)]
#[path = "./logging_test.rs"]
mod logging_test;
