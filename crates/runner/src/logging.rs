// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscriber setup for the runner process.

use crate::env::RunnerConfig;
use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "authsync";
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),
    #[error("failed to create log directory: {0}")]
    CreateDir(#[from] std::io::Error),
    #[error("failed to open log file: {0}")]
    Appender(#[from] InitError),
    #[error("global subscriber already set: {0}")]
    AlreadyInitialized(String),
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when logging to `log_dir`; buffered lines
/// are lost unless it is held until shutdown.
pub fn init(config: &RunnerConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = env_filter(&config.log_filter)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match &config.log_dir {
        Some(dir) => {
            let (writer, guard) = file_writer(dir)?;
            builder
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;
            Ok(None)
        }
    }
}

pub(crate) fn env_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    Ok(EnvFilter::try_new(directives)?)
}

/// Daily rolling `authsync.<date>.log` files under `dir`.
pub(crate) fn file_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(dir)?;
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
