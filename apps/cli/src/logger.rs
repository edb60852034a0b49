//! Logging for both binaries.
//!
//! The CLI logs to stderr with colors (stdout carries command output). The
//! host logs to a size-capped file only, since stdout carries the protocol.

use crate::error::CliError;

use client_core::ipc::debug_log::{MAX_LOG_BYTES, RotatingLogFile, debug_enabled};

use std::io::{Write, stderr};
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// Default log level for debug builds.
#[cfg(debug_assertions)]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Default log level for release builds.
#[cfg(not(debug_assertions))]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize colored stderr logging for the CLI.
///
/// Safe to call multiple times; only the first call installs a logger.
pub fn initialize_cli(level: LevelFilter) -> Result<(), CliError> {
    initialize_once(level, || cli_dispatch(level))
}

/// Initialize file logging for the host.
///
/// Does nothing when `LEETCODE_EXPORTER_DEBUG=0`. Stdout is never a log target.
pub fn initialize_host(log_path: &Path) -> Result<(), CliError> {
    if !debug_enabled() {
        return Ok(());
    }
    initialize_once(LOG_LEVEL, || host_dispatch(log_path))
}

fn initialize_once<F>(level: LevelFilter, build: F) -> Result<(), CliError>
where
    F: FnOnce() -> Result<Dispatch, CliError>,
{
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = build().and_then(apply);
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{level:?}");
        }
    });

    result
}

#[track_caller]
fn apply(dispatch: Dispatch) -> Result<(), CliError> {
    dispatch
        .apply()
        .map_err(|e| CliError::cli(format!("Failed to initialize logger: {e}")))
}

fn cli_dispatch(level: LevelFilter) -> Result<Dispatch, CliError> {
    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    Ok(Dispatch::new()
        .level(level)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(stderr()))
}

fn host_dispatch(log_path: &Path) -> Result<Dispatch, CliError> {
    Ok(Dispatch::new()
        .level(LOG_LEVEL)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(open_log_writer(log_path)?))
}

/// Rotating writer for the host's debug log.
#[track_caller]
pub(crate) fn open_log_writer(log_path: &Path) -> Result<Box<dyn Write + Send>, CliError> {
    let file = RotatingLogFile::open(log_path, MAX_LOG_BYTES)
        .map_err(|e| CliError::cli(format!("Failed to create log file: {e}")))?;
    Ok(Box::new(file))
}
