#![forbid(unsafe_code)]

//! Log subscriber setup.
//!
//! The terminal is busy drawing the UI, so logs only ever go to a file. With
//! `FPICK_LOG_FILE` unset no subscriber is installed and every event is
//! discarded.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// File that receives log output.
pub const LOG_FILE_ENV: &str = "FPICK_LOG_FILE";

/// Filter directives, `info` when unset.
pub const LOG_FILTER_ENV: &str = "FPICK_LOG";

/// Install the global subscriber if `FPICK_LOG_FILE` names a file.
///
/// Returns whether a subscriber was installed.
pub fn init() -> io::Result<bool> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV) else {
        return Ok(false);
    };
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .map_err(io::Error::other)?;
    tracing::info!(version = crate::cli::VERSION, "logging initialized");
    Ok(true)
}
