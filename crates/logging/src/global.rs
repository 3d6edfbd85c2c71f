//! crates/logging/src/global.rs
//! The process-wide logger used by the `log_*!` macros.
//!
//! The global logger is created at most once. Whichever of [`init`],
//! [`init_with`] or [`global`] runs first decides its configuration; later
//! calls return the existing logger unchanged.

use std::process;
use std::sync::OnceLock;

use crate::config::LoggerConfig;
use crate::levels::LevelFilter;
use crate::logger::Logger;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Initializes the global logger from `config`, or returns the existing one.
///
/// A log destination that cannot be opened is unrecoverable for the process:
/// the error is printed to stderr and the process aborts.
pub fn init(config: &LoggerConfig) -> &'static Logger {
    init_with(|| build_or_abort(config))
}

/// Initializes the global logger with `make`, or returns the existing one.
///
/// `make` runs at most once per process. Tests and embedders use this to
/// install a logger with their own backend.
pub fn init_with<F>(make: F) -> &'static Logger
where
    F: FnOnce() -> Logger,
{
    GLOBAL.get_or_init(make)
}

/// Returns the global logger, configuring it from the environment on first use.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(|| build_or_abort(&LoggerConfig::from_env()))
}

/// Returns the global logger if it has been initialized.
#[must_use]
pub fn try_global() -> Option<&'static Logger> {
    GLOBAL.get()
}

/// Reports whether the global logger exists.
#[must_use]
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

/// Replaces the global logger's minimum severity.
pub fn set_min_severity(threshold: impl Into<LevelFilter>) {
    global().set_min_severity(threshold);
}

/// Flushes the global logger if it exists.
///
/// Statics are never dropped, so buffered output must be flushed explicitly
/// before the process exits.
pub fn flush() {
    if let Some(logger) = try_global() {
        logger.flush();
    }
}

fn build_or_abort(config: &LoggerConfig) -> Logger {
    match Logger::from_config(config) {
        Ok(logger) => logger,
        Err(error) => {
            eprintln!("catlog: {error}");
            process::abort();
        }
    }
}
