#![deny(unsafe_code)]

//! Emits one statement per severity and a few per category through the
//! global logger, configured from `CATLOG_LEVEL`, `CATLOG_TYPES` and
//! `CATLOG_FILE`.
//!
//! Library diagnostics, such as a warning about an unrecognised level, go to
//! stderr through `tracing`, filtered by `CATLOG_DIAG` (default `warn`).

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::io;
use std::process::ExitCode;

use logging::{
    Category, LoggerConfig, log_critical, log_debug, log_error, log_info, log_trace, log_warning,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("CATLOG_DIAG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    logging::init(&LoggerConfig::from_env());

    log_trace!("trace from the demo");
    log_debug!("debug from the demo");
    log_info!("info from the demo");
    log_warning!("warning from the demo");
    log_error!("error from the demo");
    log_critical!("critical from the demo");

    for category in [Category::Device, Category::Op, Category::Fabric] {
        log_info!(category, "{} subsystem ready", category.name().to_lowercase());
    }
    log_info!(Metal);
    log_debug!(Dispatch, "queued {} commands", 3);

    logging::flush();
    ExitCode::SUCCESS
}
