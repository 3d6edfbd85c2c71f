//! crates/logging-sink/src/error.rs
//! Errors raised while constructing backends.

use std::io;
use std::path::PathBuf;

/// Failure to construct a [`Backend`](crate::Backend).
///
/// Writes never surface errors to call sites; only construction does, since a
/// logger that cannot open its destination must not be handed out.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The configured log file could not be created.
    #[error("failed to create log file '{}': {source}", path.display())]
    OpenFile {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl BackendError {
    /// Returns the destination path involved in the failure.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::OpenFile { path, .. } => path,
        }
    }
}
