//! crates/logging-sink/src/backend.rs
//! The backend boundary and the backends shipped with the crate.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::BackendError;
use crate::layout::Layout;
use crate::record::Record;

mod bridge;
mod console;
mod file;
mod memory;

pub use bridge::{TRACING_TARGET, TracingBackend};
pub use console::{ConsoleBackend, ConsoleStream};
pub use file::FileBackend;
pub use memory::{CapturedRecord, MemoryBackend};

/// Destination for accepted records.
///
/// Implementations own buffering, flushing and destination selection. The
/// front end calls [`write`](Self::write) only for records that already
/// passed filtering, so backends never filter on their own.
pub trait Backend: Send + Sync {
    /// Formats and writes a single record.
    ///
    /// Writes must not fail the caller. Implementations report I/O problems
    /// through their own diagnostics and carry on.
    fn write(&self, record: &Record<'_>);

    /// Flushes any buffered output.
    fn flush(&self) {}
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn write(&self, record: &Record<'_>) {
        (**self).write(record);
    }

    fn flush(&self) {
        (**self).flush();
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn write(&self, record: &Record<'_>) {
        (**self).write(record);
    }

    fn flush(&self) {
        (**self).flush();
    }
}

/// Where a configured logger sends its output.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Destination {
    /// Standard output.
    #[default]
    Console,
    /// A log file, truncated when opened.
    File(PathBuf),
}

impl Destination {
    /// Maps an optional path to a destination; absent or empty selects the console.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::Destination;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(Destination::from_path(None), Destination::Console);
    /// assert_eq!(Destination::from_path(Some(PathBuf::new())), Destination::Console);
    /// assert_eq!(
    ///     Destination::from_path(Some(PathBuf::from("run.log"))),
    ///     Destination::File(PathBuf::from("run.log"))
    /// );
    /// ```
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::File(path),
            _ => Self::Console,
        }
    }

    /// Constructs the backend for this destination.
    pub fn open(&self, layout: Layout) -> Result<Box<dyn Backend>, BackendError> {
        Ok(match self {
            Self::Console => Box::new(ConsoleBackend::stdout(layout)),
            Self::File(path) => Box::new(FileBackend::create(path.clone(), layout)?),
        })
    }
}

/// Reports the first write failure of a backend and stays silent afterwards.
#[derive(Debug, Default)]
struct FailureLatch(AtomicBool);

impl FailureLatch {
    fn report(&self, destination: &str, error: &io::Error) {
        if !self.0.swap(true, Ordering::Relaxed) {
            tracing::error!(
                destination,
                %error,
                "log backend write failed; further failures are suppressed"
            );
        }
    }

    #[cfg(test)]
    fn tripped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
