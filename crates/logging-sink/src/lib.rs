#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` is the backend half of the catlog front end. It defines the
//! vocabulary shared with the filtering layer ([`Severity`],
//! [`SourceLocation`], [`Record`]) and the single entry point through which
//! accepted records leave the front end: [`Backend::write`].
//!
//! # Design
//!
//! Backends receive fully rendered messages (the category prefix is already in
//! place) and decide how to lay them out and where to put them:
//!
//! - [`ConsoleBackend`] writes to stdout or stderr, colouring the category tag
//!   when the stream is a terminal.
//! - [`FileBackend`] truncates and writes a log file through a buffered writer.
//! - [`MemoryBackend`] captures records for tests and embedders.
//! - [`TracingBackend`] forwards records as `tracing` events.
//!
//! Formatting is driven by a [`Layout`] compiled from a `%`-flag pattern.
//!
//! # Invariants
//!
//! - Backends never filter; every record they see was accepted upstream.
//! - [`Backend::write`] never fails the caller. The first I/O failure of a
//!   backend is reported through `tracing` and later ones are suppressed.
//! - Writer-backed backends flush after records at or above their flush
//!   threshold (`error` by default).
//!
//! # Errors
//!
//! Only backend construction is fallible: [`BackendError`] describes a
//! destination that could not be opened.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{Backend, Layout, MemoryBackend, Record, Severity, SourceLocation};
//!
//! let backend = MemoryBackend::with_layout(Layout::new("%l: %v"));
//! let record = Record::new(
//!     "Device",
//!     Severity::Warn,
//!     SourceLocation::caller(),
//!     "[Device] retrying",
//! );
//! backend.write(&record);
//!
//! assert_eq!(backend.lines(), vec!["warning: [Device] retrying".to_owned()]);
//! ```

mod backend;
mod error;
mod layout;
mod line_mode;
mod record;
mod severity;

pub use backend::{
    Backend, CapturedRecord, ConsoleBackend, ConsoleStream, Destination, FileBackend,
    MemoryBackend, TRACING_TARGET, TracingBackend,
};
pub use error::BackendError;
pub use layout::{DEFAULT_PATTERN, Layout};
pub use line_mode::LineMode;
pub use record::{Record, SourceLocation};
pub use severity::{ParseSeverityError, Severity};
