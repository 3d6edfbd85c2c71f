//! crates/logging-sink/src/backend/memory.rs
//! In-memory backend capturing records for tests and inspection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Backend;
use crate::layout::Layout;
use crate::record::{Record, SourceLocation};
use crate::severity::Severity;

/// Owned copy of a record captured by a [`MemoryBackend`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapturedRecord {
    /// Category display name.
    pub category: String,
    /// Severity the record was logged at.
    pub severity: Severity,
    /// Call-site location.
    pub location: SourceLocation,
    /// Rendered message, category prefix included.
    pub message: String,
    /// The record formatted through the backend's layout.
    pub line: String,
}

/// Collects records in memory.
///
/// Intended for tests and for embedding applications that forward log output
/// themselves. Share it behind an [`Arc`](std::sync::Arc) to inspect captures
/// while a logger owns the backend.
///
/// # Examples
///
/// ```
/// use logging_sink::{Backend, MemoryBackend, Record, Severity, SourceLocation};
///
/// let backend = MemoryBackend::new();
/// let location = SourceLocation::new("main.rs", 1, 1);
/// backend.write(&Record::new("Op", Severity::Info, location, "[Op] started"));
///
/// assert_eq!(backend.messages(), vec!["[Op] started".to_owned()]);
/// ```
#[derive(Debug)]
pub struct MemoryBackend {
    layout: Layout,
    records: Mutex<Vec<CapturedRecord>>,
    flushes: AtomicUsize,
}

impl MemoryBackend {
    /// Creates a backend whose lines contain only the rendered message.
    #[must_use]
    pub fn new() -> Self {
        Self::with_layout(Layout::message_only())
    }

    /// Creates a backend that formats captured lines through `layout`.
    #[must_use]
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            records: Mutex::new(Vec::new()),
            flushes: AtomicUsize::new(0),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Vec<CapturedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of every captured record.
    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.guard().clone()
    }

    /// Returns the rendered messages in capture order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.guard().iter().map(|r| r.message.clone()).collect()
    }

    /// Returns the formatted lines in capture order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.guard().iter().map(|r| r.line.clone()).collect()
    }

    /// Returns every formatted line joined by newlines.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lines().join("\n")
    }

    /// Reports whether any formatted line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.guard().iter().any(|r| r.line.contains(needle))
    }

    /// Number of captured records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Reports whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Removes and returns every captured record.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.guard())
    }

    /// Discards every captured record.
    pub fn clear(&self) {
        self.guard().clear();
    }

    /// Number of times [`Backend::flush`] was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn write(&self, record: &Record<'_>) {
        let mut line = String::with_capacity(record.message().len());
        self.layout.format(record, &mut line);
        let captured = CapturedRecord {
            category: record.category().to_owned(),
            severity: record.severity(),
            location: *record.location(),
            message: record.message().to_owned(),
            line,
        };
        self.guard().push(captured);
    }

    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(backend: &MemoryBackend, severity: Severity, message: &str) {
        let location = SourceLocation::new("m.rs", 7, 3);
        backend.write(&Record::new("Timer", severity, location, message));
    }

    #[test]
    fn captures_in_order() {
        let backend = MemoryBackend::new();
        write(&backend, Severity::Info, "[Timer] one");
        write(&backend, Severity::Warn, "[Timer] two");

        assert_eq!(backend.len(), 2);
        assert_eq!(backend.messages(), vec!["[Timer] one", "[Timer] two"]);
        let records = backend.records();
        assert_eq!(records[1].severity, Severity::Warn);
        assert_eq!(records[1].category, "Timer");
        assert_eq!(records[1].location.line(), 7);
    }

    #[test]
    fn layout_applies_to_lines_only() {
        let backend = MemoryBackend::with_layout(Layout::new("%l %v"));
        write(&backend, Severity::Debug, "[Timer] tick");

        assert_eq!(backend.lines(), vec!["debug [Timer] tick"]);
        assert_eq!(backend.messages(), vec!["[Timer] tick"]);
        assert!(backend.contains("debug [Timer]"));
    }

    #[test]
    fn take_and_clear_empty_the_buffer() {
        let backend = MemoryBackend::default();
        write(&backend, Severity::Info, "a");
        write(&backend, Severity::Info, "b");

        assert_eq!(backend.take().len(), 2);
        assert!(backend.is_empty());

        write(&backend, Severity::Info, "c");
        assert_eq!(backend.contents(), "c");
        backend.clear();
        assert!(backend.is_empty());
    }

    #[test]
    fn counts_flushes() {
        let backend = MemoryBackend::new();
        backend.flush();
        backend.flush();
        assert_eq!(backend.flush_count(), 2);
    }
}
