//! crates/logging-sink/src/backend/file.rs
//! File backend writing formatted records to a path.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{Backend, FailureLatch};
use crate::error::BackendError;
use crate::layout::Layout;
use crate::line_mode::LineMode;
use crate::record::Record;
use crate::severity::Severity;

/// Writes records to a file.
///
/// The file is truncated when the backend is created. Output is buffered and
/// flushed after every record at or above the flush threshold (`error` by
/// default), on [`Backend::flush`], and when the backend is dropped.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    layout: Layout,
    flush_on: Severity,
    line_mode: LineMode,
    failure: FailureLatch,
}

impl FileBackend {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl Into<PathBuf>, layout: Layout) -> Result<Self, BackendError> {
        let path = path.into();
        let file = File::create(&path).map_err(|source| BackendError::OpenFile {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            layout,
            flush_on: Severity::Error,
            line_mode: LineMode::WithNewline,
            failure: FailureLatch::default(),
        })
    }

    /// Flushes after every record at or above `severity`.
    #[must_use]
    pub fn with_flush_on(mut self, severity: Severity) -> Self {
        self.flush_on = severity;
        self
    }

    /// Selects whether each record ends with a newline.
    #[must_use]
    pub fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

impl Backend for FileBackend {
    fn write(&self, record: &Record<'_>) {
        let mut line = String::with_capacity(record.message().len() + 64);
        self.layout.format(record, &mut line);
        self.line_mode.terminate(&mut line);

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut result = writer.write_all(line.as_bytes());
        if result.is_ok() && record.severity() >= self.flush_on {
            result = writer.flush();
        }
        drop(writer);

        if let Err(error) = result {
            self.failure.report(&self.destination(), &error);
        }
    }

    fn flush(&self) {
        let result = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
        if let Err(error) = result {
            self.failure.report(&self.destination(), &error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SourceLocation;
    use std::fs;

    fn record(severity: Severity, message: &str) -> Record<'_> {
        Record::new("Loader", severity, SourceLocation::new("l.rs", 2, 1), message)
    }

    #[test]
    fn buffered_until_flush_threshold() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        let backend = FileBackend::create(&path, Layout::message_only()).expect("create");

        backend.write(&record(Severity::Info, "[Loader] queued"));
        assert_eq!(fs::read_to_string(&path).expect("read"), "");

        backend.write(&record(Severity::Error, "[Loader] failed"));
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "[Loader] queued\n[Loader] failed\n"
        );
    }

    #[test]
    fn explicit_flush_writes_everything() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        let backend = FileBackend::create(&path, Layout::message_only())
            .expect("create")
            .with_line_mode(LineMode::WithoutNewline);

        backend.write(&record(Severity::Debug, "a"));
        backend.write(&record(Severity::Debug, "b"));
        backend.flush();

        assert_eq!(fs::read_to_string(&path).expect("read"), "ab");
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        fs::write(&path, "stale contents\n").expect("seed");

        let backend = FileBackend::create(&path, Layout::message_only()).expect("create");
        assert_eq!(backend.path(), path.as_path());
        backend.flush();
        assert_eq!(fs::read_to_string(&path).expect("read"), "");
    }

    #[test]
    fn drop_flushes_buffered_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        {
            let backend = FileBackend::create(&path, Layout::message_only())
                .expect("create")
                .with_flush_on(Severity::Critical);
            backend.write(&record(Severity::Error, "[Loader] kept"));
        }
        assert_eq!(fs::read_to_string(&path).expect("read"), "[Loader] kept\n");
    }
}
