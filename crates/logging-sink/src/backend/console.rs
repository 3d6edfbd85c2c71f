//! crates/logging-sink/src/backend/console.rs
//! Console backend writing to stdout or stderr.

use std::io::{self, Write};

use is_terminal::IsTerminal;

use super::{Backend, FailureLatch};
use crate::layout::Layout;
use crate::line_mode::LineMode;
use crate::record::Record;
use crate::severity::Severity;

const RESET: &str = "\x1b[0m";
/// Light sea green, xterm-256 colour 37.
const CATEGORY_STYLE: &str = "\x1b[38;5;37m";

/// Standard stream written by a [`ConsoleBackend`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ConsoleStream {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

impl ConsoleStream {
    fn is_terminal(self) -> bool {
        match self {
            Self::Stdout => io::stdout().is_terminal(),
            Self::Stderr => io::stderr().is_terminal(),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Writes records to a standard stream, colouring the `[Category]` tag when
/// the stream is a terminal.
#[derive(Debug)]
pub struct ConsoleBackend {
    layout: Layout,
    stream: ConsoleStream,
    color: bool,
    flush_on: Severity,
    line_mode: LineMode,
    failure: FailureLatch,
}

impl ConsoleBackend {
    /// Creates a backend writing to standard output.
    #[must_use]
    pub fn stdout(layout: Layout) -> Self {
        Self::with_stream(layout, ConsoleStream::Stdout)
    }

    /// Creates a backend writing to standard error.
    #[must_use]
    pub fn stderr(layout: Layout) -> Self {
        Self::with_stream(layout, ConsoleStream::Stderr)
    }

    fn with_stream(layout: Layout, stream: ConsoleStream) -> Self {
        Self {
            layout,
            stream,
            color: stream.is_terminal(),
            flush_on: Severity::Error,
            line_mode: LineMode::WithNewline,
            failure: FailureLatch::default(),
        }
    }

    /// Forces colouring on or off.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Flushes the stream after every record at or above `severity`.
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

    /// Reports whether ANSI colours are emitted.
    #[must_use]
    pub const fn colored(&self) -> bool {
        self.color
    }

    /// Returns the stream this backend writes to.
    #[must_use]
    pub const fn stream(&self) -> ConsoleStream {
        self.stream
    }

    fn render(&self, record: &Record<'_>) -> String {
        let mut line = String::with_capacity(record.message().len() + 64);
        self.layout.format(record, &mut line);
        if self.color {
            highlight_category(&mut line, record.category());
        }
        self.line_mode.terminate(&mut line);
        line
    }
}

impl Backend for ConsoleBackend {
    fn write(&self, record: &Record<'_>) {
        let line = self.render(record);
        let flush = record.severity() >= self.flush_on;
        let result = match self.stream {
            ConsoleStream::Stdout => emit(io::stdout().lock(), &line, flush),
            ConsoleStream::Stderr => emit(io::stderr().lock(), &line, flush),
        };
        if let Err(error) = result {
            self.failure.report(self.stream.name(), &error);
        }
    }

    fn flush(&self) {
        let result = match self.stream {
            ConsoleStream::Stdout => io::stdout().flush(),
            ConsoleStream::Stderr => io::stderr().flush(),
        };
        if let Err(error) = result {
            self.failure.report(self.stream.name(), &error);
        }
    }
}

fn emit<W: Write>(mut out: W, line: &str, flush: bool) -> io::Result<()> {
    out.write_all(line.as_bytes())?;
    if flush {
        out.flush()?;
    }
    Ok(())
}

/// Wraps the first `[category]` tag in `line` in [`CATEGORY_STYLE`].
fn highlight_category(line: &mut String, category: &str) {
    let tag = format!("[{category}]");
    if let Some(start) = line.find(&tag) {
        line.insert_str(start + tag.len(), RESET);
        line.insert_str(start, CATEGORY_STYLE);
    }
}
