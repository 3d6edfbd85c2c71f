//! crates/logging-sink/src/record.rs
//! Source locations and the record handed to backends.

use std::fmt;
use std::panic::Location;

use crate::severity::Severity;

/// Call-site location of a log statement.
///
/// Locations are captured implicitly: [`SourceLocation::caller`] relies on
/// `#[track_caller]`, and the `logging` macros additionally record the
/// enclosing function.
///
/// # Examples
///
/// ```
/// use logging_sink::SourceLocation;
///
/// let location = SourceLocation::new("src/device/open.rs", 42, 9).with_function("device::open");
///
/// assert_eq!(location.file_name(), "open.rs");
/// assert_eq!(location.to_string(), "src/device/open.rs:42");
/// assert_eq!(location.function(), Some("device::open"));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
    column: u32,
    function: Option<&'static str>,
}

impl SourceLocation {
    /// Creates a location without a function name.
    #[must_use]
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Self {
            file,
            line,
            column,
            function: None,
        }
    }

    /// Captures the location of the caller.
    ///
    /// Functions annotated with `#[track_caller]` propagate their own caller,
    /// so the captured location is that of the outermost untracked frame.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Attaches the name of the enclosing function.
    #[must_use]
    pub const fn with_function(mut self, function: &'static str) -> Self {
        self.function = Some(function);
        self
    }

    /// Returns the source path as reported by the compiler.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Returns the final path component of [`file`](Self::file).
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }

    /// Returns the 1-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the 1-based column number.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the enclosing function, when the call site recorded it.
    #[must_use]
    pub const fn function(&self) -> Option<&'static str> {
        self.function
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line(), location.column())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// An accepted log statement on its way to a [`Backend`](crate::Backend).
///
/// The message is fully rendered, category prefix included, before the
/// record is built. Records borrow everything and live for a single
/// [`Backend::write`](crate::Backend::write) call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Record<'a> {
    category: &'a str,
    severity: Severity,
    location: SourceLocation,
    message: &'a str,
}

impl<'a> Record<'a> {
    /// Assembles a record from its parts.
    #[must_use]
    pub const fn new(
        category: &'a str,
        severity: Severity,
        location: SourceLocation,
        message: &'a str,
    ) -> Self {
        Self {
            category,
            severity,
            location,
            message,
        }
    }

    /// Display name of the record's category.
    #[must_use]
    pub const fn category(&self) -> &'a str {
        self.category
    }

    /// Severity the statement was logged at.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Where the statement was written.
    #[must_use]
    pub const fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The rendered message, e.g. `"[Device] connection opened"`.
    #[must_use]
    pub const fn message(&self) -> &'a str {
        self.message
    }
}
