//! crates/logging/src/logger.rs
//! The logging context: a filter paired with a backend.

use std::fmt::{self, Display, Write as _};

use logging_sink::{Backend, BackendError, Record, Severity, SourceLocation};

use crate::category::{self, Category};
use crate::config::LoggerConfig;
use crate::filter::FilterState;
use crate::levels::LevelFilter;
use crate::template::Template;

/// A filter and the backend accepted records are handed to.
///
/// Every logging operation takes a `&Logger`, so independent loggers can
/// coexist (one per test, say) alongside the process-wide one managed by
/// [`init`](crate::init) and [`global`](crate::global).
///
/// Messages reach the backend as `"[<Category>] <body>"`. Filtering happens
/// before the body is formatted, so rejected statements cost two atomic
/// loads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{Category, FilterState, LevelFilter, Logger, MemoryBackend};
///
/// let memory = Arc::new(MemoryBackend::new());
/// let logger = Logger::new(FilterState::accept_all(), Arc::clone(&memory));
/// logger.set_min_severity(LevelFilter::Info);
///
/// logger.info(Category::Device, format_args!("opened device {}", 0));
/// logger.debug(Category::Device, format_args!("not shown"));
///
/// assert_eq!(memory.messages(), vec!["[Device] opened device 0".to_owned()]);
/// ```
pub struct Logger {
    filter: FilterState,
    backend: Box<dyn Backend>,
}

impl Logger {
    /// Pairs `filter` with `backend`.
    pub fn new(filter: FilterState, backend: impl Backend + 'static) -> Self {
        Self {
            filter,
            backend: Box::new(backend),
        }
    }

    /// Builds the filter, layout and backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the configured log file cannot be created.
    pub fn from_config(config: &LoggerConfig) -> Result<Self, BackendError> {
        let filter = FilterState::from_config(config);
        let destination = config.destination();
        let backend = destination.open(config.layout())?;
        tracing::debug!(
            ?destination,
            min_severity = %filter.min_severity(),
            categories = ?filter.enabled_categories(),
            "logger configured"
        );
        Ok(Self { filter, backend })
    }

    /// Returns the filter for inspection or runtime adjustment.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Returns the backend records are written to.
    #[must_use]
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Reports whether a statement would be emitted.
    #[inline(always)]
    #[must_use]
    pub fn is_enabled(&self, category: Category, severity: Severity) -> bool {
        self.filter.is_enabled(category, severity)
    }

    /// Replaces the minimum severity.
    pub fn set_min_severity(&self, threshold: impl Into<LevelFilter>) {
        self.filter.set_min_severity(threshold);
    }

    /// Logs a formatted message, capturing the caller's location.
    #[track_caller]
    pub fn log(&self, category: Category, severity: Severity, args: fmt::Arguments<'_>) {
        self.log_at(category, severity, SourceLocation::caller(), Some(args));
    }

    /// Logs just the category tag, rendered as `"[<Category>]"`.
    #[track_caller]
    pub fn log_bare(&self, category: Category, severity: Severity) {
        self.log_at(category, severity, SourceLocation::caller(), None);
    }

    /// Logs under a raw category value.
    ///
    /// Values outside the declared set are tagged `UnknownType` and pass the
    /// category check only when every category is enabled.
    #[track_caller]
    pub fn log_index(&self, index: usize, severity: Severity, args: fmt::Arguments<'_>) {
        if self.filter.is_enabled_index(index, severity) {
            self.emit(
                category::name_of_index(index),
                severity,
                SourceLocation::caller(),
                Some(args),
            );
        }
    }

    /// Logs a message whose template is only known at runtime.
    ///
    /// An empty template with arguments renders an empty body.
    ///
    /// # Panics
    ///
    /// Panics when the template is malformed or needs more arguments than
    /// supplied, as a compile-time format mismatch would have failed to build.
    #[track_caller]
    pub fn log_template(
        &self,
        category: Category,
        severity: Severity,
        template: &str,
        args: &[&dyn Display],
    ) {
        if !self.is_enabled(category, severity) {
            return;
        }
        let body = match Template::parse(template).and_then(|parsed| parsed.render(args)) {
            Ok(body) => body,
            Err(error) => panic!("invalid log template {template:?}: {error}"),
        };
        self.emit(
            category.name(),
            severity,
            SourceLocation::caller(),
            Some(format_args!("{body}")),
        );
    }

    /// Logs at an explicit source location; `None` emits the bare tag.
    ///
    /// This is the entry point used by the `log_*!` macros, which check
    /// [`is_enabled`](Self::is_enabled) before building `args`.
    pub fn log_at(
        &self,
        category: Category,
        severity: Severity,
        location: SourceLocation,
        args: Option<fmt::Arguments<'_>>,
    ) {
        if self.is_enabled(category, severity) {
            self.emit(category.name(), severity, location, args);
        }
    }

    fn emit(
        &self,
        name: &str,
        severity: Severity,
        location: SourceLocation,
        args: Option<fmt::Arguments<'_>>,
    ) {
        let mut message = String::with_capacity(64);
        message.push('[');
        message.push_str(name);
        message.push(']');
        if let Some(args) = args {
            message.push(' ');
            if let Err(error) = message.write_fmt(args) {
                panic!("formatting a log message failed: {error}");
            }
        }
        self.backend
            .write(&Record::new(name, severity, location, &message));
    }

    /// Logs at `trace`.
    #[track_caller]
    pub fn trace(&self, category: Category, args: fmt::Arguments<'_>) {
        self.log(category, Severity::Trace, args);
    }

    /// Logs at `debug`.
    #[track_caller]
    pub fn debug(&self, category: Category, args: fmt::Arguments<'_>) {
        self.log(category, Severity::Debug, args);
    }

    /// Logs at `info`.
    #[track_caller]
    pub fn info(&self, category: Category, args: fmt::Arguments<'_>) {
        self.log(category, Severity::Info, args);
    }

    /// Logs at `warn`.
    #[track_caller]
    pub fn warn(&self, category: Category, args: fmt::Arguments<'_>) {
        self.log(category, Severity::Warn, args);
    }

    /// Logs at `error`.
    #[track_caller]
    pub fn error(&self, category: Category, args: fmt::Arguments<'_>) {
        self.log(category, Severity::Error, args);
    }

    /// Logs at `critical`.
    #[track_caller]
    pub fn critical(&self, category: Category, args: fmt::Arguments<'_>) {
        self.log(category, Severity::Critical, args);
    }

    /// Alias of [`critical`](Self::critical).
    #[track_caller]
    pub fn fatal(&self, category: Category, args: fmt::Arguments<'_>) {
        self.log(category, Severity::Critical, args);
    }

    /// Flushes the backend.
    pub fn flush(&self) {
        self.backend.flush();
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.backend.flush();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
