#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is the filtering and dispatch half of catlog. Every statement is
//! tagged with a [`Category`] and a [`Severity`]; a [`FilterState`] decides in
//! two atomic loads whether it is emitted, and accepted statements are
//! rendered as `"[<Category>] <message>"` and handed to a
//! [`Backend`](logging_sink::Backend).
//!
//! # Design
//!
//! - [`Category`] is a closed, densely numbered set with `Always` at index 0.
//!   Names are generated from the same list as the enum.
//! - [`FilterState`] holds a 64-bit category mask and a minimum severity in
//!   atomics, so it can be read from any thread and adjusted at runtime.
//! - [`Logger`] pairs a filter with a backend. Loggers are ordinary values;
//!   the process-wide one lives behind [`init`], [`init_with`] and [`global`].
//! - [`LoggerConfig`] reads `CATLOG_LEVEL`, `CATLOG_TYPES` and `CATLOG_FILE`.
//! - The `log_*!` macros capture the call site (file, line, column and
//!   enclosing function) and skip argument evaluation for filtered
//!   statements.
//!
//! # Invariants
//!
//! - A statement is emitted iff its category is enabled and its severity is
//!   at or above the minimum.
//! - `Always` is enabled under every category selection.
//! - Raw category values outside the declared set are emitted only when every
//!   category is enabled, and are tagged `UnknownType`.
//!
//! # Errors
//!
//! Building a logger fails with [`BackendError`] when its log file cannot be
//! created. The global initializers treat that as fatal and abort. Runtime
//! [`Template`] mismatches surface as [`TemplateError`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{log_to, CategorySelection, FilterState, LevelFilter, Logger, MemoryBackend};
//!
//! let memory = Arc::new(MemoryBackend::new());
//! let selection = CategorySelection::from_allow_list(Some("Device"));
//! let logger = Logger::new(FilterState::new(&selection, LevelFilter::Info), Arc::clone(&memory));
//!
//! log_to!(&logger, Info, Device, "opened device {}", 0);
//! log_to!(&logger, Info, Op, "filtered out");
//! log_to!(&logger, Info, Always, "always shown");
//!
//! assert_eq!(
//!     memory.messages(),
//!     vec!["[Device] opened device 0".to_owned(), "[Always] always shown".to_owned()]
//! );
//! ```

mod category;
mod config;
mod filter;
mod global;
mod levels;
mod logger;
mod macros;
mod template;

pub use category::{
    Category, MAX_CATEGORIES, UNKNOWN_CATEGORY_NAME, count, index_of, name_of, name_of_index,
};
pub use config::{
    ALL_TOKEN, CategorySelection, DEFAULT_FILE_VAR, DEFAULT_LEVEL_VAR, DEFAULT_TYPES_VAR, EnvKeys,
    LoggerConfig,
};
pub use filter::FilterState;
pub use global::{flush, global, init, init_with, is_initialized, set_min_severity, try_global};
pub use levels::{LevelFilter, ParseLevelError};
pub use logger::Logger;
#[doc(hidden)]
pub use macros::__trim_function_name;
pub use template::{Template, TemplateError, render};

pub use logging_sink::{
    Backend, BackendError, CapturedRecord, ConsoleBackend, ConsoleStream, DEFAULT_PATTERN,
    Destination, FileBackend, Layout, LineMode, MemoryBackend, ParseSeverityError, Record,
    Severity, SourceLocation, TRACING_TARGET, TracingBackend,
};
