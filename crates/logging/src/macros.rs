//! crates/logging/src/macros.rs
//! Call-site macros for logging through the global or an explicit logger.
//!
//! Each severity macro accepts three shapes:
//!
//! ```ignore
//! log_info!(Device, "opened {} in {}ms", id, elapsed); // category + message
//! log_info!(Device);                                    // category tag only
//! log_info!("no category given");                       // Always
//! ```
//!
//! The category is any expression of type [`Category`](crate::Category). Bare
//! variant names such as `Device` resolve without an import. Format strings
//! are checked at compile time, and arguments are evaluated only when the
//! statement passes the filter.

/// Captures the enclosing function's path as a `&'static str`.
///
/// Closures report the function that contains them.
///
/// # Examples
///
/// ```
/// fn current() -> &'static str {
///     logging::function_name!()
/// }
///
/// assert!(current().ends_with("current"));
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __catlog_marker() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::__trim_function_name(__type_name_of(__catlog_marker))
    }};
}

/// Builds a [`SourceLocation`](crate::SourceLocation) for the invocation site.
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::SourceLocation::new(::core::file!(), ::core::line!(), ::core::column!())
            .with_function($crate::function_name!())
    };
}

#[doc(hidden)]
pub fn __trim_function_name(name: &'static str) -> &'static str {
    let mut name = name.strip_suffix("::__catlog_marker").unwrap_or(name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

#[doc(hidden)]
#[macro_export]
macro_rules! __category {
    ($category:expr) => {{
        #[allow(unused_imports, clippy::enum_glob_use)]
        use $crate::Category::*;
        let category: $crate::Category = $category;
        category
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_dispatch {
    (@bare $logger:expr, $severity:expr, $category:expr) => {{
        let logger: &$crate::Logger = $logger;
        let category = $crate::__category!($category);
        if logger.is_enabled(category, $severity) {
            logger.log_at(
                category,
                $severity,
                $crate::source_location!(),
                ::core::option::Option::None,
            );
        }
    }};
    (@fmt $logger:expr, $severity:expr, $category:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = $logger;
        let category = $crate::__category!($category);
        if logger.is_enabled(category, $severity) {
            logger.log_at(
                category,
                $severity,
                $crate::source_location!(),
                ::core::option::Option::Some(::core::format_args!($($arg)+)),
            );
        }
    }};
}

/// Logs through an explicit [`Logger`](crate::Logger).
///
/// Takes the logger, a [`Severity`](crate::Severity) variant name, a category
/// and an optional format string with arguments.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{log_to, Category, FilterState, Logger, MemoryBackend};
///
/// let memory = Arc::new(MemoryBackend::new());
/// let logger = Logger::new(FilterState::accept_all(), Arc::clone(&memory));
/// let link = Category::Fabric;
///
/// log_to!(&logger, Warn, Fabric, "link {} down", 3);
/// log_to!(&logger, Info, link);
///
/// assert_eq!(
///     memory.messages(),
///     vec!["[Fabric] link 3 down".to_owned(), "[Fabric]".to_owned()]
/// );
/// ```
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $severity:ident, $category:expr) => {
        $crate::__log_dispatch!(@bare $logger, $crate::Severity::$severity, $category)
    };
    ($logger:expr, $severity:ident, $category:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!(@fmt $logger, $crate::Severity::$severity, $category, $($arg)+)
    };
}

/// Logs at `trace` through the global logger.
#[macro_export]
macro_rules! log_trace {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Trace, $crate::Category::Always, $fmt $($rest)*)
    };
    ($category:expr) => {
        $crate::__log_dispatch!(@bare $crate::global(), $crate::Severity::Trace, $category)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Trace, $category, $($arg)+)
    };
}

/// Logs at `debug` through the global logger.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Debug, $crate::Category::Always, $fmt $($rest)*)
    };
    ($category:expr) => {
        $crate::__log_dispatch!(@bare $crate::global(), $crate::Severity::Debug, $category)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Debug, $category, $($arg)+)
    };
}

/// Logs at `info` through the global logger.
#[macro_export]
macro_rules! log_info {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Info, $crate::Category::Always, $fmt $($rest)*)
    };
    ($category:expr) => {
        $crate::__log_dispatch!(@bare $crate::global(), $crate::Severity::Info, $category)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Info, $category, $($arg)+)
    };
}

/// Logs at `warn` through the global logger.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Warn, $crate::Category::Always, $fmt $($rest)*)
    };
    ($category:expr) => {
        $crate::__log_dispatch!(@bare $crate::global(), $crate::Severity::Warn, $category)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Warn, $category, $($arg)+)
    };
}

/// Short spelling of [`log_warning!`].
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        $crate::log_warning!($($arg)+)
    };
}

/// Logs at `error` through the global logger.
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Error, $crate::Category::Always, $fmt $($rest)*)
    };
    ($category:expr) => {
        $crate::__log_dispatch!(@bare $crate::global(), $crate::Severity::Error, $category)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Error, $category, $($arg)+)
    };
}

/// Logs at `critical` through the global logger.
#[macro_export]
macro_rules! log_critical {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Critical, $crate::Category::Always, $fmt $($rest)*)
    };
    ($category:expr) => {
        $crate::__log_dispatch!(@bare $crate::global(), $crate::Severity::Critical, $category)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::__log_dispatch!(@fmt $crate::global(), $crate::Severity::Critical, $category, $($arg)+)
    };
}

/// Alias of [`log_critical!`].
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {
        $crate::log_critical!($($arg)+)
    };
}
