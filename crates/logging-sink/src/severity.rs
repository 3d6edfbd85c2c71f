//! crates/logging-sink/src/severity.rs
//! Ordered severity levels attached to every record.

use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from least to most severe.
///
/// The discriminants are dense and stable so the filter can keep its
/// threshold in a single atomic byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Severity {
    /// Fine-grained tracing output.
    Trace = 0,
    /// Debugging output.
    Debug = 1,
    /// Informational output.
    Info = 2,
    /// Something unexpected that the caller recovered from.
    Warn = 3,
    /// An operation failed.
    Error = 4,
    /// The application cannot continue normally.
    Critical = 5,
}

impl Severity {
    /// Every severity in ascending order.
    pub const ALL: [Self; 6] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Critical,
    ];

    /// Returns the level name printed by layouts (`%l`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// Returns the numeric rank of the severity.
    #[inline(always)]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a numeric rank back into a severity.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Trace),
            1 => Some(Self::Debug),
            2 => Some(Self::Info),
            3 => Some(Self::Warn),
            4 => Some(Self::Error),
            5 => Some(Self::Critical),
            _ => None,
        }
    }

    /// Parses a level name, ignoring ASCII case and surrounding whitespace.
    ///
    /// Accepts the canonical names plus the aliases `warning`, `err` and
    /// `fatal` (which maps to [`Severity::Critical`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::Severity;
    ///
    /// assert_eq!(Severity::parse("WARNING"), Some(Severity::Warn));
    /// assert_eq!(Severity::parse(" fatal "), Some(Severity::Critical));
    /// assert_eq!(Severity::parse("loud"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "err" => Some(Self::Error),
            "critical" | "fatal" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Severity`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unrecognised severity '{0}'")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseSeverityError(s.to_owned()))
    }
}
