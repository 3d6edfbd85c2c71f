//! crates/logging/src/levels.rs
//! Minimum-severity thresholds, including the `off` setting.

use std::fmt;
use std::str::FromStr;

use logging_sink::Severity;

/// Minimum severity a record needs to pass the filter.
///
/// Each variant except [`LevelFilter::Off`] shares its rank with the
/// [`Severity`] of the same name, so a record passes when
/// `severity as u8 >= filter as u8`. `Off` ranks above every severity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum LevelFilter {
    /// Accept everything.
    Trace = 0,
    /// Accept `debug` and above.
    Debug = 1,
    /// Accept `info` and above.
    #[default]
    Info = 2,
    /// Accept `warn` and above.
    Warn = 3,
    /// Accept `error` and above.
    Error = 4,
    /// Accept `critical` only.
    Critical = 5,
    /// Reject everything.
    Off = 6,
}

impl LevelFilter {
    /// Every filter from most to least permissive.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Critical,
        Self::Off,
    ];

    /// Returns the numeric rank of the filter.
    #[inline(always)]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a rank back into a filter; ranks past `critical` mean `off`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Trace,
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            5 => Self::Critical,
            _ => Self::Off,
        }
    }

    /// Reports whether a record at `severity` passes this threshold.
    #[inline(always)]
    #[must_use]
    pub const fn allows(self, severity: Severity) -> bool {
        severity.as_u8() >= self.as_u8()
    }

    /// Returns the least severe level that still passes, if any.
    #[must_use]
    pub const fn min_severity(self) -> Option<Severity> {
        Severity::from_u8(self.as_u8())
    }

    /// Returns the configuration spelling of the filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Off => "off",
        }
    }

    /// Parses a level selector, ignoring ASCII case and surrounding whitespace.
    ///
    /// Accepts every [`Severity::parse`] spelling plus `off`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::LevelFilter;
    ///
    /// assert_eq!(LevelFilter::parse("Debug"), Some(LevelFilter::Debug));
    /// assert_eq!(LevelFilter::parse("OFF"), Some(LevelFilter::Off));
    /// assert_eq!(LevelFilter::parse("chatty"), None);
    /// ```
    pub fn parse(selector: &str) -> Option<Self> {
        if selector.trim().eq_ignore_ascii_case("off") {
            return Some(Self::Off);
        }
        Severity::parse(selector).map(Self::from)
    }
}

impl From<Severity> for LevelFilter {
    fn from(severity: Severity) -> Self {
        Self::from_u8(severity.as_u8())
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a valid level selector.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unrecognised log level '{0}'")]
pub struct ParseLevelError(pub String);

impl FromStr for LevelFilter {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}
