//! crates/logging-sink/src/layout.rs
//! Pattern layouts that turn a [`Record`] into an output line.
//!
//! Patterns use `%`-prefixed flags:
//!
//! | Flag | Expands to |
//! |------|------------|
//! | `%Y` `%m` `%d` | local date (year, month, day) |
//! | `%H` `%M` `%S` | local time (hour, minute, second) |
//! | `%e` | milliseconds, zero padded to three digits |
//! | `%l` | severity name |
//! | `%n` | category display name |
//! | `%s` | source file name |
//! | `%g` | full source path |
//! | `%#` | source line |
//! | `%!` | enclosing function, empty when unknown |
//! | `%v` | rendered message |
//! | `%%` | a literal `%` |
//!
//! Unknown flags are copied through verbatim.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

use crate::record::Record;

/// Pattern used when the configuration does not name one.
pub const DEFAULT_PATTERN: &str = "[%Y-%m-%d %H:%M:%S.%e] [%l] [%s:%#] %v";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Piece {
    Literal(String),
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millis,
    Level,
    Category,
    FileName,
    FilePath,
    Line,
    Function,
    Message,
}

impl Piece {
    const fn needs_clock(&self) -> bool {
        matches!(
            self,
            Self::Year | Self::Month | Self::Day | Self::Hour | Self::Minute | Self::Second | Self::Millis
        )
    }

    const fn from_flag(flag: char) -> Option<Self> {
        Some(match flag {
            'Y' => Self::Year,
            'm' => Self::Month,
            'd' => Self::Day,
            'H' => Self::Hour,
            'M' => Self::Minute,
            'S' => Self::Second,
            'e' => Self::Millis,
            'l' => Self::Level,
            'n' => Self::Category,
            's' => Self::FileName,
            'g' => Self::FilePath,
            '#' => Self::Line,
            '!' => Self::Function,
            'v' => Self::Message,
            _ => return None,
        })
    }
}

/// A compiled pattern.
///
/// # Examples
///
/// ```
/// use logging_sink::{Layout, Record, Severity, SourceLocation};
///
/// let layout = Layout::new("%l|%s:%#|%v");
/// let location = SourceLocation::new("src/net/socket.rs", 17, 1);
/// let record = Record::new("Fabric", Severity::Warn, location, "[Fabric] link down");
///
/// let mut line = String::new();
/// layout.format(&record, &mut line);
/// assert_eq!(line, "warning|socket.rs:17|[Fabric] link down");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    pattern: String,
    pieces: Vec<Piece>,
    needs_clock: bool,
}

impl Layout {
    /// Compiles `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let pieces = compile(&pattern);
        let needs_clock = pieces.iter().any(Piece::needs_clock);
        Self {
            pattern,
            pieces,
            needs_clock,
        }
    }

    /// A layout that prints only the rendered message.
    #[must_use]
    pub fn message_only() -> Self {
        Self::new("%v")
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Appends the formatted record to `out`, reading the clock only when the
    /// pattern contains a date or time flag.
    pub fn format(&self, record: &Record<'_>, out: &mut String) {
        if self.needs_clock {
            self.render(record, Some(&Local::now()), out);
        } else {
            self.render::<Local>(record, None, out);
        }
    }

    /// Appends the formatted record to `out` using an explicit timestamp.
    pub fn format_at<Tz: TimeZone>(&self, record: &Record<'_>, now: &DateTime<Tz>, out: &mut String) {
        self.render(record, Some(now), out);
    }

    fn render<Tz: TimeZone>(&self, record: &Record<'_>, now: Option<&DateTime<Tz>>, out: &mut String) {
        let location = record.location();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Level => out.push_str(record.severity().as_str()),
                Piece::Category => out.push_str(record.category()),
                Piece::FileName => out.push_str(location.file_name()),
                Piece::FilePath => out.push_str(location.file()),
                Piece::Line => {
                    let _ = write!(out, "{}", location.line());
                }
                Piece::Function => out.push_str(location.function().unwrap_or_default()),
                Piece::Message => out.push_str(record.message()),
                clock => {
                    if let Some(now) = now {
                        write_clock(clock, now, out);
                    }
                }
            }
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

fn write_clock<Tz: TimeZone>(piece: &Piece, now: &DateTime<Tz>, out: &mut String) {
    let _ = match piece {
        Piece::Year => write!(out, "{:04}", now.year()),
        Piece::Month => write!(out, "{:02}", now.month()),
        Piece::Day => write!(out, "{:02}", now.day()),
        Piece::Hour => write!(out, "{:02}", now.hour()),
        Piece::Minute => write!(out, "{:02}", now.minute()),
        Piece::Second => write!(out, "{:02}", now.second()),
        Piece::Millis => write!(out, "{:03}", now.timestamp_subsec_millis() % 1000),
        _ => Ok(()),
    };
}

fn compile(pattern: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            literal.push(ch);
            continue;
        }
        match chars.next() {
            Some('%') | None => literal.push('%'),
            Some(flag) => match Piece::from_flag(flag) {
                Some(piece) => {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(piece);
                }
                None => {
                    literal.push('%');
                    literal.push(flag);
                }
            },
        }
    }

    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    pieces
}
