//! crates/logging-sink/src/line_mode.rs
//! Newline handling for writer-backed backends.

/// Controls whether a writer-backed backend terminates each record with a newline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Append a newline terminator after each formatted record.
    #[default]
    WithNewline,
    /// Emit the formatted record without a trailing newline.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode appends a trailing newline when writing a record.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert!(LineMode::WithNewline.append_newline());
    /// assert!(!LineMode::WithoutNewline.append_newline());
    /// ```
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }

    pub(crate) fn terminate(self, line: &mut String) {
        if self.append_newline() {
            line.push('\n');
        }
    }
}

impl From<bool> for LineMode {
    /// `true` maps to [`LineMode::WithNewline`], `false` to [`LineMode::WithoutNewline`].
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

impl From<LineMode> for bool {
    fn from(mode: LineMode) -> Self {
        mode.append_newline()
    }
}
