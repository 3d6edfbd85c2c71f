//! crates/logging/src/template.rs
//! Runtime message templates with `{}` and `{N}` placeholders.
//!
//! The macros check their format strings at compile time. This module covers
//! messages whose template is only known at runtime, such as ones loaded from
//! a table, and reports mismatches as [`TemplateError`] instead.

use std::fmt::{self, Display, Write as _};

/// Problems found while parsing or rendering a [`Template`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TemplateError {
    /// A placeholder refers past the supplied arguments.
    #[error("placeholder {index} has no argument ({supplied} supplied)")]
    MissingArgument {
        /// Zero-based argument index the placeholder asked for.
        index: usize,
        /// Number of arguments supplied.
        supplied: usize,
    },
    /// `{` without a matching `}` at the given byte offset.
    #[error("unmatched '{{' at byte {0}")]
    UnmatchedOpenBrace(usize),
    /// `}` that is neither escaped nor closing a placeholder.
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedCloseBrace(usize),
    /// Placeholder contents that are not empty or a decimal index.
    #[error("invalid placeholder '{{{0}}}'")]
    InvalidPlaceholder(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Literal(String),
    Argument(usize),
}

/// A parsed message template.
///
/// `{}` takes the next positional argument, `{N}` takes argument `N`, and
/// `{{` / `}}` produce literal braces. Extra arguments are ignored.
///
/// # Examples
///
/// ```
/// use logging::Template;
///
/// let template = Template::parse("opened {} in {1}ms").unwrap();
/// assert_eq!(template.required_arguments(), 2);
/// assert_eq!(template.render(&[&"device 0", &12]).unwrap(), "opened device 0 in 12ms");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `source`.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut next_positional = 0;
        let mut chars = source.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '{' if chars.next_if(|(_, c)| *c == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|(_, c)| *c == '}').is_some() => literal.push('}'),
                '}' => return Err(TemplateError::UnmatchedCloseBrace(offset)),
                '{' => {
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, c)) => inner.push(c),
                            None => return Err(TemplateError::UnmatchedOpenBrace(offset)),
                        }
                    }
                    let index = if inner.is_empty() {
                        let index = next_positional;
                        next_positional += 1;
                        index
                    } else {
                        inner.parse::<usize>()
                            .map_err(|_| TemplateError::InvalidPlaceholder(inner.clone()))?
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Argument(index));
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Returns how many arguments rendering needs at minimum.
    #[must_use]
    pub fn required_arguments(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Argument(index) => Some(index + 1),
                Segment::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Renders into a new string.
    pub fn render(&self, args: &[&dyn Display]) -> Result<String, TemplateError> {
        let mut out = String::new();
        self.render_into(args, &mut out)?;
        Ok(out)
    }

    /// Renders onto the end of `out`.
    ///
    /// Arguments are checked before anything is written, so `out` is left
    /// untouched on error.
    pub fn render_into(&self, args: &[&dyn Display], out: &mut String) -> Result<(), TemplateError> {
        let required = self.required_arguments();
        if required > args.len() {
            return Err(TemplateError::MissingArgument {
                index: required - 1,
                supplied: args.len(),
            });
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Argument(index) => {
                    // Writing into a String cannot fail.
                    let _ = write!(out, "{}", args[*index]);
                }
            }
        }
        Ok(())
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut positional = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    f.write_str(&text.replace('{', "{{").replace('}', "}}"))?;
                }
                Segment::Argument(index) if *index == positional => {
                    positional += 1;
                    f.write_str("{}")?;
                }
                Segment::Argument(index) => write!(f, "{{{index}}}")?,
            }
        }
        Ok(())
    }
}

/// Parses and renders `template` in one step.
///
/// # Examples
///
/// ```
/// use logging::{render, TemplateError};
///
/// assert_eq!(render("{} + {} = {}", &[&1, &2, &3]).unwrap(), "1 + 2 = 3");
/// assert_eq!(
///     render("{} and {}", &[&1]),
///     Err(TemplateError::MissingArgument { index: 1, supplied: 1 })
/// );
/// ```
pub fn render(template: &str, args: &[&dyn Display]) -> Result<String, TemplateError> {
    Template::parse(template)?.render(args)
}
