//! vCard content line errors.

use std::fmt;

use crate::vcard::core::{Warning, WarningCode};

/// Result type for content line parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// A logical line that is not a `[group.]name[;params]:value` line.
///
/// Never fatal: the reader turns it into a [`WarningCode::InvalidLine`]
/// warning and moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Line number where the logical line began (1-based).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates a missing value delimiter error.
    #[must_use]
    pub fn missing_delimiter(line: usize, text: &str) -> Self {
        Self::new(
            ParseErrorKind::MissingValueDelimiter,
            line,
            format!("no ':' in line {:?}", truncate(text)),
        )
    }

    /// Creates an invalid name error.
    #[must_use]
    pub fn invalid_name(line: usize, name: &str) -> Self {
        let kind = if name.is_empty() {
            ParseErrorKind::EmptyName
        } else {
            ParseErrorKind::InvalidName
        };
        Self::new(kind, line, format!("invalid property name {name:?}"))
    }

    /// Converts into the warning recorded by the reader.
    #[must_use]
    pub fn to_warning(&self) -> Warning {
        Warning::new(WarningCode::InvalidLine, format!("{}: {}", self.kind, self.message))
            .at_line(self.line)
    }
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(40) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Why a line is not a valid property line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No `:` separates the name and parameters from the value.
    MissingValueDelimiter,
    EmptyName,
    /// The group or name holds characters other than `A-Z a-z 0-9 - _`.
    InvalidName,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValueDelimiter => write!(f, "missing value delimiter"),
            Self::EmptyName => write!(f, "empty property name"),
            Self::InvalidName => write!(f, "invalid property name"),
        }
    }
}
