//! Recoverable diagnostics collected while reading or writing.

use std::fmt;

/// Classifies a [`Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// A line is not a property, `BEGIN`, `END` or `VERSION` line.
    InvalidLine,
    /// `VERSION` holds an unrecognized value.
    UnknownVersion,
    /// No `VERSION` property in a component.
    MissingVersion,
    /// `VERSION` is not the first property of its component.
    MisplacedVersion,
    /// A scribe asked for the property to be left out.
    PropertySkipped,
    /// A scribe could not interpret the value; it was kept raw.
    UnparseableValue,
    /// A quoted-printable escape could not be decoded.
    QuotedPrintable,
    /// A `CHARSET` parameter names an unknown character set.
    UnknownCharset,
    /// A parameter holds a malformed value.
    InvalidParameter,
    /// A property cannot be written in the target version.
    UnsupportedVersion,
    /// A component ended without `END:VCARD`.
    UnterminatedComponent,
    /// `END:VCARD` without an open component.
    UnmatchedEnd,
    /// A value was altered so it could be written.
    ValueAltered,
}

impl WarningCode {
    /// Returns the stable numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::InvalidLine => 1,
            Self::UnknownVersion => 2,
            Self::MissingVersion => 3,
            Self::MisplacedVersion => 4,
            Self::PropertySkipped => 5,
            Self::UnparseableValue => 6,
            Self::QuotedPrintable => 7,
            Self::UnknownCharset => 8,
            Self::InvalidParameter => 9,
            Self::UnsupportedVersion => 10,
            Self::UnterminatedComponent => 11,
            Self::UnmatchedEnd => 12,
            Self::ValueAltered => 13,
        }
    }
}

/// A recoverable problem found during one read or write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// 1-based physical line where the offending logical line began.
    pub line_number: Option<usize>,
    pub property_name: Option<String>,
    pub code: Option<WarningCode>,
    pub message: String,
}

impl Warning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            line_number: None,
            property_name: None,
            code: Some(code),
            message: message.into(),
        }
    }

    /// A free-form warning without a code, as emitted by scribes.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            line_number: None,
            property_name: None,
            code: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    #[must_use]
    pub fn for_property(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line_number {
            write!(f, "line {line}: ")?;
        }
        if let Some(name) = &self.property_name {
            write!(f, "{name}: ")?;
        }
        if let Some(code) = self.code {
            write!(f, "({}) ", code.as_u16())?;
        }
        f.write_str(&self.message)
    }
}

/// Ordered warning accumulator scoped to one operation.
///
/// Passed by `&mut` through the pipeline. Line and property context set with
/// [`Warnings::set_context`] is stamped onto warnings that lack it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    items: Vec<Warning>,
    line_number: Option<usize>,
    property_name: Option<String>,
}

impl Warnings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the line/property attached to subsequently pushed warnings.
    pub fn set_context(&mut self, line_number: Option<usize>, property_name: Option<&str>) {
        self.line_number = line_number;
        self.property_name = property_name.map(str::to_string);
    }

    pub fn clear_context(&mut self) {
        self.line_number = None;
        self.property_name = None;
    }

    pub fn push(&mut self, mut warning: Warning) {
        if warning.line_number.is_none() {
            warning.line_number = self.line_number;
        }
        if warning.property_name.is_none() {
            warning.property_name.clone_from(&self.property_name);
        }
        tracing::warn!(%warning, "vCard warning");
        self.items.push(warning);
    }

    pub fn warn(&mut self, code: WarningCode, message: impl Into<String>) {
        self.push(Warning::new(code, message));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Warning] {
        &self.items
    }

    /// Removes and returns everything collected so far.
    pub fn take(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.items)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.items.iter()
    }
}

impl IntoIterator for Warnings {
    type Item = Warning;
    type IntoIter = std::vec::IntoIter<Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
