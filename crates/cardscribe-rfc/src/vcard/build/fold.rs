//! vCard line folding.
//!
//! [`FoldedLineWriter`] tracks the column of the current physical line
//! across `write` calls and breaks the line before a character that would
//! push it past the limit. Quoted-printable values fold only between whole
//! `=XX` triplets, using the legacy soft break (`=`, newline, then the usual indent).

use std::io;

use cardscribe_core::config::FoldUnit;
use cardscribe_core::constants::{CRLF, DEFAULT_FOLD_INDENT, DEFAULT_MAX_LINE_LENGTH};
use encoding_rs::Encoding;

use crate::vcard::codec::{charset, quoted_printable};

/// What a line length is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// UTF-8 octets, as RFC 6350 counts them.
    Utf8Bytes,
}

impl LengthUnit {
    #[must_use]
    pub fn measure(self, text: &str) -> usize {
        match self {
            Self::Chars => text.chars().count(),
            Self::Utf8Bytes => text.len(),
        }
    }
}

impl From<FoldUnit> for LengthUnit {
    fn from(unit: FoldUnit) -> Self {
        match unit {
            FoldUnit::Chars => Self::Chars,
            FoldUnit::Utf8Bytes => Self::Utf8Bytes,
        }
    }
}

/// How output lines are folded and terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldingScheme {
    /// Longest physical line, indent included. `None` never folds.
    pub max_line_length: Option<usize>,
    /// Written at the start of each continuation line.
    pub indent: String,
    pub newline: String,
    pub unit: LengthUnit,
}

impl Default for FoldingScheme {
    fn default() -> Self {
        Self {
            max_line_length: Some(DEFAULT_MAX_LINE_LENGTH),
            indent: DEFAULT_FOLD_INDENT.to_string(),
            newline: CRLF.to_string(),
            unit: LengthUnit::Chars,
        }
    }
}

impl FoldingScheme {
    /// A scheme that never folds.
    #[must_use]
    pub fn unfolded() -> Self {
        Self {
            max_line_length: None,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = Some(max_line_length);
        self
    }
}

/// Writes content lines, folding them per a [`FoldingScheme`].
///
/// Every physical line carries at least one unit of content, so a limit
/// smaller than the indent plus one character still makes progress.
#[derive(Debug)]
pub struct FoldedLineWriter<W> {
    inner: W,
    scheme: FoldingScheme,
    /// Width of the current physical line, indent included.
    column: usize,
    /// Whether the current physical line holds anything besides indent.
    has_content: bool,
}

impl<W: io::Write> FoldedLineWriter<W> {
    pub fn new(inner: W, scheme: FoldingScheme) -> Self {
        Self {
            inner,
            scheme,
            column: 0,
            has_content: false,
        }
    }

    #[must_use]
    pub fn scheme(&self) -> &FoldingScheme {
        &self.scheme
    }

    /// Current column of the physical line being written.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Appends text to the current logical line.
    ///
    /// ## Errors
    /// Returns any error from the underlying writer.
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        let mut buf = [0u8; 4];
        for c in text.chars() {
            let atom: &str = c.encode_utf8(&mut buf);
            let width = self.scheme.unit.measure(atom);
            if self.overflows(width) {
                self.fold()?;
            }
            self.put(atom, width)?;
        }
        Ok(())
    }

    /// Appends a value as quoted-printable in the given charset.
    ///
    /// Folds with soft breaks between encoded atoms; one column is kept free
    /// for the trailing `=`.
    ///
    /// ## Errors
    /// Returns any error from the underlying writer.
    pub fn write_quoted_printable(
        &mut self,
        text: &str,
        encoding: &'static Encoding,
    ) -> io::Result<()> {
        let encoded = quoted_printable::encode(&charset::encode(text, encoding));
        for atom in quoted_printable::atoms(&encoded) {
            let width = self.scheme.unit.measure(atom);
            if self.overflows(width + 1) {
                self.inner.write_all(b"=")?;
                self.fold()?;
            }
            self.put(atom, width)?;
        }
        Ok(())
    }

    /// Terminates the current logical line.
    ///
    /// ## Errors
    /// Returns any error from the underlying writer.
    pub fn end_line(&mut self) -> io::Result<()> {
        self.inner.write_all(self.scheme.newline.as_bytes())?;
        self.column = 0;
        self.has_content = false;
        Ok(())
    }

    /// ## Errors
    /// Returns any error from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Releases the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn overflows(&self, width: usize) -> bool {
        self.scheme
            .max_line_length
            .is_some_and(|max| self.has_content && self.column + width > max)
    }

    fn fold(&mut self) -> io::Result<()> {
        self.inner.write_all(self.scheme.newline.as_bytes())?;
        self.inner.write_all(self.scheme.indent.as_bytes())?;
        self.column = self.scheme.unit.measure(&self.scheme.indent);
        self.has_content = false;
        Ok(())
    }

    fn put(&mut self, atom: &str, width: usize) -> io::Result<()> {
        self.inner.write_all(atom.as_bytes())?;
        self.column += width;
        self.has_content = true;
        Ok(())
    }
}
