//! Physical line reading and unfolding.
//!
//! A physical line that starts with a space or tab continues the previous
//! logical line; exactly that one character is removed. Legacy
//! quoted-printable values may also continue with a trailing `=` and no
//! indent at all.

use std::io::{self, BufRead};

use encoding_rs::Encoding;

use crate::vcard::codec::charset;

/// One unfolded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Physical line number (1-based) at which the logical line began.
    pub line_number: usize,
    pub text: String,
}

/// Forward-only iterator of logical lines over a byte stream.
///
/// Physical lines may end in `\r\n`, `\n` or a lone `\r`. Empty physical
/// lines are skipped and never end a logical line.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    encoding: &'static Encoding,
    /// Physical lines consumed so far.
    line_number: usize,
    /// A `\r` ended the last physical line; a following `\n` belongs to it.
    skip_lf: bool,
    peeked: Option<(usize, String)>,
}

impl<R: BufRead> LineReader<R> {
    /// Creates a reader decoding the stream as UTF-8.
    pub fn new(inner: R) -> Self {
        Self::with_encoding(inner, encoding_rs::UTF_8)
    }

    /// Creates a reader for an ASCII-compatible stream charset.
    pub fn with_encoding(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            encoding,
            line_number: 0,
            skip_lf: false,
            peeked: None,
        }
    }

    /// Number of physical lines consumed so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Releases the wrapped stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_physical_bytes(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut saw_any = false;
        loop {
            let available = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                self.skip_lf = false;
                return Ok(saw_any.then_some(line));
            }
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.inner.consume(1);
                    continue;
                }
            }
            saw_any = true;
            match available.iter().position(|b| matches!(b, b'\r' | b'\n')) {
                Some(pos) => {
                    let terminator = available[pos];
                    line.extend_from_slice(&available[..pos]);
                    self.inner.consume(pos + 1);
                    self.skip_lf = terminator == b'\r';
                    return Ok(Some(line));
                }
                None => {
                    let len = available.len();
                    line.extend_from_slice(available);
                    self.inner.consume(len);
                }
            }
        }
    }

    /// Next non-empty physical line with its number.
    fn next_physical(&mut self) -> io::Result<Option<(usize, String)>> {
        if let Some(peeked) = self.peeked.take() {
            return Ok(Some(peeked));
        }
        while let Some(bytes) = self.read_physical_bytes()? {
            self.line_number += 1;
            let bytes = if self.line_number == 1 {
                bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes)
            } else {
                &bytes[..]
            };
            if bytes.is_empty() {
                continue;
            }
            let text = charset::decode(bytes, self.encoding);
            tracing::trace!(line = self.line_number, "read physical line");
            return Ok(Some((self.line_number, text)));
        }
        Ok(None)
    }

    /// Reads the next logical line, or `None` at end of stream.
    ///
    /// ## Errors
    /// Returns any I/O error from the underlying stream.
    pub fn read_logical(&mut self) -> io::Result<Option<LogicalLine>> {
        let Some((line_number, mut text)) = self.next_physical()? else {
            return Ok(None);
        };

        loop {
            let qp_soft_break = text.ends_with('=') && declares_quoted_printable(&text);
            let Some((next_number, next)) = self.next_physical()? else {
                break;
            };
            if qp_soft_break {
                text.pop();
                text.push_str(next.strip_prefix([' ', '\t']).unwrap_or(next.as_str()));
            } else if let Some(rest) = next.strip_prefix([' ', '\t']) {
                text.push_str(rest);
            } else {
                self.peeked = Some((next_number, next));
                break;
            }
        }

        Ok(Some(LogicalLine { line_number, text }))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_logical().transpose()
    }
}

/// Whether `QUOTED-PRINTABLE` appears left of the value delimiter.
fn declares_quoted_printable(text: &str) -> bool {
    text.split_once(':').is_some_and(|(head, _)| {
        head.to_ascii_uppercase().contains("QUOTED-PRINTABLE")
    })
}

/// Unfolds a complete document held in memory.
///
/// ## Errors
/// Never fails for in-memory input; the `Result` mirrors [`LineReader`].
pub fn unfold(input: &str) -> io::Result<Vec<LogicalLine>> {
    LineReader::new(input.as_bytes()).collect()
}
