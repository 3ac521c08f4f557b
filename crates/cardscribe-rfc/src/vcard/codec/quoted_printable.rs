//! Quoted-printable encoding for legacy 2.1 values.
//!
//! Soft line breaks never reach this module: the line reader removes them
//! while unfolding, and the folding writer inserts them.

use std::fmt::Write as _;

use crate::vcard::core::{WarningCode, Warnings};

/// Decodes quoted-printable text into raw bytes.
///
/// A malformed `=` escape is passed through literally with a
/// [`WarningCode::QuotedPrintable`] warning.
pub fn decode(text: &str, warnings: &mut Warnings) -> Vec<u8> {
    let bytes = text.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte != b'=' {
            result.push(byte);
            i += 1;
            continue;
        }
        match bytes.get(i + 1..i + 3).and_then(hex_byte) {
            Some(decoded) => {
                result.push(decoded);
                i += 3;
            }
            None => {
                let end = (i + 3).min(bytes.len());
                warnings.warn(
                    WarningCode::QuotedPrintable,
                    format!(
                        "malformed quoted-printable escape {:?}",
                        String::from_utf8_lossy(&bytes[i..end])
                    ),
                );
                result.push(byte);
                i += 1;
            }
        }
    }

    result
}

fn hex_byte(pair: &[u8]) -> Option<u8> {
    let text = std::str::from_utf8(pair).ok()?;
    u8::from_str_radix(text, 16).ok()
}

/// Encodes bytes as quoted-printable.
///
/// Printable ASCII other than `=` is written literally. A trailing space or
/// tab is encoded so it survives line-end trimming.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len());

    for (i, byte) in bytes.iter().enumerate() {
        let last = i + 1 == bytes.len();
        match byte {
            b'!'..=b'<' | b'>'..=b'~' => result.push(char::from(*byte)),
            b' ' | b'\t' if !last => result.push(char::from(*byte)),
            _ => {
                write!(result, "={byte:02X}").ok();
            }
        }
    }

    result
}

/// Splits encoded text into atoms that must not be broken by folding:
/// a single literal character or a whole `=XX` triplet.
pub fn atoms(encoded: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = encoded;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let len = if first == '=' && rest.len() >= 3 && rest.is_char_boundary(3) {
            3
        } else {
            first.len_utf8()
        };
        let (atom, tail) = rest.split_at(len);
        rest = tail;
        Some(atom)
    })
}
