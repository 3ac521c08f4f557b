//! Character set resolution for `CHARSET` parameters and input streams.

use encoding_rs::Encoding;

use crate::vcard::core::{WarningCode, Warnings};

/// Looks up an encoding by its WHATWG label (`utf-8`, `iso-8859-1`, ...).
#[must_use]
pub fn lookup(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Resolves a `CHARSET` parameter, falling back to `default`.
///
/// An unknown label yields `default` and a [`WarningCode::UnknownCharset`]
/// warning.
pub fn resolve(
    label: Option<&str>,
    default: &'static Encoding,
    warnings: &mut Warnings,
) -> &'static Encoding {
    let Some(label) = label else {
        return default;
    };
    lookup(label).unwrap_or_else(|| {
        warnings.warn(
            WarningCode::UnknownCharset,
            format!(
                "unknown charset {label:?}, using {}",
                default.name()
            ),
        );
        default
    })
}

/// Decodes bytes; malformed sequences become U+FFFD.
#[must_use]
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Encodes text; characters the encoding lacks become numeric references.
#[must_use]
pub fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, _) = encoding.encode(text);
    bytes.into_owned()
}
