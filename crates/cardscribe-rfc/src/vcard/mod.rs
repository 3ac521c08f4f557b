//! vCard 2.1 / 3.0 / 4.0 (versit, RFC 2426, RFC 6350).
//!
//! - [`parse`] - Unfolding, line parsing and the streaming [`VCardReader`]
//! - [`build`] - Folding and the streaming [`VCardWriter`]
//! - [`codec`] - Escaping, quoted-printable and charsets
//! - [`core`] - Document, property, parameter and version types
//! - [`scribe`] - Per-property value marshalling
//!
//! ## Example
//!
//! ```rust
//! use cardscribe_rfc::vcard::{VCardVersion, parse, write_to_string};
//!
//! let parsed = parse("BEGIN:VCARD\r\nVERSION:2.1\r\nN:Doe;John\r\nFN:John Doe\r\nEND:VCARD\r\n");
//! let text = write_to_string(&parsed.cards, VCardVersion::V4_0).unwrap();
//! assert!(text.contains("\r\nVERSION:4.0\r\n"));
//! assert!(text.contains("\r\nN:Doe;John;;;\r\n"));
//! ```

pub mod build;
pub mod codec;
pub mod core;
pub mod parse;
pub mod scribe;

#[cfg(test)]
mod tests;

pub use build::{FoldingScheme, VCardWriter, WriterOptions, write_to_string};
pub use self::core::{
    VCard, VCardParameters, VCardProperty, VCardValue, VCardVersion, Warning, WarningCode,
};
pub use parse::{ParsedVCards, ReaderOptions, VCardReader, parse};
pub use scribe::{Scribe, ScribeIndex, ScribeOutcome};
