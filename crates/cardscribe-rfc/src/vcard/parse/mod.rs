//! vCard parsing (2.1, 3.0 and 4.0).
//!
//! ## Usage
//!
//! ```rust
//! use cardscribe_rfc::vcard::parse;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:John Doe\r\n\
//! EMAIL:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let parsed = parse::parse(input);
//! assert_eq!(parsed.cards[0].formatted_name(), Some("John Doe"));
//! ```
//!
//! ## Stages
//!
//! - [`LineReader`] unfolds physical lines into logical lines
//! - [`parse_line`] splits a logical line into group, name, parameters and value
//! - [`VCardReader`] tracks nesting, decodes quoted-printable and dispatches
//!   each value to its scribe

mod error;
mod lexer;
mod line;
mod reader;


pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{LineReader, LogicalLine, unfold};
pub use line::{RawLine, parse_line};
pub use reader::{ParsedVCards, ReaderOptions, VCardReader, parse, parse_with};
