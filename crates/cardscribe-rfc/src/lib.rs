//! vCard 2.1 / 3.0 / 4.0 text reading and writing.
//!
//! The [`vcard`] module holds the line-oriented pipeline: tokenizer, line
//! parser, escaping, folding, parameters and the scribes that turn raw
//! property text into typed values and back.

pub mod error;
pub mod vcard;

pub use error::{RfcError, RfcResult};
