//! vCard serialization.
//!
//! - Fold: column-tracking line folding, including quoted-printable soft breaks
//! - Writer: per-card serialization through the scribe registry

mod fold;
mod writer;

#[cfg(test)]
mod writer_tests;

pub use fold::{FoldedLineWriter, FoldingScheme, LengthUnit};
pub use writer::{VCardWriter, WriterOptions, write_to_string};
