//! cardscribe command-line converter.

pub mod convert;
