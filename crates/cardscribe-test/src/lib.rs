//! cardscribe - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `cardscribe_test::` paths.

pub mod component {
    pub use cardscribe_core::{config, constants, error};
}

pub use cardscribe_app as app;
pub use cardscribe_rfc as rfc;
