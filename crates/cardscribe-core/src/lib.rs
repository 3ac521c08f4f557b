//! Shared configuration, errors and constants for the cardscribe crates.

pub mod config;
pub mod constants;
pub mod error;
