use thiserror::Error;

/// Hard failures of a read or write operation.
///
/// Malformed input never produces one of these; it is reported through
/// [`crate::vcard::Warning`]s instead.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No scribe registered for property {name} and its value cannot be written raw")]
    NoScribe { name: String },

    #[error("Cannot write property {property}: {message}")]
    Marshal { property: String, message: String },

    #[error(transparent)]
    CoreError(#[from] cardscribe_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
