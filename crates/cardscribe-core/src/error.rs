use thiserror::Error;

/// Errors raised while turning settings into reader and writer options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown vCard version: {0}")]
    UnknownVersion(String),

    #[error("Unknown character set: {0}")]
    UnknownCharset(String),
}
