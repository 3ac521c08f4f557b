use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE, CRLF, DEFAULT_CHARSET, DEFAULT_FOLD_INDENT, DEFAULT_MAX_LINE_LENGTH, ENV_PREFIX,
};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
    pub logging: LoggingConfig,
}

/// Defaults applied when reading vCard text.
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// Version assumed until a `VERSION` property is seen.
    pub default_version: String,
    /// Whether RFC 6868 caret sequences in parameter values are decoded.
    pub caret_decoding: bool,
    /// Charset used for quoted-printable values without a usable `CHARSET`.
    pub default_charset: String,
    /// Charset of the byte stream itself. Must be ASCII-compatible.
    pub stream_charset: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            default_version: "2.1".to_string(),
            caret_decoding: true,
            default_charset: DEFAULT_CHARSET.to_string(),
            stream_charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldUnit {
    #[default]
    Chars,
    Utf8Bytes,
}

/// Defaults applied when writing vCard text.
#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    /// Target version.
    pub version: String,
    /// When false, lines are never folded.
    pub fold_lines: bool,
    pub max_line_length: usize,
    pub fold_unit: FoldUnit,
    pub indent: String,
    pub newline: String,
    /// Whether RFC 6868 caret encoding is used for 3.0/4.0 parameter values.
    pub caret_encoding: bool,
    /// Whether a product identifier is added to cards that lack one.
    pub include_prodid: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            version: "3.0".to_string(),
            fold_lines: true,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            fold_unit: FoldUnit::Chars,
            indent: DEFAULT_FOLD_INDENT.to_string(),
            newline: CRLF.to_string(),
            caret_encoding: false,
            include_prodid: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads settings from defaults, `CARDSCRIBE__*` environment variables and an
    /// optional `cardscribe.toml`. Later sources take precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_with(environment())
    }

    /// Loads settings with `environment` in place of the process environment
    /// source.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load_with(environment: config::Environment) -> Result<Self> {
        let reader = ReaderConfig::default();
        let writer = WriterConfig::default();
        let logging = LoggingConfig::default();

        Ok(Config::builder()
            .set_default("reader.default_version", reader.default_version)?
            .set_default("reader.caret_decoding", reader.caret_decoding)?
            .set_default("reader.default_charset", reader.default_charset)?
            .set_default("reader.stream_charset", reader.stream_charset)?
            .set_default("writer.version", writer.version)?
            .set_default("writer.fold_lines", writer.fold_lines)?
            .set_default(
                "writer.max_line_length",
                u64::try_from(writer.max_line_length)?,
            )?
            .set_default("writer.fold_unit", "chars")?
            .set_default("writer.indent", writer.indent)?
            .set_default("writer.newline", writer.newline)?
            .set_default("writer.caret_encoding", writer.caret_encoding)?
            .set_default("writer.include_prodid", writer.include_prodid)?
            .set_default("logging.level", logging.level)?
            .add_source(environment)
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// `CARDSCRIBE__SECTION__KEY` variables.
///
/// Values are not pre-parsed, so `3.0` stays a string. Booleans and integers
/// convert on deserialization.
#[must_use]
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .ignore_empty(true)
}

/// ## Summary
/// Loads configuration from environment variables, `.env` and `cardscribe.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings, "Loaded cardscribe settings");
    Ok(settings)
}
