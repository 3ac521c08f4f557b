//! Streaming vCard reader.
//!
//! Drives the pipeline line by line: unfold, split into a [`RawLine`],
//! track `BEGIN`/`END` nesting, decode quoted-printable values and hand the
//! value to the property's scribe. Nothing short of an I/O error stops the
//! reader; every other problem becomes a [`Warning`].

use std::io::BufRead;
use std::sync::Arc;

use cardscribe_core::config::ReaderConfig;
use cardscribe_core::error::CoreError;
use encoding_rs::Encoding;

use super::lexer::LineReader;
use super::line::{RawLine, parse_line};
use crate::error::RfcResult;
use crate::vcard::codec::{charset, quoted_printable};
use crate::vcard::core::{
    VCard, VCardParameters, VCardProperty, VCardValue, VCardVersion, ValueEncoding, Warning,
    WarningCode, Warnings, names, parameter,
};
use crate::vcard::scribe::{ParseContext, ScribeIndex, ScribeOutcome};

/// Reader settings.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Version assumed until a `VERSION` property is seen.
    pub default_version: VCardVersion,
    /// Whether RFC 6868 caret sequences are decoded in 3.0/4.0 parameters.
    pub caret_decoding: bool,
    /// Charset for quoted-printable values without a usable `CHARSET`.
    pub default_charset: &'static Encoding,
    /// Charset of the byte stream. Must be ASCII-compatible.
    pub stream_charset: &'static Encoding,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            default_version: VCardVersion::V2_1,
            caret_decoding: true,
            default_charset: encoding_rs::UTF_8,
            stream_charset: encoding_rs::UTF_8,
        }
    }
}

impl TryFrom<&ReaderConfig> for ReaderOptions {
    type Error = CoreError;

    fn try_from(config: &ReaderConfig) -> Result<Self, Self::Error> {
        let default_version = config.default_version.parse::<VCardVersion>()?;
        let default_charset = charset::lookup(&config.default_charset)
            .ok_or_else(|| CoreError::UnknownCharset(config.default_charset.clone()))?;
        let stream_charset = charset::lookup(&config.stream_charset)
            .filter(|encoding| encoding.is_ascii_compatible())
            .ok_or_else(|| CoreError::UnknownCharset(config.stream_charset.clone()))?;
        Ok(Self {
            default_version,
            caret_decoding: config.caret_decoding,
            default_charset,
            stream_charset,
        })
    }
}

/// One open `BEGIN:VCARD` block.
#[derive(Debug)]
struct ComponentFrame {
    card: VCard,
    version_seen: bool,
    property_count: usize,
    /// An `AGENT` with an empty value, waiting for the nested block.
    pending_agent: Option<(Option<String>, VCardParameters)>,
}

impl ComponentFrame {
    fn new(version: VCardVersion) -> Self {
        Self {
            card: VCard::with_version(version),
            version_seen: false,
            property_count: 0,
            pending_agent: None,
        }
    }

    fn set_version(&mut self, value: &str, warnings: &mut Warnings) {
        let Some(version) = VCardVersion::parse(value) else {
            warnings.warn(
                WarningCode::UnknownVersion,
                format!(
                    "unknown VERSION {:?}, keeping {}",
                    value.trim(),
                    self.card.version
                ),
            );
            self.version_seen = true;
            return;
        };
        if self.version_seen || self.property_count > 0 {
            warnings.warn(
                WarningCode::MisplacedVersion,
                format!("VERSION {version} is not the first property"),
            );
        }
        self.card.version = version;
        self.version_seen = true;
    }

    fn attach_agent(&mut self, nested: VCard, warnings: &mut Warnings) {
        let (group, params) = self.pending_agent.take().unwrap_or_else(|| {
            warnings.warn(
                WarningCode::InvalidLine,
                "nested vCard without an AGENT property",
            );
            (None, VCardParameters::new())
        });
        let mut property =
            VCardProperty::new(names::AGENT, VCardValue::Agent(Box::new(nested))).with_params(params);
        property.group = group;
        self.card.add_property(property);
    }

    fn close(mut self, warnings: &mut Warnings) -> VCard {
        if self.pending_agent.take().is_some() {
            warnings.push(
                Warning::new(WarningCode::PropertySkipped, "AGENT has no embedded vCard")
                    .for_property(names::AGENT),
            );
        }
        if !self.version_seen {
            warnings.warn(
                WarningCode::MissingVersion,
                format!("no VERSION property, assuming {}", self.card.version),
            );
        }
        self.card
    }
}

/// Reads vCards one at a time from a byte stream.
///
/// ## Example
///
/// ```rust
/// use cardscribe_rfc::vcard::parse::VCardReader;
///
/// let input = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:John Doe\r\nEND:VCARD\r\n";
/// let mut reader = VCardReader::new(input.as_bytes());
/// let card = reader.read_next().unwrap().unwrap();
/// assert_eq!(card.formatted_name(), Some("John Doe"));
/// assert!(reader.warnings().is_empty());
/// ```
#[derive(Debug)]
pub struct VCardReader<R> {
    lines: LineReader<R>,
    scribes: Arc<ScribeIndex>,
    options: ReaderOptions,
    warnings: Warnings,
}

impl<R: BufRead> VCardReader<R> {
    /// Creates a reader with default options and the standard scribes.
    pub fn new(inner: R) -> Self {
        Self::with_options(inner, ReaderOptions::default())
    }

    pub fn with_options(inner: R, options: ReaderOptions) -> Self {
        Self {
            lines: LineReader::with_encoding(inner, options.stream_charset),
            scribes: Arc::new(ScribeIndex::default()),
            options,
            warnings: Warnings::new(),
        }
    }

    /// Replaces the scribe registry.
    #[must_use]
    pub fn with_scribes(mut self, scribes: Arc<ScribeIndex>) -> Self {
        self.scribes = scribes;
        self
    }

    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Warnings from the last [`VCardReader::read_next`] or
    /// [`VCardReader::read_all`] call.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        self.warnings.as_slice()
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        self.warnings.take()
    }

    /// Releases the wrapped stream.
    pub fn into_inner(self) -> R {
        self.lines.into_inner()
    }

    /// Reads the next top-level vCard, or `None` at end of stream.
    ///
    /// Warnings from earlier calls are discarded.
    ///
    /// ## Errors
    /// Returns an error only if the underlying stream fails.
    #[tracing::instrument(skip(self))]
    pub fn read_next(&mut self) -> RfcResult<Option<VCard>> {
        self.warnings = Warnings::new();
        let mut frames: Vec<ComponentFrame> = Vec::new();

        while let Some(line) = self.lines.read_logical()? {
            let version = frames
                .last()
                .map_or(self.options.default_version, |frame| frame.card.version);
            self.warnings.set_context(Some(line.line_number), None);

            let raw = match parse_line(
                &line.text,
                line.line_number,
                version.policy(),
                self.options.caret_decoding,
            ) {
                Ok(raw) => raw,
                Err(err) => {
                    self.warnings.push(err.to_warning());
                    continue;
                }
            };

            if raw.is_named(names::BEGIN) {
                if is_vcard(&raw) {
                    tracing::trace!(depth = frames.len(), "BEGIN:VCARD");
                    frames.push(ComponentFrame::new(version));
                } else {
                    self.warn_foreign_component(&raw);
                }
                continue;
            }

            if raw.is_named(names::END) {
                if !is_vcard(&raw) {
                    self.warn_foreign_component(&raw);
                    continue;
                }
                let Some(frame) = frames.pop() else {
                    self.warnings
                        .warn(WarningCode::UnmatchedEnd, "END:VCARD without BEGIN:VCARD");
                    continue;
                };
                let card = frame.close(&mut self.warnings);
                match frames.last_mut() {
                    Some(parent) => parent.attach_agent(card, &mut self.warnings),
                    None => {
                        tracing::debug!(properties = card.properties.len(), "Read vCard");
                        return Ok(Some(card));
                    }
                }
                continue;
            }

            let Some(frame) = frames.last_mut() else {
                self.warnings.warn(
                    WarningCode::InvalidLine,
                    format!("property {} outside of BEGIN:VCARD", raw.name),
                );
                continue;
            };

            if raw.is_named(names::VERSION) {
                frame.set_version(&raw.value, &mut self.warnings);
                continue;
            }

            self.warnings
                .set_context(Some(line.line_number), Some(&raw.name));
            frame.property_count += 1;

            if raw.is_named(names::AGENT) && raw.value.trim().is_empty() {
                frame.pending_agent = Some((raw.group, raw.parameters));
                continue;
            }

            let version = frame.card.version;
            if let Some(property) = self.unmarshal(raw, version) {
                frame.card.add_property(property);
            }
        }

        self.warnings.clear_context();
        Ok(self.finish_unterminated(frames))
    }

    /// Reads every remaining vCard. [`VCardReader::warnings`] then holds the
    /// warnings of the whole stream.
    ///
    /// ## Errors
    /// Returns an error only if the underlying stream fails.
    pub fn read_all(&mut self) -> RfcResult<Vec<VCard>> {
        let mut cards = Vec::new();
        let mut collected = Vec::new();
        while let Some(card) = self.read_next()? {
            collected.append(&mut self.warnings.take());
            cards.push(card);
        }
        collected.append(&mut self.warnings.take());
        for warning in collected {
            self.warnings.push(warning);
        }
        Ok(cards)
    }

    /// Closes the components left open at end of stream.
    fn finish_unterminated(&mut self, mut frames: Vec<ComponentFrame>) -> Option<VCard> {
        if frames.is_empty() {
            return None;
        }
        self.warnings.warn(
            WarningCode::UnterminatedComponent,
            format!("{} BEGIN:VCARD without END:VCARD at end of stream", frames.len()),
        );
        let mut card = frames.pop()?.close(&mut self.warnings);
        while let Some(mut parent) = frames.pop() {
            parent.attach_agent(card, &mut self.warnings);
            card = parent.close(&mut self.warnings);
        }
        Some(card)
    }

    fn warn_foreign_component(&mut self, raw: &RawLine) {
        self.warnings.warn(
            WarningCode::InvalidLine,
            format!("{}:{} is not a vCard component", raw.name, raw.value.trim()),
        );
    }

    /// Decodes and dispatches one property line to its scribe.
    fn unmarshal(&mut self, raw: RawLine, version: VCardVersion) -> Option<VCardProperty> {
        let RawLine {
            group,
            name,
            mut parameters,
            value,
        } = raw;
        let scribe = self.scribes.lookup_or_raw(&name);

        let value = if parameters.encoding() == Some(ValueEncoding::QuotedPrintable) {
            let encoding = charset::resolve(
                parameters.charset(),
                self.options.default_charset,
                &mut self.warnings,
            );
            let bytes = quoted_printable::decode(&value, &mut self.warnings);
            charset::decode(&bytes, encoding)
        } else {
            value
        };

        let original = parameters.clone();
        let default_type = scribe.default_data_type(version);
        let data_type = parameters.value_type().or_else(|| default_type.clone());
        if default_type.is_some() {
            parameters.remove_all(parameter::names::VALUE);
        }

        let mut ctx = ParseContext::new(version, &mut self.warnings, &self.scribes, &self.options);
        let outcome = scribe.unmarshal_text(&value, data_type.as_ref(), &mut parameters, &mut ctx);

        let (params, value) = match outcome {
            ScribeOutcome::Done(typed) => (parameters, typed),
            ScribeOutcome::Skip(reason) => {
                self.warnings.warn(WarningCode::PropertySkipped, reason);
                return None;
            }
            ScribeOutcome::Fail(err) => {
                self.warnings
                    .warn(WarningCode::UnparseableValue, err.to_string());
                (original, VCardValue::Unknown(value))
            }
        };
        tracing::trace!(property = %name, kind = value.kind(), "Unmarshalled property");

        let mut property = VCardProperty::new(name, value).with_params(params);
        property.group = group;
        Some(property)
    }
}

fn is_vcard(raw: &RawLine) -> bool {
    raw.value.trim().eq_ignore_ascii_case(names::VCARD)
}

/// Cards and warnings from an in-memory document.
#[derive(Debug, Clone, Default)]
pub struct ParsedVCards {
    pub cards: Vec<VCard>,
    pub warnings: Vec<Warning>,
}

/// Parses every vCard in a string with default options.
///
/// ## Example
///
/// ```rust
/// use cardscribe_rfc::vcard::parse;
///
/// let parsed = parse::parse("BEGIN:VCARD\nVERSION:4.0\nFN:Jane\nEND:VCARD\n");
/// assert_eq!(parsed.cards.len(), 1);
/// assert!(parsed.warnings.is_empty());
/// ```
#[must_use]
pub fn parse(input: &str) -> ParsedVCards {
    parse_with(input, ReaderOptions::default())
}

/// Parses every vCard in a string.
#[must_use]
pub fn parse_with(input: &str, options: ReaderOptions) -> ParsedVCards {
    let mut reader = VCardReader::with_options(input.as_bytes(), options);
    let mut parsed = ParsedVCards::default();
    loop {
        match reader.read_next() {
            Ok(Some(card)) => {
                parsed.cards.push(card);
                parsed.warnings.append(&mut reader.take_warnings());
            }
            Ok(None) => {
                parsed.warnings.append(&mut reader.take_warnings());
                break;
            }
            Err(err) => {
                parsed.warnings.push(Warning::message(err.to_string()));
                break;
            }
        }
    }
    parsed
}
