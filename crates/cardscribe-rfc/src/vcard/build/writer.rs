//! Streaming vCard writer.

use std::io;
use std::sync::Arc;

use cardscribe_core::config::WriterConfig;
use cardscribe_core::constants::PRODUCT_ID;
use cardscribe_core::error::CoreError;

use super::fold::{FoldedLineWriter, FoldingScheme};
use crate::error::{RfcError, RfcResult};
use crate::vcard::codec::{charset, encode_param_value, escape_text};
use crate::vcard::core::{
    ParamSyntax, VCard, VCardParameters, VCardProperty, VCardValue, VCardVersion, ValueEncoding,
    VersionPolicy, Warning, WarningCode, Warnings, names, parameter,
};
use crate::vcard::scribe::{Scribe, ScribeIndex, ScribeOutcome, WriteContext};

/// Writer settings.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Target version; the version stored on each card is ignored.
    pub version: VCardVersion,
    pub folding: FoldingScheme,
    /// Whether RFC 6868 caret encoding is used for 3.0/4.0 parameter values.
    pub caret_encoding: bool,
    /// Whether a product identifier is added to cards that lack one.
    pub include_prodid: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            version: VCardVersion::V3_0,
            folding: FoldingScheme::default(),
            caret_encoding: false,
            include_prodid: true,
        }
    }
}

impl TryFrom<&WriterConfig> for WriterOptions {
    type Error = CoreError;

    fn try_from(config: &WriterConfig) -> Result<Self, Self::Error> {
        let version = config.version.parse::<VCardVersion>()?;
        if !config.indent.starts_with([' ', '\t']) {
            return Err(CoreError::ConfigError(format!(
                "fold indent must start with a space or tab, got {:?}",
                config.indent
            )));
        }
        if !matches!(config.newline.as_str(), "\r\n" | "\n" | "\r") {
            return Err(CoreError::ConfigError(format!(
                "newline must be CRLF, LF or CR, got {:?}",
                config.newline
            )));
        }
        Ok(Self {
            version,
            folding: FoldingScheme {
                max_line_length: config.fold_lines.then_some(config.max_line_length),
                indent: config.indent.clone(),
                newline: config.newline.clone(),
                unit: config.fold_unit.into(),
            },
            caret_encoding: config.caret_encoding,
            include_prodid: config.include_prodid,
        })
    }
}

/// Writes vCards to a byte stream.
///
/// ## Example
///
/// ```rust
/// use cardscribe_rfc::vcard::build::VCardWriter;
/// use cardscribe_rfc::vcard::core::{VCard, VCardProperty};
///
/// let mut card = VCard::new();
/// card.add_property(VCardProperty::text("FN", "John Doe"));
///
/// let mut writer = VCardWriter::new(Vec::new());
/// writer.write(&card).unwrap();
/// let text = String::from_utf8(writer.into_inner()).unwrap();
/// assert!(text.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
/// assert!(text.contains("FN:John Doe\r\n"));
/// ```
#[derive(Debug)]
pub struct VCardWriter<W> {
    out: FoldedLineWriter<W>,
    scribes: Arc<ScribeIndex>,
    options: WriterOptions,
    warnings: Warnings,
}

impl<W: io::Write> VCardWriter<W> {
    /// Creates a writer with default options and the standard scribes.
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, WriterOptions::default())
    }

    pub fn with_options(inner: W, options: WriterOptions) -> Self {
        Self {
            out: FoldedLineWriter::new(inner, options.folding.clone()),
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
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Warnings from the last [`VCardWriter::write`] call.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        self.warnings.as_slice()
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        self.warnings.take()
    }

    /// ## Errors
    /// Returns any error from the underlying writer.
    pub fn flush(&mut self) -> RfcResult<()> {
        Ok(self.out.flush()?)
    }

    /// Releases the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Writes one vCard in the target version.
    ///
    /// Warnings from earlier calls are discarded.
    ///
    /// ## Errors
    /// Returns an error if the underlying writer fails, a scribe cannot
    /// marshal a value, or a typed property has no registered scribe.
    #[tracing::instrument(skip_all, fields(version = %self.options.version))]
    pub fn write(&mut self, card: &VCard) -> RfcResult<()> {
        self.warnings = Warnings::new();
        let result = self.write_card(card, false);
        self.warnings.clear_context();
        result
    }

    fn write_card(&mut self, card: &VCard, nested: bool) -> RfcResult<()> {
        let version = self.options.version;
        self.write_line(names::BEGIN, names::VCARD)?;
        self.write_line(names::VERSION, version.as_str())?;

        let has_prodid = card.property(names::PRODID).is_some()
            || card.property(names::X_PRODID).is_some();
        if self.options.include_prodid && !nested && !has_prodid {
            let prodid = VCardProperty::raw(version.policy().product_id_property, PRODUCT_ID);
            self.write_property(&prodid)?;
        }

        for property in &card.properties {
            if [names::VERSION, names::BEGIN, names::END]
                .iter()
                .any(|name| property.is_named(name))
            {
                continue;
            }
            match retarget_product_id(property, version.policy()) {
                Some(renamed) => self.write_property(&renamed)?,
                None => self.write_property(property)?,
            }
        }

        self.write_line(names::END, names::VCARD)?;
        tracing::debug!(properties = card.properties.len(), nested, "Wrote vCard");
        Ok(())
    }

    fn write_line(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.out.write(name)?;
        self.out.write(":")?;
        self.out.write(value)?;
        self.out.end_line()
    }

    fn write_property(&mut self, property: &VCardProperty) -> RfcResult<()> {
        let version = self.options.version;
        let policy = version.policy();
        self.warnings.set_context(None, Some(&property.name));

        let scribes = Arc::clone(&self.scribes);
        let scribe: &dyn Scribe = if matches!(property.value, VCardValue::Unknown(_)) {
            ScribeIndex::raw()
        } else {
            scribes
                .lookup(&property.name)
                .map(Arc::as_ref)
                .ok_or_else(|| RfcError::NoScribe {
                    name: property.name.clone(),
                })?
        };

        if !scribe.supported_versions().contains(&version) {
            self.warnings.warn(
                WarningCode::UnsupportedVersion,
                format!("{} is not defined in vCard {version}, left out", property.name),
            );
            return Ok(());
        }

        let mut ctx = WriteContext::new(version, &mut self.warnings, &scribes, &self.options);
        let value = match scribe.marshal_text(property, &mut ctx) {
            ScribeOutcome::Done(value) => value,
            ScribeOutcome::Skip(reason) => {
                ctx.warnings.warn(WarningCode::PropertySkipped, reason);
                return Ok(());
            }
            ScribeOutcome::Fail(err) => {
                return Err(RfcError::Marshal {
                    property: property.name.clone(),
                    message: err.to_string(),
                });
            }
        };

        let mut params = property.params.clone();
        let default_type = scribe.default_data_type(version);
        if default_type.is_some() {
            params.remove_all(parameter::names::VALUE);
            if let Some(data_type) = scribe.data_type(&property.value, version)
                && default_type.as_ref() != Some(&data_type)
            {
                params.set_value_type(Some(&data_type));
            }
        }
        scribe.prepare_parameters(property, &mut params, &mut ctx);

        let qp_charset = if params.encoding() == Some(ValueEncoding::QuotedPrintable) {
            if policy.quoted_printable {
                Some(charset::resolve(
                    params.charset(),
                    encoding_rs::UTF_8,
                    ctx.warnings,
                ))
            } else {
                params.set_encoding(None);
                params.set_charset(None);
                None
            }
        } else {
            None
        };

        let mut head = String::new();
        if let Some(group) = &property.group {
            head.push_str(group);
            head.push('.');
        }
        head.push_str(&property.name);
        write_parameters(
            &mut head,
            &params,
            policy,
            self.options.caret_encoding,
            ctx.warnings,
        );
        head.push(':');

        self.out.write(&head)?;
        match qp_charset {
            Some(encoding) => self.out.write_quoted_printable(&value, encoding)?,
            None => self.out.write(&value)?,
        }
        self.out.end_line()?;

        if let VCardValue::Agent(card) = &property.value
            && version == VCardVersion::V2_1
        {
            self.write_card(card, true)?;
        }
        Ok(())
    }
}

/// Renames a `PRODID` or `X-PRODID` to the product id property of the
/// target version, keeping its group, parameters and value.
fn retarget_product_id(property: &VCardProperty, policy: &VersionPolicy) -> Option<VCardProperty> {
    let is_product_id = property.is_named(names::PRODID) || property.is_named(names::X_PRODID);
    if !is_product_id || property.is_named(policy.product_id_property) {
        return None;
    }
    let raw = match &property.value {
        VCardValue::Text(text) => escape_text(text, policy),
        VCardValue::Unknown(raw) => raw.clone(),
        _ => return None,
    };
    let mut renamed =
        VCardProperty::raw(policy.product_id_property, raw).with_params(property.params.clone());
    renamed.group.clone_from(&property.group);
    Some(renamed)
}

/// Appends `;`-prefixed parameters in wire order.
///
/// 2.1 writes nameless flags bare and repeats keys; 3.0/4.0 name every
/// parameter and join consecutive values of one key with `,`.
fn write_parameters(
    out: &mut String,
    params: &VCardParameters,
    policy: &VersionPolicy,
    caret_encoding: bool,
    warnings: &mut Warnings,
) {
    let mut previous_key: Option<&str> = None;
    for param in params {
        let value = encode_param_value(&param.value, policy, caret_encoding, warnings);
        match policy.param_syntax {
            ParamSyntax::Old => {
                out.push(';');
                if let Some(key) = &param.key {
                    out.push_str(key);
                    out.push('=');
                }
            }
            ParamSyntax::New => {
                let key = param.effective_key();
                if previous_key.is_some_and(|previous| previous.eq_ignore_ascii_case(key)) {
                    out.push(',');
                } else {
                    out.push(';');
                    out.push_str(key);
                    out.push('=');
                }
                previous_key = Some(key);
            }
        }
        out.push_str(&value);
    }
}

/// Writes vCards in the given version with default options.
///
/// Warnings are discarded; use [`VCardWriter`] to inspect them.
///
/// ## Errors
/// Returns an error if a scribe cannot marshal a value or a typed property
/// has no registered scribe.
pub fn write_to_string(cards: &[VCard], version: VCardVersion) -> RfcResult<String> {
    let options = WriterOptions {
        version,
        ..WriterOptions::default()
    };
    let mut writer = VCardWriter::with_options(Vec::new(), options);
    for card in cards {
        writer.write(card)?;
    }
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
