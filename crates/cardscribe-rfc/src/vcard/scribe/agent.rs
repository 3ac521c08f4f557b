//! AGENT scribe (2.1 and 3.0).
//!
//! In 3.0 the embedded vCard is an escaped text value. In 2.1 it follows the
//! `AGENT:` line as a nested `BEGIN:VCARD` block, which the reader and
//! writer handle themselves; the scribe only sees the 3.0 form.

use std::sync::Arc;

use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::build::{FoldingScheme, VCardWriter, WriterOptions};
use crate::vcard::codec::{escape_text, unescape_text};
use crate::vcard::core::{
    VCard, VCardDataType, VCardParameters, VCardProperty, VCardValue, VCardVersion, names,
};
use crate::vcard::parse::{ReaderOptions, VCardReader};

const LEGACY: &[VCardVersion] = &[VCardVersion::V2_1, VCardVersion::V3_0];

#[derive(Debug, Clone, Copy)]
pub struct AgentScribe;

impl AgentScribe {
    fn read_embedded(text: &str, ctx: &mut ParseContext<'_>) -> ScribeOutcome<VCardValue> {
        let options = ReaderOptions {
            default_version: ctx.version,
            ..ctx.options.clone()
        };
        let mut reader =
            VCardReader::with_options(text.as_bytes(), options).with_scribes(Arc::clone(ctx.scribes));
        let result = reader.read_next();
        for warning in reader.take_warnings() {
            ctx.warnings.push(warning);
        }
        match result {
            Ok(Some(card)) => ScribeOutcome::Done(VCardValue::Agent(Box::new(card))),
            Ok(None) => ScribeOutcome::Fail(ScribeError::cannot_parse("no embedded vCard found")),
            Err(err) => ScribeOutcome::Fail(ScribeError::cannot_parse(format!(
                "embedded vCard: {err}"
            ))),
        }
    }

    fn write_embedded(card: &VCard, ctx: &mut WriteContext<'_>) -> Result<String, ScribeError> {
        let options = WriterOptions {
            version: ctx.version,
            folding: FoldingScheme::unfolded(),
            include_prodid: false,
            ..ctx.options.clone()
        };
        let mut writer =
            VCardWriter::with_options(Vec::new(), options).with_scribes(Arc::clone(ctx.scribes));
        let result = writer.write(card);
        for warning in writer.take_warnings() {
            ctx.warnings.push(warning);
        }
        result.map_err(|err| ScribeError::cannot_parse(format!("embedded vCard: {err}")))?;
        let text = String::from_utf8_lossy(&writer.into_inner()).into_owned();
        Ok(escape_text(&text, ctx.policy()))
    }
}

impl Scribe for AgentScribe {
    fn property_name(&self) -> &str {
        names::AGENT
    }

    fn supported_versions(&self) -> &[VCardVersion] {
        LEGACY
    }

    /// `VALUE` is only present for the URI form, so it is left alone.
    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        None
    }

    fn data_type(&self, value: &VCardValue, version: VCardVersion) -> Option<VCardDataType> {
        match value {
            VCardValue::Uri(_) => Some(VCardDataType::Uri.for_version(version)),
            _ => None,
        }
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        if matches!(data_type, Some(VCardDataType::Uri | VCardDataType::Url)) {
            return ScribeOutcome::Done(VCardValue::Uri(raw.trim().to_string()));
        }
        if raw.trim().is_empty() {
            return ScribeOutcome::skip("AGENT has no embedded vCard");
        }
        let text = unescape_text(raw, ctx.policy());
        Self::read_embedded(&text, ctx)
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        match &property.value {
            VCardValue::Uri(uri) => ScribeOutcome::Done(uri.clone()),
            // The writer emits the nested block after the empty value.
            VCardValue::Agent(_) if ctx.version == VCardVersion::V2_1 => {
                ScribeOutcome::Done(String::new())
            }
            VCardValue::Agent(card) => Self::write_embedded(card, ctx).into(),
            _ => ScribeOutcome::Fail(ScribeError::wrong_type(property)),
        }
    }
}
