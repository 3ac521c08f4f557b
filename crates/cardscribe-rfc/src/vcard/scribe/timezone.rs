//! TZ scribe.
//!
//! 2.1 and 3.0 default to a UTC offset (`-05:00`); 4.0 defaults to text
//! (`America/New_York`) and marks offsets with `VALUE=utc-offset`.

use chrono::FixedOffset;
use serde_json::Value as JsonValue;

use super::datetime::parse_offset;
use super::format::{HtmlElement, XmlValue};
use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::codec::{escape_text, unescape_text};
use crate::vcard::core::{
    DateStyle, VCardDataType, VCardParameters, VCardProperty, VCardValue, VCardVersion, names,
};

/// Formats an offset; zero is `+00:00`/`+0000`, never `Z`.
fn format_offset(offset: FixedOffset, style: DateStyle) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    let (h, m) = (minutes / 60, minutes % 60);
    match style {
        DateStyle::Extended => format!("{sign}{h:02}:{m:02}"),
        DateStyle::Basic => format!("{sign}{h:02}{m:02}"),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimezoneScribe;

impl Scribe for TimezoneScribe {
    fn property_name(&self) -> &str {
        names::TZ
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V2_1 | VCardVersion::V3_0 => Some(VCardDataType::UtcOffset),
            VCardVersion::V4_0 => Some(VCardDataType::Text),
        }
    }

    fn data_type(&self, value: &VCardValue, version: VCardVersion) -> Option<VCardDataType> {
        match value {
            VCardValue::UtcOffset(_) => Some(VCardDataType::UtcOffset),
            VCardValue::Uri(_) => Some(VCardDataType::Uri.for_version(version)),
            _ => Some(VCardDataType::Text),
        }
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        match data_type {
            Some(VCardDataType::Uri | VCardDataType::Url) => {
                ScribeOutcome::Done(VCardValue::Uri(raw.trim().to_string()))
            }
            Some(VCardDataType::UtcOffset) => match parse_offset(raw) {
                Ok(offset) => ScribeOutcome::Done(VCardValue::UtcOffset(offset)),
                Err(err) => {
                    ctx.warn(format!("TZ kept as text: {err}"));
                    ScribeOutcome::Done(VCardValue::Text(unescape_text(raw, ctx.policy())))
                }
            },
            _ => ScribeOutcome::Done(VCardValue::Text(unescape_text(raw, ctx.policy()))),
        }
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        match &property.value {
            VCardValue::UtcOffset(offset) => {
                let style = match ctx.version {
                    VCardVersion::V2_1 | VCardVersion::V3_0 => DateStyle::Extended,
                    VCardVersion::V4_0 => DateStyle::Basic,
                };
                ScribeOutcome::Done(format_offset(*offset, style))
            }
            VCardValue::Text(text) => ScribeOutcome::Done(escape_text(text, ctx.policy())),
            VCardValue::Uri(uri) => ScribeOutcome::Done(uri.clone()),
            _ => ScribeOutcome::Fail(ScribeError::wrong_type(property)),
        }
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        match &property.value {
            VCardValue::UtcOffset(offset) => ScribeOutcome::Done(JsonValue::String(
                format_offset(*offset, DateStyle::Extended),
            )),
            VCardValue::Text(s) | VCardValue::Uri(s) => {
                ScribeOutcome::Done(JsonValue::String(s.clone()))
            }
            _ => ScribeOutcome::Fail(ScribeError::wrong_type(property)),
        }
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let Some(text) = value.as_str() else {
            return ScribeOutcome::Fail(ScribeError::cannot_parse("jCard TZ must be a string"));
        };
        match data_type {
            Some(VCardDataType::UtcOffset) => parse_offset(text).map(VCardValue::UtcOffset).into(),
            Some(VCardDataType::Uri) => ScribeOutcome::Done(VCardValue::Uri(text.to_string())),
            _ => ScribeOutcome::Done(VCardValue::Text(text.to_string())),
        }
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        match &property.value {
            VCardValue::UtcOffset(offset) => ScribeOutcome::Done(XmlValue::single(
                "utc-offset",
                format_offset(*offset, DateStyle::Basic),
            )),
            VCardValue::Text(text) => ScribeOutcome::Done(XmlValue::single("text", text.as_str())),
            VCardValue::Uri(uri) => ScribeOutcome::Done(XmlValue::single("uri", uri.as_str())),
            _ => ScribeOutcome::Fail(ScribeError::wrong_type(property)),
        }
    }

    fn unmarshal_xml(
        &self,
        element: &XmlValue,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        if let Some(offset) = element.first("utc-offset") {
            return parse_offset(offset).map(VCardValue::UtcOffset).into();
        }
        if let Some(text) = element.first("text") {
            return ScribeOutcome::Done(VCardValue::Text(text.to_string()));
        }
        match element.first("uri") {
            Some(uri) => ScribeOutcome::Done(VCardValue::Uri(uri.to_string())),
            None => ScribeOutcome::Fail(ScribeError::cannot_parse("no TZ value element")),
        }
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let value = element.value();
        match parse_offset(value) {
            Ok(offset) => ScribeOutcome::Done(VCardValue::UtcOffset(offset)),
            Err(_) if value.is_empty() => ScribeOutcome::skip("empty hCard element"),
            Err(_) => ScribeOutcome::Done(VCardValue::Text(value.to_string())),
        }
    }
}
