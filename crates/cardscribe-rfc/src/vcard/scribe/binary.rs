//! Scribe for binary properties: PHOTO, LOGO, SOUND and KEY.
//!
//! Inline data travels as `ENCODING=BASE64` (2.1), `ENCODING=b` (3.0) or a
//! `data:` URI (4.0). Anything else is kept as a URI.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value as JsonValue;

use super::format::{HtmlElement, XmlValue};
use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::core::{
    BinaryData, ValueEncoding, VCardDataType, VCardParameters, VCardProperty, VCardValue,
    VCardVersion, names, parameter,
};

const DATA_SCHEME: &str = "data:";
const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

fn decode_base64(text: &str) -> Result<Vec<u8>, ScribeError> {
    let cleaned: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|err| ScribeError::cannot_parse(format!("invalid base64: {err}")))
}

/// Parses `data:[<media type>][;base64],<data>`.
///
/// Returns `None` when `uri` is not a data URI.
fn parse_data_uri(uri: &str) -> Option<Result<BinaryData, ScribeError>> {
    let scheme = uri.get(..DATA_SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(DATA_SCHEME) {
        return None;
    }
    let rest = &uri[DATA_SCHEME.len()..];
    let Some((header, data)) = rest.split_once(',') else {
        return Some(Err(ScribeError::cannot_parse("data URI has no ','")));
    };
    let (media_type, base64) = match header.rsplit_once(';') {
        Some((media_type, flag)) if flag.eq_ignore_ascii_case("base64") => (media_type, true),
        _ => (header, false),
    };
    let media_type = (!media_type.is_empty()).then(|| media_type.to_ascii_lowercase());
    let bytes = if base64 {
        match decode_base64(data) {
            Ok(bytes) => bytes,
            Err(err) => return Some(Err(err)),
        }
    } else {
        data.as_bytes().to_vec()
    };
    Some(Ok(BinaryData::new(bytes, media_type)))
}

fn data_uri(binary: &BinaryData) -> String {
    let media_type = binary.media_type.as_deref().unwrap_or(DEFAULT_MEDIA_TYPE);
    format!("{DATA_SCHEME}{media_type};base64,{}", STANDARD.encode(&binary.data))
}

#[derive(Debug, Clone)]
pub struct BinaryScribe {
    name: &'static str,
    /// Top-level media type a bare `TYPE=JPEG` refers to.
    media_prefix: &'static str,
}

impl BinaryScribe {
    #[must_use]
    pub const fn new(name: &'static str, media_prefix: &'static str) -> Self {
        Self { name, media_prefix }
    }

    #[must_use]
    pub const fn photo() -> Self {
        Self::new(names::PHOTO, "image")
    }

    #[must_use]
    pub const fn logo() -> Self {
        Self::new(names::LOGO, "image")
    }

    #[must_use]
    pub const fn sound() -> Self {
        Self::new(names::SOUND, "audio")
    }

    #[must_use]
    pub const fn key() -> Self {
        Self::new(names::KEY, "application")
    }

    /// Media type from `MEDIATYPE`, or from `TYPE` (`JPEG` becomes
    /// `image/jpeg` for PHOTO).
    fn media_type(&self, params: &VCardParameters) -> Option<String> {
        if let Some(media_type) = params.media_type() {
            return Some(media_type.to_ascii_lowercase());
        }
        params
            .types()
            .into_iter()
            .find(|t| !t.eq_ignore_ascii_case(parameter::types::PREF))
            .map(|t| {
                let t = t.to_ascii_lowercase();
                if t.contains('/') {
                    t
                } else {
                    format!("{}/{t}", self.media_prefix)
                }
            })
    }
}

impl Scribe for BinaryScribe {
    fn property_name(&self) -> &str {
        self.name
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V2_1 => Some(VCardDataType::Inline),
            VCardVersion::V3_0 => Some(VCardDataType::Binary),
            VCardVersion::V4_0 => Some(VCardDataType::Uri),
        }
    }

    fn data_type(&self, value: &VCardValue, version: VCardVersion) -> Option<VCardDataType> {
        match value {
            VCardValue::Uri(_) => Some(VCardDataType::Uri.for_version(version)),
            _ => self.default_data_type(version),
        }
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        data_type: Option<&VCardDataType>,
        params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return ScribeOutcome::skip("empty binary value");
        }
        if params.encoding().is_some_and(|e| e.is_base64()) {
            let media_type = self.media_type(params);
            return match decode_base64(raw) {
                Ok(data) => {
                    params.set_encoding(None);
                    ScribeOutcome::Done(VCardValue::Binary(BinaryData::new(data, media_type)))
                }
                Err(err) => ScribeOutcome::Fail(err),
            };
        }
        if let Some(parsed) = parse_data_uri(raw) {
            return parsed.map(VCardValue::Binary).into();
        }
        match data_type {
            Some(VCardDataType::Inline | VCardDataType::Binary) => {
                ScribeOutcome::Fail(ScribeError::cannot_parse("inline data without ENCODING"))
            }
            _ => ScribeOutcome::Done(VCardValue::Uri(raw.to_string())),
        }
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        match &property.value {
            VCardValue::Binary(binary) if ctx.version == VCardVersion::V4_0 => {
                ScribeOutcome::Done(data_uri(binary))
            }
            VCardValue::Binary(binary) => ScribeOutcome::Done(STANDARD.encode(&binary.data)),
            VCardValue::Uri(uri) => ScribeOutcome::Done(uri.clone()),
            _ => ScribeOutcome::Fail(ScribeError::wrong_type(property)),
        }
    }

    fn prepare_parameters(
        &self,
        property: &VCardProperty,
        params: &mut VCardParameters,
        ctx: &mut WriteContext<'_>,
    ) {
        let VCardValue::Binary(binary) = &property.value else {
            params.set_encoding(None);
            return;
        };
        let encoding = match ctx.version {
            VCardVersion::V2_1 => ValueEncoding::Base64,
            VCardVersion::V3_0 => ValueEncoding::B,
            VCardVersion::V4_0 => {
                params.set_encoding(None);
                return;
            }
        };
        if params.types().is_empty()
            && let Some(media_type) = &binary.media_type
        {
            let subtype = media_type.rsplit('/').next().unwrap_or(media_type);
            params.add_type(subtype.to_ascii_uppercase());
        }
        params.set_encoding(Some(&encoding));
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        match &property.value {
            VCardValue::Binary(binary) => ScribeOutcome::Done(JsonValue::String(data_uri(binary))),
            VCardValue::Uri(uri) => ScribeOutcome::Done(JsonValue::String(uri.clone())),
            _ => ScribeOutcome::Fail(ScribeError::wrong_type(property)),
        }
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let Some(uri) = value.as_str() else {
            return ScribeOutcome::Fail(ScribeError::cannot_parse("jCard binary must be a string"));
        };
        match parse_data_uri(uri) {
            Some(parsed) => parsed.map(VCardValue::Binary).into(),
            None => ScribeOutcome::Done(VCardValue::Uri(uri.to_string())),
        }
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        match &property.value {
            VCardValue::Binary(binary) => ScribeOutcome::Done(XmlValue::single("uri", data_uri(binary))),
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
        let Some(uri) = element.first("uri") else {
            return ScribeOutcome::Fail(ScribeError::cannot_parse("no <uri> element"));
        };
        match parse_data_uri(uri) {
            Some(parsed) => parsed.map(VCardValue::Binary).into(),
            None => ScribeOutcome::Done(VCardValue::Uri(uri.to_string())),
        }
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let uri = element.value();
        if uri.is_empty() {
            return ScribeOutcome::skip("hCard element has no source");
        }
        match parse_data_uri(uri) {
            Some(parsed) => parsed.map(VCardValue::Binary).into(),
            None => ScribeOutcome::Done(VCardValue::Uri(uri.to_string())),
        }
    }
}
