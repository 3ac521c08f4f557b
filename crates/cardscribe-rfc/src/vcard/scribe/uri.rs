//! Scribe for URI-valued properties (URL, SOURCE, IMPP, FBURL, ...).

use serde_json::Value as JsonValue;

use super::format::{HtmlElement, XmlValue};
use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::core::{VCardDataType, VCardParameters, VCardProperty, VCardValue, VCardVersion};

const MODERN: &[VCardVersion] = &[VCardVersion::V3_0, VCardVersion::V4_0];
const V4_ONLY: &[VCardVersion] = &[VCardVersion::V4_0];

/// URI-valued property. Values are kept verbatim; URIs are not
/// backslash-escaped.
#[derive(Debug, Clone)]
pub struct UriScribe {
    name: &'static str,
    versions: &'static [VCardVersion],
}

impl UriScribe {
    #[must_use]
    pub const fn new(name: &'static str, versions: &'static [VCardVersion]) -> Self {
        Self { name, versions }
    }

    #[must_use]
    pub const fn all_versions(name: &'static str) -> Self {
        Self::new(name, &VCardVersion::ALL)
    }

    /// 3.0 and 4.0 (SOURCE, IMPP).
    #[must_use]
    pub const fn modern(name: &'static str) -> Self {
        Self::new(name, MODERN)
    }

    /// 4.0 only (FBURL, CALURI, CALADRURI, MEMBER).
    #[must_use]
    pub const fn v4_only(name: &'static str) -> Self {
        Self::new(name, V4_ONLY)
    }

    fn uri<'a>(property: &'a VCardProperty) -> Result<&'a str, ScribeError> {
        match &property.value {
            VCardValue::Uri(uri) | VCardValue::Text(uri) => Ok(uri),
            _ => Err(ScribeError::wrong_type(property)),
        }
    }
}

impl Scribe for UriScribe {
    fn property_name(&self) -> &str {
        self.name
    }

    fn supported_versions(&self) -> &[VCardVersion] {
        self.versions
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Uri.for_version(version))
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        ScribeOutcome::Done(VCardValue::Uri(raw.trim().to_string()))
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        Self::uri(property).map(str::to_string).into()
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        Self::uri(property)
            .map(|uri| JsonValue::String(uri.to_string()))
            .into()
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        match value.as_str() {
            Some(uri) => ScribeOutcome::Done(VCardValue::Uri(uri.to_string())),
            None => ScribeOutcome::Fail(ScribeError::cannot_parse("jCard URI must be a string")),
        }
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        Self::uri(property)
            .map(|uri| XmlValue::single("uri", uri))
            .into()
    }

    fn unmarshal_xml(
        &self,
        element: &XmlValue,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        match element.first("uri").or_else(|| element.first("text")) {
            Some(uri) => ScribeOutcome::Done(VCardValue::Uri(uri.to_string())),
            None => ScribeOutcome::Fail(ScribeError::cannot_parse("no <uri> element")),
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
            return ScribeOutcome::skip("empty hCard element");
        }
        ScribeOutcome::Done(VCardValue::Uri(uri.to_string()))
    }
}
