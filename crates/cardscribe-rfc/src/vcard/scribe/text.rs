//! Scribe for single text values (FN, NOTE, EMAIL, TEL, ...).

use serde_json::Value as JsonValue;

use super::format::{HtmlElement, XmlValue};
use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::codec::{escape_text, unescape_text};
use crate::vcard::core::{
    VCardDataType, VCardParameters, VCardProperty, VCardValue, VCardVersion, names,
};

const LEGACY: &[VCardVersion] = &[VCardVersion::V2_1, VCardVersion::V3_0];
const V3_ONLY: &[VCardVersion] = &[VCardVersion::V3_0];
const MODERN: &[VCardVersion] = &[VCardVersion::V3_0, VCardVersion::V4_0];
const V4_ONLY: &[VCardVersion] = &[VCardVersion::V4_0];

/// Text-valued property. With `VALUE=uri` (TEL in 4.0) the value is kept
/// as a URI instead.
#[derive(Debug, Clone)]
pub struct TextScribe {
    name: &'static str,
    versions: &'static [VCardVersion],
    language_tag: bool,
}

impl TextScribe {
    #[must_use]
    pub const fn new(name: &'static str, versions: &'static [VCardVersion]) -> Self {
        Self {
            name,
            versions,
            language_tag: false,
        }
    }

    #[must_use]
    pub const fn all_versions(name: &'static str) -> Self {
        Self::new(name, &VCardVersion::ALL)
    }

    /// 2.1 and 3.0 only (MAILER, LABEL).
    #[must_use]
    pub const fn legacy(name: &'static str) -> Self {
        Self::new(name, LEGACY)
    }

    /// 3.0 only (SORT-STRING, CLASS, NAME).
    #[must_use]
    pub const fn v3_only(name: &'static str) -> Self {
        Self::new(name, V3_ONLY)
    }

    #[must_use]
    pub const fn formatted_name() -> Self {
        Self::all_versions(names::FN)
    }

    #[must_use]
    pub const fn product_id() -> Self {
        Self::new(names::PRODID, MODERN)
    }

    #[must_use]
    pub const fn kind() -> Self {
        Self::new(names::KIND, V4_ONLY)
    }

    /// LANG, whose 4.0 data type is `language-tag`.
    #[must_use]
    pub const fn language() -> Self {
        Self {
            name: names::LANG,
            versions: V4_ONLY,
            language_tag: true,
        }
    }

    fn text_type(&self) -> VCardDataType {
        if self.language_tag {
            VCardDataType::LanguageTag
        } else {
            VCardDataType::Text
        }
    }

    fn strip_scheme<'a>(&self, value: &'a str) -> &'a str {
        let scheme = match self.name {
            names::EMAIL => "mailto:",
            names::TEL => "tel:",
            _ => return value,
        };
        match value.get(..scheme.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(scheme) => &value[scheme.len()..],
            _ => value,
        }
    }
}

fn is_uri(data_type: Option<&VCardDataType>) -> bool {
    matches!(data_type, Some(VCardDataType::Uri | VCardDataType::Url))
}

impl Scribe for TextScribe {
    fn property_name(&self) -> &str {
        self.name
    }

    fn supported_versions(&self) -> &[VCardVersion] {
        self.versions
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(self.text_type())
    }

    fn data_type(&self, value: &VCardValue, version: VCardVersion) -> Option<VCardDataType> {
        match value {
            VCardValue::Uri(_) => Some(VCardDataType::Uri.for_version(version)),
            _ => Some(self.text_type()),
        }
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        if is_uri(data_type) {
            return ScribeOutcome::Done(VCardValue::Uri(raw.trim().to_string()));
        }
        ScribeOutcome::Done(VCardValue::Text(unescape_text(raw, ctx.policy())))
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        match &property.value {
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
        let text = match value {
            JsonValue::String(s) => s.clone(),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
                .collect::<Vec<_>>()
                .join(","),
            JsonValue::Null => return ScribeOutcome::skip("null jCard value"),
            other => other.to_string(),
        };
        if is_uri(data_type) {
            ScribeOutcome::Done(VCardValue::Uri(text))
        } else {
            ScribeOutcome::Done(VCardValue::Text(text))
        }
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        match &property.value {
            VCardValue::Text(text) => {
                ScribeOutcome::Done(XmlValue::single(self.text_type().as_str(), text.as_str()))
            }
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
        if let Some(text) = element.first(self.text_type().as_str()) {
            return ScribeOutcome::Done(VCardValue::Text(text.to_string()));
        }
        if let Some(uri) = element.first("uri") {
            return ScribeOutcome::Done(VCardValue::Uri(uri.to_string()));
        }
        ScribeOutcome::Fail(ScribeError::cannot_parse(format!(
            "no <{}> or <uri> element",
            self.text_type()
        )))
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let value = match (self.name, element.tag.as_str()) {
            (names::EMAIL | names::TEL, _) => self.strip_scheme(element.value()),
            (_, "a") => element.text.trim(),
            _ => element.value(),
        };
        if value.is_empty() {
            return ScribeOutcome::skip("empty hCard element");
        }
        ScribeOutcome::Done(VCardValue::Text(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcard::scribe::testing;

    #[test]
    fn unescapes_per_version() {
        let scribe = TextScribe::all_versions(names::NOTE);
        assert_eq!(
            testing::read(&scribe, "a\\, b\\nc", VCardVersion::V3_0),
            VCardValue::Text("a, b\nc".to_string())
        );
        assert_eq!(
            testing::read(&scribe, "a\\, b\\nc", VCardVersion::V2_1),
            VCardValue::Text("a\\, b\nc".to_string())
        );
    }

    #[test]
    fn escapes_on_write() {
        let scribe = TextScribe::all_versions(names::NOTE);
        let text = VCardValue::Text("a, b;c".to_string());
        assert_eq!(testing::write(&scribe, text.clone(), VCardVersion::V4_0), "a\\, b\\;c");
        assert_eq!(testing::write(&scribe, text, VCardVersion::V2_1), "a, b\\;c");
    }

    #[test]
    fn tel_uri_value() {
        let scribe = TextScribe::all_versions(names::TEL);
        let mut params = VCardParameters::new();
        params.put("VALUE", "uri");
        let (outcome, _) =
            testing::unmarshal(&scribe, "tel:+1-555-555-5555", &mut params, VCardVersion::V4_0);
        assert_eq!(
            outcome.done(),
            Some(VCardValue::Uri("tel:+1-555-555-5555".to_string()))
        );
        assert_eq!(
            scribe.data_type(&VCardValue::Uri(String::new()), VCardVersion::V4_0),
            Some(VCardDataType::Uri)
        );
    }

    #[test]
    fn wrong_value_type_fails() {
        let scribe = TextScribe::formatted_name();
        let property = VCardProperty::new("FN", VCardValue::TextList(vec!["a".to_string()]));
        let (outcome, _) = testing::marshal(&scribe, &property, VCardVersion::V4_0);
        assert!(matches!(
            outcome,
            ScribeOutcome::Fail(ScribeError::WrongValueType { .. })
        ));
    }

    #[test]
    fn html_email_strips_mailto() {
        let scribe = TextScribe::all_versions(names::EMAIL);
        let mut params = VCardParameters::new();
        let scribes = std::sync::Arc::new(crate::vcard::scribe::ScribeIndex::default());
        let options = crate::vcard::parse::ReaderOptions::default();
        let mut warnings = crate::vcard::core::Warnings::new();
        let mut ctx =
            ParseContext::new(VCardVersion::V4_0, &mut warnings, &scribes, &options);
        let element = HtmlElement::new("a", "write").with_attribute("href", "MAILTO:john@example.com");
        assert_eq!(
            scribe.unmarshal_html(&element, &mut params, &mut ctx).done(),
            Some(VCardValue::Text("john@example.com".to_string()))
        );
    }

    #[test]
    fn language_tag_default_type() {
        let scribe = TextScribe::language();
        assert_eq!(
            scribe.default_data_type(VCardVersion::V4_0),
            Some(VCardDataType::LanguageTag)
        );
        assert_eq!(scribe.supported_versions(), &[VCardVersion::V4_0]);
    }
}
