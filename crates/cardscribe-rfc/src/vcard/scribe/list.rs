//! Scribe for comma-separated text lists (CATEGORIES, NICKNAME).

use serde_json::Value as JsonValue;

use super::format::{HtmlElement, XmlValue};
use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::codec::{join_list, split_list};
use crate::vcard::core::{VCardDataType, VCardParameters, VCardProperty, VCardValue, VCardVersion};

const MODERN: &[VCardVersion] = &[VCardVersion::V3_0, VCardVersion::V4_0];

#[derive(Debug, Clone)]
pub struct ListScribe {
    name: &'static str,
}

impl ListScribe {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    fn items(property: &VCardProperty) -> Result<Vec<String>, ScribeError> {
        match &property.value {
            VCardValue::TextList(items) => Ok(items.clone()),
            VCardValue::Text(text) => Ok(vec![text.clone()]),
            _ => Err(ScribeError::wrong_type(property)),
        }
    }
}

impl Scribe for ListScribe {
    fn property_name(&self) -> &str {
        self.name
    }

    fn supported_versions(&self) -> &[VCardVersion] {
        MODERN
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Text)
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        ScribeOutcome::Done(VCardValue::TextList(split_list(raw, ctx.policy())))
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        let policy = ctx.policy();
        Self::items(property)
            .map(|items| join_list(&items, policy))
            .into()
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        Self::items(property)
            .map(|items| JsonValue::Array(items.into_iter().map(JsonValue::String).collect()))
            .into()
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let items = match value {
            JsonValue::Array(items) => items
                .iter()
                .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
                .collect(),
            JsonValue::String(s) => vec![s.clone()],
            JsonValue::Null => Vec::new(),
            other => vec![other.to_string()],
        };
        ScribeOutcome::Done(VCardValue::TextList(items))
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        Self::items(property)
            .map(|items| {
                let mut value = XmlValue::new();
                for item in items {
                    value.push("text", item);
                }
                value
            })
            .into()
    }

    fn unmarshal_xml(
        &self,
        element: &XmlValue,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let items = element.all("text");
        if items.is_empty() {
            return ScribeOutcome::Fail(ScribeError::cannot_parse("no <text> elements"));
        }
        ScribeOutcome::Done(VCardValue::TextList(items))
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let value = element.value();
        if value.is_empty() {
            return ScribeOutcome::skip("empty hCard element");
        }
        ScribeOutcome::Done(VCardValue::TextList(vec![value.to_string()]))
    }
}
