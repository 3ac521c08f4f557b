//! Scribes for structured values: N, ADR, ORG and GENDER.

use serde_json::Value as JsonValue;

use super::format::{HtmlElement, XmlValue};
use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::codec::{escape_text, join_structured, split_structured, split_unescaped, unescape_text};
use crate::vcard::core::{
    Address, Gender, Organization, Sex, StructuredName, VCardDataType, VCardParameters,
    VCardProperty, VCardValue, VCardVersion, names,
};

const V4_ONLY: &[VCardVersion] = &[VCardVersion::V4_0];

const NAME_ELEMENTS: [&str; 5] = ["surname", "given", "additional", "prefix", "suffix"];
const NAME_CLASSES: [&str; 5] = [
    "family-name",
    "given-name",
    "additional-name",
    "honorific-prefix",
    "honorific-suffix",
];

const ADR_ELEMENTS: [&str; 7] = ["pobox", "ext", "street", "locality", "region", "code", "country"];
const ADR_CLASSES: [&str; 7] = [
    "post-office-box",
    "extended-address",
    "street-address",
    "locality",
    "region",
    "postal-code",
    "country-name",
];

/// jCard structured value: one entry per component, a string for zero or
/// one item and an array for more.
fn components_to_json(components: &[&[String]]) -> JsonValue {
    JsonValue::Array(
        components
            .iter()
            .map(|items| match items {
                [] => JsonValue::String(String::new()),
                [single] => JsonValue::String(single.clone()),
                many => JsonValue::Array(many.iter().cloned().map(JsonValue::String).collect()),
            })
            .collect(),
    )
}

fn components_from_json(value: &JsonValue) -> Result<Vec<Vec<String>>, ScribeError> {
    let items = value
        .as_array()
        .ok_or_else(|| ScribeError::cannot_parse("jCard structured value must be an array"))?;
    Ok(items
        .iter()
        .map(|item| match item {
            JsonValue::String(s) if s.is_empty() => Vec::new(),
            JsonValue::String(s) => vec![s.clone()],
            JsonValue::Array(values) => values
                .iter()
                .filter_map(JsonValue::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            JsonValue::Null => Vec::new(),
            other => vec![other.to_string()],
        })
        .collect())
}

fn components_to_xml(components: &[&[String]], element_names: &[&str]) -> XmlValue {
    let mut value = XmlValue::new();
    for (items, name) in components.iter().zip(element_names) {
        if items.is_empty() {
            value.push(*name, "");
        }
        for item in *items {
            value.push(*name, item.as_str());
        }
    }
    value
}

fn components_from_xml(element: &XmlValue, element_names: &[&str]) -> Vec<Vec<String>> {
    element_names
        .iter()
        .map(|name| {
            element
                .all(name)
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect()
        })
        .collect()
}

fn components_from_html(element: &HtmlElement, classes: &[&str]) -> Vec<Vec<String>> {
    classes
        .iter()
        .map(|class| {
            element
                .find_class(class)
                .into_iter()
                .map(HtmlElement::value)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// N: family;given;additional;prefixes;suffixes.
#[derive(Debug, Clone, Copy)]
pub struct NameScribe;

impl NameScribe {
    fn name(property: &VCardProperty) -> Result<&StructuredName, ScribeError> {
        property
            .value
            .as_structured_name()
            .ok_or_else(|| ScribeError::wrong_type(property))
    }
}

impl Scribe for NameScribe {
    fn property_name(&self) -> &str {
        names::N
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
        let components = split_structured(raw, ctx.policy());
        ScribeOutcome::Done(VCardValue::StructuredName(StructuredName::from_components(
            components,
        )))
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        let policy = ctx.policy();
        Self::name(property)
            .map(|name| join_structured(&name.components(), policy))
            .into()
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        Self::name(property)
            .map(|name| components_to_json(&name.components()))
            .into()
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        components_from_json(value)
            .map(|c| VCardValue::StructuredName(StructuredName::from_components(c)))
            .into()
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        Self::name(property)
            .map(|name| components_to_xml(&name.components(), &NAME_ELEMENTS))
            .into()
    }

    fn unmarshal_xml(
        &self,
        element: &XmlValue,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let components = components_from_xml(element, &NAME_ELEMENTS);
        ScribeOutcome::Done(VCardValue::StructuredName(StructuredName::from_components(
            components,
        )))
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let name = StructuredName::from_components(components_from_html(element, &NAME_CLASSES));
        if name.is_empty() {
            return ScribeOutcome::skip("hCard n element has no name parts");
        }
        ScribeOutcome::Done(VCardValue::StructuredName(name))
    }
}

/// ADR: pobox;ext;street;locality;region;code;country.
#[derive(Debug, Clone, Copy)]
pub struct AddressScribe;

impl AddressScribe {
    fn address(property: &VCardProperty) -> Result<&Address, ScribeError> {
        property
            .value
            .as_address()
            .ok_or_else(|| ScribeError::wrong_type(property))
    }
}

impl Scribe for AddressScribe {
    fn property_name(&self) -> &str {
        names::ADR
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
        let components = split_structured(raw, ctx.policy());
        ScribeOutcome::Done(VCardValue::Address(Address::from_components(components)))
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        let policy = ctx.policy();
        Self::address(property)
            .map(|adr| join_structured(&adr.components(), policy))
            .into()
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        Self::address(property)
            .map(|adr| components_to_json(&adr.components()))
            .into()
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        components_from_json(value)
            .map(|c| VCardValue::Address(Address::from_components(c)))
            .into()
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        Self::address(property)
            .map(|adr| components_to_xml(&adr.components(), &ADR_ELEMENTS))
            .into()
    }

    fn unmarshal_xml(
        &self,
        element: &XmlValue,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let components = components_from_xml(element, &ADR_ELEMENTS);
        ScribeOutcome::Done(VCardValue::Address(Address::from_components(components)))
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let address = Address::from_components(components_from_html(element, &ADR_CLASSES));
        if address.is_empty() {
            return ScribeOutcome::skip("hCard adr element has no address parts");
        }
        ScribeOutcome::Done(VCardValue::Address(address))
    }
}

/// ORG: name;unit;unit... Components never split on commas.
#[derive(Debug, Clone, Copy)]
pub struct OrganizationScribe;

impl OrganizationScribe {
    fn organization(property: &VCardProperty) -> Result<&Organization, ScribeError> {
        property
            .value
            .as_organization()
            .ok_or_else(|| ScribeError::wrong_type(property))
    }

    fn from_values(mut values: Vec<String>) -> Organization {
        if values.is_empty() {
            return Organization::default();
        }
        let name = values.remove(0);
        Organization::with_units(name, values)
    }
}

impl Scribe for OrganizationScribe {
    fn property_name(&self) -> &str {
        names::ORG
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
        let policy = ctx.policy();
        let values = split_unescaped(raw, ';', policy)
            .into_iter()
            .map(|component| unescape_text(component, policy))
            .collect();
        ScribeOutcome::Done(VCardValue::Organization(Self::from_values(values)))
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        let policy = ctx.policy();
        Self::organization(property)
            .map(|org| {
                std::iter::once(&org.name)
                    .chain(&org.units)
                    .map(|part| escape_text(part, policy))
                    .collect::<Vec<_>>()
                    .join(";")
            })
            .into()
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        Self::organization(property)
            .map(|org| {
                if org.units.is_empty() {
                    return JsonValue::String(org.name.clone());
                }
                JsonValue::Array(
                    std::iter::once(&org.name)
                        .chain(&org.units)
                        .cloned()
                        .map(JsonValue::String)
                        .collect(),
                )
            })
            .into()
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let values = match value {
            JsonValue::String(s) => vec![s.clone()],
            JsonValue::Array(items) => items
                .iter()
                .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
                .collect(),
            _ => {
                return ScribeOutcome::Fail(ScribeError::cannot_parse(
                    "jCard ORG must be a string or an array",
                ));
            }
        };
        ScribeOutcome::Done(VCardValue::Organization(Self::from_values(values)))
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        Self::organization(property)
            .map(|org| {
                let mut value = XmlValue::single("text", org.name.as_str());
                for unit in &org.units {
                    value.push("text", unit.as_str());
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
        let values = element.all("text");
        if values.is_empty() {
            return ScribeOutcome::Fail(ScribeError::cannot_parse("no <text> elements"));
        }
        ScribeOutcome::Done(VCardValue::Organization(Self::from_values(values)))
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let name = element
            .find_class("organization-name")
            .first()
            .map_or_else(|| element.value(), |e| e.value())
            .to_string();
        let units = element
            .find_class("organization-unit")
            .into_iter()
            .map(|e| e.value().to_string())
            .collect();
        let org = Organization::with_units(name, units);
        if org.is_empty() {
            return ScribeOutcome::skip("empty hCard org element");
        }
        ScribeOutcome::Done(VCardValue::Organization(org))
    }
}

/// GENDER (4.0): sex;identity.
#[derive(Debug, Clone, Copy)]
pub struct GenderScribe;

impl GenderScribe {
    fn gender(property: &VCardProperty) -> Result<&Gender, ScribeError> {
        match &property.value {
            VCardValue::Gender(gender) => Ok(gender),
            _ => Err(ScribeError::wrong_type(property)),
        }
    }

    fn parse_sex(sex: &str) -> Result<Option<Sex>, ScribeError> {
        let sex = sex.trim();
        let mut chars = sex.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(None),
            (Some(c), None) => Sex::from_char(c)
                .map(Some)
                .ok_or_else(|| ScribeError::cannot_parse(format!("unknown sex value: {sex}"))),
            _ => Err(ScribeError::cannot_parse(format!("unknown sex value: {sex}"))),
        }
    }

    fn build(sex: &str, identity: Option<String>) -> Result<Gender, ScribeError> {
        Ok(Gender {
            sex: Self::parse_sex(sex)?,
            identity: identity.filter(|s| !s.is_empty()),
        })
    }
}

impl Scribe for GenderScribe {
    fn property_name(&self) -> &str {
        names::GENDER
    }

    fn supported_versions(&self) -> &[VCardVersion] {
        V4_ONLY
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
        let policy = ctx.policy();
        let (sex, identity) = match split_unescaped(raw, ';', policy).as_slice() {
            [sex] => (*sex, None),
            [sex, rest @ ..] => (*sex, Some(unescape_text(&rest.join(";"), policy))),
            [] => ("", None),
        };
        Self::build(sex, identity).map(VCardValue::Gender).into()
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        let policy = ctx.policy();
        Self::gender(property)
            .map(|gender| {
                let mut out = gender.sex.map(|s| s.as_char().to_string()).unwrap_or_default();
                if let Some(identity) = &gender.identity {
                    out.push(';');
                    out.push_str(&escape_text(identity, policy));
                }
                out
            })
            .into()
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        Self::gender(property)
            .map(|gender| {
                let sex = gender.sex.map(|s| s.as_char().to_string()).unwrap_or_default();
                match &gender.identity {
                    Some(identity) => JsonValue::Array(vec![
                        JsonValue::String(sex),
                        JsonValue::String(identity.clone()),
                    ]),
                    None => JsonValue::String(sex),
                }
            })
            .into()
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let (sex, identity) = match value {
            JsonValue::String(s) => (s.as_str(), None),
            JsonValue::Array(items) => (
                items.first().and_then(JsonValue::as_str).unwrap_or_default(),
                items.get(1).and_then(JsonValue::as_str).map(str::to_string),
            ),
            _ => {
                return ScribeOutcome::Fail(ScribeError::cannot_parse(
                    "jCard GENDER must be a string or an array",
                ));
            }
        };
        Self::build(sex, identity).map(VCardValue::Gender).into()
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        Self::gender(property)
            .map(|gender| {
                let sex = gender.sex.map(|s| s.as_char().to_string()).unwrap_or_default();
                let mut value = XmlValue::single("sex", sex);
                if let Some(identity) = &gender.identity {
                    value.push("identity", identity.as_str());
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
        let sex = element.first("sex").unwrap_or_default();
        let identity = element.first("identity").map(str::to_string);
        Self::build(sex, identity).map(VCardValue::Gender).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcard::scribe::testing;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn name_multi_valued_in_3_0() {
        let value = testing::read(&NameScribe, "Doe;John;Q.,Public;Dr.;", VCardVersion::V3_0);
        let name = value.as_structured_name().expect("structured name");
        assert_eq!(name.family, strings(&["Doe"]));
        assert_eq!(name.additional, strings(&["Q.", "Public"]));
        assert_eq!(name.prefixes, strings(&["Dr."]));
        assert!(name.suffixes.is_empty());
    }

    #[test]
    fn name_commas_literal_in_2_1() {
        let value = testing::read(&NameScribe, "Doe;John;Q.,Public", VCardVersion::V2_1);
        let name = value.as_structured_name().expect("structured name");
        assert_eq!(name.additional, strings(&["Q.,Public"]));
    }

    #[test]
    fn name_writes_all_components() {
        let name = StructuredName::simple("Doe", "John");
        assert_eq!(
            testing::write(&NameScribe, VCardValue::StructuredName(name), VCardVersion::V4_0),
            "Doe;John;;;"
        );
    }

    #[test]
    fn address_round_trip() {
        let raw = ";;123 Main St\\, Apt 4;Springfield;IL;62701;USA";
        let value = testing::read(&AddressScribe, raw, VCardVersion::V4_0);
        let adr = value.as_address().expect("address");
        assert_eq!(adr.street, strings(&["123 Main St, Apt 4"]));
        assert_eq!(adr.country, strings(&["USA"]));
        assert_eq!(testing::write(&AddressScribe, value, VCardVersion::V4_0), raw);
    }

    #[test]
    fn organization_units() {
        let value = testing::read(&OrganizationScribe, "ABC\\, Inc.;North;Sales", VCardVersion::V3_0);
        assert_eq!(
            value,
            VCardValue::Organization(Organization::with_units(
                "ABC, Inc.",
                strings(&["North", "Sales"])
            ))
        );
        assert_eq!(
            testing::write(&OrganizationScribe, value, VCardVersion::V3_0),
            "ABC\\, Inc.;North;Sales"
        );
    }

    #[test]
    fn gender_with_identity() {
        let value = testing::read(&GenderScribe, "O;intersex", VCardVersion::V4_0);
        assert_eq!(value, VCardValue::Gender(Gender::full(Sex::Other, "intersex")));
        assert_eq!(testing::write(&GenderScribe, value, VCardVersion::V4_0), "O;intersex");
    }

    #[test]
    fn gender_identity_only() {
        let value = testing::read(&GenderScribe, ";it's complicated", VCardVersion::V4_0);
        assert_eq!(
            value,
            VCardValue::Gender(Gender {
                sex: None,
                identity: Some("it's complicated".to_string()),
            })
        );
    }

    #[test]
    fn gender_rejects_unknown_sex() {
        let mut params = VCardParameters::new();
        let (outcome, _) = testing::unmarshal(&GenderScribe, "X", &mut params, VCardVersion::V4_0);
        assert!(matches!(outcome, ScribeOutcome::Fail(ScribeError::CannotParse(_))));
    }

    #[test]
    fn name_from_hcard() {
        let element = HtmlElement::new("div", "")
            .with_class("n")
            .with_child(HtmlElement::new("span", "Doe").with_class("family-name"))
            .with_child(HtmlElement::new("span", "John").with_class("given-name"));
        let scribes = std::sync::Arc::new(crate::vcard::scribe::ScribeIndex::default());
        let options = crate::vcard::parse::ReaderOptions::default();
        let mut warnings = crate::vcard::core::Warnings::new();
        let mut ctx = ParseContext::new(VCardVersion::V4_0, &mut warnings, &scribes, &options);
        let mut params = VCardParameters::new();
        assert_eq!(
            NameScribe.unmarshal_html(&element, &mut params, &mut ctx).done(),
            Some(VCardValue::StructuredName(StructuredName::simple("Doe", "John")))
        );
    }
}
