//! vCard property types.

use super::parameter::{VCardParameters, names as param_names};
use super::value::VCardValue;

/// A typed vCard property.
#[derive(Debug, Clone, PartialEq)]
pub struct VCardProperty {
    /// Optional property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name, case preserved from the wire.
    pub name: String,
    /// Parameters in order of appearance.
    pub params: VCardParameters,
    pub value: VCardValue,
}

impl VCardProperty {
    #[must_use]
    pub fn new(name: impl Into<String>, value: VCardValue) -> Self {
        Self {
            group: None,
            name: name.into(),
            params: VCardParameters::new(),
            value,
        }
    }

    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, VCardValue::Text(value.into()))
    }

    #[must_use]
    pub fn uri(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, VCardValue::Uri(value.into()))
    }

    /// Creates a property holding a raw, still-escaped wire value.
    #[must_use]
    pub fn raw(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, VCardValue::Unknown(value.into()))
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: VCardParameters) -> Self {
        self.params = params;
        self
    }

    /// Returns whether the name matches, ignoring case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns whether this property has the specified TYPE value.
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.params.has_type(type_value)
    }

    pub fn add_type(&mut self, type_value: impl Into<String>) {
        self.params.add_type(type_value);
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Returns the `LANGUAGE` parameter.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.params.first(param_names::LANGUAGE)
    }
}

/// Common property names as constants.
pub mod names {
    // Identification
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const NICKNAME: &str = "NICKNAME";
    pub const PHOTO: &str = "PHOTO";
    pub const BDAY: &str = "BDAY";
    pub const ANNIVERSARY: &str = "ANNIVERSARY";
    pub const DEATHDATE: &str = "DEATHDATE";
    pub const GENDER: &str = "GENDER";
    pub const SORT_STRING: &str = "SORT-STRING";

    // Delivery addressing
    pub const ADR: &str = "ADR";
    pub const LABEL: &str = "LABEL";

    // Communications
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";
    pub const MAILER: &str = "MAILER";
    pub const IMPP: &str = "IMPP";
    pub const LANG: &str = "LANG";

    // Geographical
    pub const TZ: &str = "TZ";
    pub const GEO: &str = "GEO";

    // Organizational
    pub const TITLE: &str = "TITLE";
    pub const ROLE: &str = "ROLE";
    pub const LOGO: &str = "LOGO";
    pub const AGENT: &str = "AGENT";
    pub const ORG: &str = "ORG";
    pub const MEMBER: &str = "MEMBER";

    // Explanatory
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const NOTE: &str = "NOTE";
    pub const PRODID: &str = "PRODID";
    pub const X_PRODID: &str = "X-PRODID";
    pub const REV: &str = "REV";
    pub const SOUND: &str = "SOUND";
    pub const UID: &str = "UID";
    pub const URL: &str = "URL";
    pub const CLASS: &str = "CLASS";

    // Security
    pub const KEY: &str = "KEY";

    // Calendar
    pub const FBURL: &str = "FBURL";
    pub const CALADRURI: &str = "CALADRURI";
    pub const CALURI: &str = "CALURI";

    // General/structural
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
    pub const VERSION: &str = "VERSION";
    pub const SOURCE: &str = "SOURCE";
    pub const NAME: &str = "NAME";
    pub const KIND: &str = "KIND";

    /// Component name carried by `BEGIN` and `END`.
    pub const VCARD: &str = "VCARD";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_text() {
        let prop = VCardProperty::text("FN", "John Doe");
        assert_eq!(prop.name, "FN");
        assert_eq!(prop.as_text(), Some("John Doe"));
    }

    #[test]
    fn property_grouped() {
        let prop = VCardProperty::text("tel", "+1-555-555-5555").with_group("item1");
        assert_eq!(prop.group.as_deref(), Some("item1"));
        assert!(prop.is_named("TEL"));
    }

    #[test]
    fn property_with_types() {
        let mut prop = VCardProperty::text("TEL", "+1-555-555-5555");
        prop.add_type("home");
        prop.add_type("voice");

        assert!(prop.has_type("home"));
        assert!(prop.has_type("VOICE"));
    }
}
