//! Pass-through scribe for properties with no registered scribe.

use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::core::{VCardDataType, VCardParameters, VCardProperty, VCardValue, VCardVersion};

/// Keeps the wire value verbatim, escapes included, so unknown and
/// extension properties survive a read/write cycle unchanged.
#[derive(Debug, Clone, Copy)]
pub struct RawScribe;

impl Scribe for RawScribe {
    fn property_name(&self) -> &str {
        ""
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        None
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        ScribeOutcome::Done(VCardValue::Unknown(raw.to_string()))
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        match &property.value {
            VCardValue::Unknown(raw) => ScribeOutcome::Done(raw.clone()),
            _ => ScribeOutcome::Fail(ScribeError::wrong_type(property)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcard::scribe::testing;

    #[test]
    fn keeps_escapes_verbatim() {
        let raw = "a\\,b\\;c\\nd";
        let value = testing::read(&RawScribe, raw, VCardVersion::V3_0);
        assert_eq!(value, VCardValue::Unknown(raw.to_string()));
        let property = VCardProperty::raw("X-CUSTOM", raw);
        let (outcome, _) = testing::marshal(&RawScribe, &property, VCardVersion::V2_1);
        assert_eq!(outcome.done().as_deref(), Some(raw));
    }

    #[test]
    fn rejects_typed_values() {
        let property = VCardProperty::text("X-CUSTOM", "typed");
        let (outcome, _) = testing::marshal(&RawScribe, &property, VCardVersion::V4_0);
        assert!(!outcome.is_done());
    }
}
