//! GEO scribe.
//!
//! | Version | Wire form |
//! |---|---|
//! | 2.1 | `37.386013,-122.082932` |
//! | 3.0 | `37.386013;-122.082932` |
//! | 4.0 | `geo:37.386013,-122.082932` |
//!
//! Any of the three is accepted on read.

use serde_json::Value as JsonValue;

use super::format::{HtmlElement, XmlValue};
use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::core::{
    Geo, VCardDataType, VCardParameters, VCardProperty, VCardValue, VCardVersion, names,
};

const GEO_SCHEME: &str = "geo:";

fn parse_geo(raw: &str) -> Result<Geo, ScribeError> {
    let raw = raw.trim();
    let coordinates = match raw.get(..GEO_SCHEME.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(GEO_SCHEME) => {
            // geo: URI parameters such as `;u=10` follow the coordinates.
            let uri = &raw[GEO_SCHEME.len()..];
            uri.split(';').next().unwrap_or_default()
        }
        _ => raw,
    };
    let mut parts = coordinates.split([';', ',']).map(str::trim);
    let (Some(lat), Some(lon)) = (parts.next(), parts.next()) else {
        return Err(ScribeError::cannot_parse(format!("GEO needs two coordinates: {raw}")));
    };
    let latitude = lat
        .parse::<f64>()
        .map_err(|err| ScribeError::cannot_parse(format!("invalid latitude {lat}: {err}")))?;
    let longitude = lon
        .parse::<f64>()
        .map_err(|err| ScribeError::cannot_parse(format!("invalid longitude {lon}: {err}")))?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(ScribeError::cannot_parse(format!(
            "coordinates out of range: {latitude},{longitude}"
        )));
    }
    Ok(Geo::new(latitude, longitude))
}

fn geo_uri(geo: &Geo) -> String {
    format!("{GEO_SCHEME}{},{}", geo.latitude, geo.longitude)
}

#[derive(Debug, Clone, Copy)]
pub struct GeoScribe;

impl GeoScribe {
    fn geo(property: &VCardProperty) -> Result<&Geo, ScribeError> {
        match &property.value {
            VCardValue::Geo(geo) => Ok(geo),
            _ => Err(ScribeError::wrong_type(property)),
        }
    }
}

impl Scribe for GeoScribe {
    fn property_name(&self) -> &str {
        names::GEO
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V2_1 | VCardVersion::V3_0 => Some(VCardDataType::Float),
            VCardVersion::V4_0 => Some(VCardDataType::Uri),
        }
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        if raw.trim().is_empty() {
            return ScribeOutcome::skip("empty GEO value");
        }
        parse_geo(raw).map(VCardValue::Geo).into()
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        let version = ctx.version;
        Self::geo(property)
            .map(|geo| match version {
                VCardVersion::V2_1 => format!("{},{}", geo.latitude, geo.longitude),
                VCardVersion::V3_0 => format!("{};{}", geo.latitude, geo.longitude),
                VCardVersion::V4_0 => geo_uri(geo),
            })
            .into()
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        Self::geo(property)
            .map(|geo| JsonValue::String(geo_uri(geo)))
            .into()
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let parsed = match value {
            JsonValue::String(uri) => parse_geo(uri),
            JsonValue::Array(items) => match (
                items.first().and_then(JsonValue::as_f64),
                items.get(1).and_then(JsonValue::as_f64),
            ) {
                (Some(lat), Some(lon)) => Ok(Geo::new(lat, lon)),
                _ => Err(ScribeError::cannot_parse("jCard GEO array needs two numbers")),
            },
            _ => Err(ScribeError::cannot_parse("jCard GEO must be a string")),
        };
        parsed.map(VCardValue::Geo).into()
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        Self::geo(property)
            .map(|geo| XmlValue::single("uri", geo_uri(geo)))
            .into()
    }

    fn unmarshal_xml(
        &self,
        element: &XmlValue,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        match element.first("uri") {
            Some(uri) => parse_geo(uri).map(VCardValue::Geo).into(),
            None => ScribeOutcome::Fail(ScribeError::cannot_parse("no <uri> element")),
        }
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let latitude = element.find_class("latitude").first().map(|e| e.value());
        let longitude = element.find_class("longitude").first().map(|e| e.value());
        let parsed = match (latitude, longitude) {
            (Some(lat), Some(lon)) => parse_geo(&format!("{lat};{lon}")),
            _ => parse_geo(element.value()),
        };
        parsed.map(VCardValue::Geo).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcard::scribe::testing;

    fn sample() -> VCardValue {
        VCardValue::Geo(Geo::new(37.386_013, -122.082_932))
    }

    #[test]
    fn reads_every_wire_form() {
        for (raw, version) in [
            ("37.386013,-122.082932", VCardVersion::V2_1),
            ("37.386013;-122.082932", VCardVersion::V3_0),
            ("geo:37.386013,-122.082932", VCardVersion::V4_0),
            ("GEO:37.386013,-122.082932;u=10", VCardVersion::V4_0),
        ] {
            assert_eq!(testing::read(&GeoScribe, raw, version), sample(), "{raw}");
        }
    }

    #[test]
    fn writes_per_version() {
        assert_eq!(
            testing::write(&GeoScribe, sample(), VCardVersion::V2_1),
            "37.386013,-122.082932"
        );
        assert_eq!(
            testing::write(&GeoScribe, sample(), VCardVersion::V3_0),
            "37.386013;-122.082932"
        );
        assert_eq!(
            testing::write(&GeoScribe, sample(), VCardVersion::V4_0),
            "geo:37.386013,-122.082932"
        );
    }

    #[test]
    fn rejects_bad_coordinates() {
        let mut params = VCardParameters::new();
        for raw in ["37.3", "north;south", "95.0;10.0"] {
            let (outcome, _) = testing::unmarshal(&GeoScribe, raw, &mut params, VCardVersion::V3_0);
            assert!(matches!(outcome, ScribeOutcome::Fail(_)), "{raw}");
        }
    }
}
