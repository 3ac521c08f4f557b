//! Tests for the streaming writer.

use cardscribe_core::config::{FoldUnit, WriterConfig};
use cardscribe_core::constants::PRODUCT_ID;

use super::fold::LengthUnit;
use super::writer::{VCardWriter, WriterOptions, write_to_string};
use crate::error::RfcError;
use crate::vcard::core::{
    DateAndOrTime, Gender, Geo, Sex, VCard, VCardParameters, VCardProperty, VCardValue,
    VCardVersion, WarningCode,
};

fn options(version: VCardVersion) -> WriterOptions {
    WriterOptions {
        version,
        include_prodid: false,
        ..WriterOptions::default()
    }
}

fn write(card: &VCard, options: WriterOptions) -> (String, Vec<crate::vcard::core::Warning>) {
    let mut writer = VCardWriter::with_options(Vec::new(), options);
    writer.write(card).expect("write");
    let warnings = writer.take_warnings();
    (
        String::from_utf8(writer.into_inner()).expect("utf-8"),
        warnings,
    )
}

fn card_with(property: VCardProperty) -> VCard {
    let mut card = VCard::new();
    card.add_property(property);
    card
}

#[test_log::test]
fn version_first_then_prodid() {
    let card = card_with(VCardProperty::text("FN", "John Doe"));
    let text = write_to_string(&[card], VCardVersion::V3_0).expect("write");
    assert_eq!(
        text,
        format!(
            "BEGIN:VCARD\r\nVERSION:3.0\r\nPRODID:{PRODUCT_ID}\r\nFN:John Doe\r\nEND:VCARD\r\n"
        )
    );
}

#[test]
fn prodid_is_x_prodid_in_2_1_and_never_duplicated() {
    let card = card_with(VCardProperty::text("FN", "John Doe"));
    let text = write_to_string(&[card], VCardVersion::V2_1).expect("write");
    assert!(text.contains(&format!("\r\nX-PRODID:{PRODUCT_ID}\r\n")));

    let mut card = VCard::new();
    card.add_property(VCardProperty::text("PRODID", "-//Other//EN"));
    let text = write_to_string(&[card], VCardVersion::V4_0).expect("write");
    assert_eq!(text.matches("PRODID").count(), 1);
}

#[test_log::test]
fn existing_product_id_follows_target_version() {
    let card = card_with(VCardProperty::text("PRODID", "-//Acme//Contacts 2.0//EN"));
    let text = write_to_string(&[card], VCardVersion::V2_1).expect("write");
    assert!(text.contains("\r\nX-PRODID:-//Acme//Contacts 2.0//EN\r\n"), "{text}");
    assert_eq!(text.matches("PRODID").count(), 1, "{text}");

    let mut property = VCardProperty::raw("X-PRODID", "-//Acme//Contacts 2.0//EN");
    property.group = Some("item1".to_owned());
    let (text, warnings) = write(&card_with(property), options(VCardVersion::V4_0));
    assert!(warnings.is_empty(), "{warnings:?}");
    assert!(text.contains("\r\nitem1.PRODID:-//Acme//Contacts 2.0//EN\r\n"), "{text}");
    assert!(!text.contains("X-PRODID"), "{text}");
}

#[test]
fn parameters_per_version() {
    let mut params = VCardParameters::new();
    params.put_nameless("WORK");
    params.put_nameless("VOICE");
    params.put("X-NOTE", "a;b");
    let card = card_with(VCardProperty::text("TEL", "+1-555-0100").with_params(params));

    let (text, _) = write(&card, options(VCardVersion::V2_1));
    assert!(text.contains("\r\nTEL;WORK;VOICE;X-NOTE=a\\;b:+1-555-0100\r\n"), "{text}");

    let (text, _) = write(&card, options(VCardVersion::V3_0));
    assert!(text.contains("\r\nTEL;TYPE=WORK,VOICE;X-NOTE=\"a;b\":+1-555-0100\r\n"), "{text}");
}

#[test]
fn caret_encoding_when_enabled() {
    let mut params = VCardParameters::new();
    params.put("LABEL", "Line \"one\"\nLine two");
    let card = card_with(VCardProperty::text("NOTE", "x").with_params(params));

    let opts = WriterOptions {
        caret_encoding: true,
        ..options(VCardVersion::V4_0)
    };
    let (text, warnings) = write(&card, opts);
    assert!(text.contains("NOTE;LABEL=Line ^'one^'^nLine two:x"), "{text}");
    assert!(warnings.is_empty());

    let (text, warnings) = write(&card, options(VCardVersion::V4_0));
    assert!(text.contains("NOTE;LABEL=Line 'one' Line two:x"), "{text}");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, Some(WarningCode::ValueAltered));
    assert_eq!(warnings[0].property_name.as_deref(), Some("NOTE"));
}

#[test]
fn quoted_printable_only_in_2_1() {
    let mut params = VCardParameters::new();
    params.put("ENCODING", "QUOTED-PRINTABLE");
    params.put("CHARSET", "UTF-8");
    let card = card_with(VCardProperty::text("NOTE", "café").with_params(params));

    let (text, _) = write(&card, options(VCardVersion::V2_1));
    assert!(
        text.contains("\r\nNOTE;ENCODING=QUOTED-PRINTABLE;CHARSET=UTF-8:caf=C3=A9\r\n"),
        "{text}"
    );

    let (text, _) = write(&card, options(VCardVersion::V3_0));
    assert!(text.contains("\r\nNOTE:café\r\n"), "{text}");
}

#[test]
fn value_parameter_follows_data_type() {
    let mut params = VCardParameters::new();
    params.put("VALUE", "date-and-or-time");
    let bday = VCardProperty::new(
        "BDAY",
        VCardValue::DateAndOrTime(DateAndOrTime::Text("circa 1800".to_string())),
    );
    let (text, _) = write(&card_with(bday), options(VCardVersion::V4_0));
    assert!(text.contains("\r\nBDAY;VALUE=text:circa 1800\r\n"), "{text}");

    let note = VCardProperty::text("NOTE", "plain").with_params(params);
    let (text, _) = write(&card_with(note), options(VCardVersion::V4_0));
    assert!(text.contains("\r\nNOTE:plain\r\n"), "{text}");
}

#[test]
fn group_is_written() {
    let card = card_with(VCardProperty::text("EMAIL", "a@example.com").with_group("item1"));
    let (text, _) = write(&card, options(VCardVersion::V4_0));
    assert!(text.contains("\r\nitem1.EMAIL:a@example.com\r\n"));
}

#[test]
fn unsupported_property_is_left_out() {
    let card = card_with(VCardProperty::new(
        "GENDER",
        VCardValue::Gender(Gender::sex(Sex::Female)),
    ));
    let (text, warnings) = write(&card, options(VCardVersion::V3_0));
    assert!(!text.contains("GENDER"));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, Some(WarningCode::UnsupportedVersion));

    let (text, warnings) = write(&card, options(VCardVersion::V4_0));
    assert!(text.contains("\r\nGENDER:F\r\n"), "{text}");
    assert!(warnings.is_empty());
}

#[test]
fn typed_value_without_scribe_is_an_error() {
    let card = card_with(VCardProperty::text("X-TYPED", "value"));
    let mut writer = VCardWriter::with_options(Vec::new(), options(VCardVersion::V4_0));
    let err = writer.write(&card).expect_err("no scribe");
    assert!(matches!(err, RfcError::NoScribe { ref name } if name == "X-TYPED"));
}

#[test]
fn scribe_failure_is_an_error() {
    let card = card_with(VCardProperty::new(
        "FN",
        VCardValue::Geo(Geo::new(1.0, 2.0)),
    ));
    let mut writer = VCardWriter::with_options(Vec::new(), options(VCardVersion::V4_0));
    let err = writer.write(&card).expect_err("wrong value type");
    assert!(matches!(err, RfcError::Marshal { ref property, .. } if property == "FN"));
}

#[test]
fn raw_values_are_written_verbatim() {
    let card = card_with(VCardProperty::raw("X-CUSTOM", "a\\,b;c"));
    let (text, _) = write(&card, options(VCardVersion::V2_1));
    assert!(text.contains("\r\nX-CUSTOM:a\\,b;c\r\n"));
}

#[test_log::test]
fn agent_nests_in_2_1() {
    let mut agent = VCard::with_version(VCardVersion::V2_1);
    agent.add_property(VCardProperty::text("FN", "Assistant"));
    let card = card_with(VCardProperty::new(
        "AGENT",
        VCardValue::Agent(Box::new(agent)),
    ));
    let (text, _) = write(&card, options(VCardVersion::V2_1));
    assert_eq!(
        text,
        "BEGIN:VCARD\r\nVERSION:2.1\r\nAGENT:\r\nBEGIN:VCARD\r\nVERSION:2.1\r\n\
         FN:Assistant\r\nEND:VCARD\r\nEND:VCARD\r\n"
    );
}

#[test]
fn long_values_fold() {
    let card = card_with(VCardProperty::text("NOTE", "x".repeat(100)));
    let (text, _) = write(&card, options(VCardVersion::V4_0));
    for line in text.split("\r\n") {
        assert!(line.chars().count() <= 75);
    }
    assert!(text.contains(&format!("NOTE:{}\r\n {}", "x".repeat(70), "x".repeat(30))));
}

#[test]
fn options_from_config() {
    let options = WriterOptions::try_from(&WriterConfig::default()).expect("defaults");
    assert_eq!(options.version, VCardVersion::V3_0);
    assert_eq!(options.folding.max_line_length, Some(75));
    assert!(options.include_prodid);

    let config = WriterConfig {
        fold_lines: false,
        fold_unit: FoldUnit::Utf8Bytes,
        ..WriterConfig::default()
    };
    let options = WriterOptions::try_from(&config).expect("valid");
    assert_eq!(options.folding.max_line_length, None);
    assert_eq!(options.folding.unit, LengthUnit::Utf8Bytes);

    for config in [
        WriterConfig {
            indent: "x".to_string(),
            ..WriterConfig::default()
        },
        WriterConfig {
            newline: "\r\r".to_string(),
            ..WriterConfig::default()
        },
        WriterConfig {
            version: "1.0".to_string(),
            ..WriterConfig::default()
        },
    ] {
        assert!(WriterOptions::try_from(&config).is_err());
    }
}
