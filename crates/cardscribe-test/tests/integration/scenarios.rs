//! End-to-end scenarios for the line pipeline.

use std::sync::Arc;

use cardscribe_test::rfc::vcard::build::{FoldedLineWriter, FoldingScheme};
use cardscribe_test::rfc::vcard::core::VCardProperty;
use cardscribe_test::rfc::vcard::parse::{parse_line, unfold};
use cardscribe_test::rfc::vcard::{
    ScribeIndex, VCardReader, VCardValue, VCardVersion, VCardWriter, WarningCode, parse,
};

use super::helpers::*;

/// ## Summary
/// 2.1 nameless parameters keep their order and the raw value keeps its
/// leading space.
#[test_log::test]
fn nameless_parameters_in_2_1() {
    let line = parse_line(
        "ADR;WORK;DOM: ;;123 Main Str;Austin;TX;12345;US",
        1,
        VCardVersion::V2_1.policy(),
        false,
    )
    .expect("valid line");

    let params: Vec<_> = line
        .parameters
        .iter()
        .map(|p| (p.key.as_deref(), p.value.as_str()))
        .collect();
    assert_eq!(params, vec![(None, "WORK"), (None, "DOM")]);
    assert_eq!(line.value, " ;;123 Main Str;Austin;TX;12345;US");
    assert_eq!(line.parameters.types(), vec!["WORK", "DOM"]);
}

/// ## Summary
/// A folded continuation loses exactly its one leading fold character.
#[test_log::test]
fn folded_line_unfolds() {
    let lines = unfold("NOTE:line1\r\n second\r\n").expect("in-memory input");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "NOTE:line1second");
    assert_eq!(lines[0].line_number, 1);

    let line = parse_line(&lines[0].text, 1, VCardVersion::V3_0.policy(), true)
        .expect("valid line");
    assert_eq!(line.value, "line1second");

    let lines = unfold("NOTE:a\r\n\t b\r\nFN:x\r\n").expect("in-memory input");
    let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["NOTE:a b", "FN:x"]);
    assert_eq!(lines[1].line_number, 3);
}

/// ## Summary
/// Column state carries across `write` calls.
#[test_log::test]
fn fold_across_writes() {
    let mut writer = FoldedLineWriter::new(
        Vec::new(),
        FoldingScheme::default().with_max_line_length(10),
    );
    for piece in ["This line should be", " new line", "aaline"] {
        writer.write(piece).expect("write");
    }
    let out = String::from_utf8(writer.into_inner()).expect("utf-8");
    assert_eq!(out, "This line \r\n should be\r\n  new line\r\n aaline");
    assert_eq!(unfolded(&out), "This line should be new lineaaline");
}

/// ## Summary
/// An unparseable line between two properties yields one warning and both
/// properties survive.
#[test_log::test]
fn invalid_line_is_skipped() {
    let parsed = parse(
        "BEGIN:VCARD\r\n\
         VERSION:3.0\r\n\
         FN:John Doe\r\n\
         this line has no delimiter\r\n\
         NOTE:still here\r\n\
         END:VCARD\r\n",
    );
    assert_eq!(parsed.cards.len(), 1);
    assert_eq!(codes(&parsed.warnings), vec![WarningCode::InvalidLine]);
    assert_eq!(parsed.warnings[0].line_number, Some(4));

    let card = &parsed.cards[0];
    assert_eq!(card.formatted_name(), Some("John Doe"));
    assert_eq!(
        card.property("NOTE").and_then(VCardProperty::as_text),
        Some("still here")
    );
}

/// ## Summary
/// Properties without a scribe keep their name, parameters and value
/// byte for byte.
#[test_log::test]
fn unknown_property_round_trips_raw() {
    let input = "BEGIN:VCARD\r\n\
                 VERSION:4.0\r\n\
                 item2.X-Thing;X-A=1:odd \\, value\\n;kept\r\n\
                 END:VCARD\r\n";
    let parsed = parse(input);
    assert!(parsed.warnings.is_empty());

    let property = parsed.cards[0].property("x-thing").expect("kept");
    assert_eq!(property.name, "X-Thing");
    assert_eq!(property.group.as_deref(), Some("item2"));
    assert_eq!(
        property.value,
        VCardValue::Unknown("odd \\, value\\n;kept".to_string())
    );

    let output = write_cards(&parsed.cards, writer_options(VCardVersion::V4_0));
    assert_eq!(output, input);
}

/// ## Summary
/// With an empty registry every property reads and writes raw.
#[test_log::test]
fn empty_registry_passes_everything_through() {
    let input = "BEGIN:VCARD\r\n\
                 VERSION:3.0\r\n\
                 NOTE;LANGUAGE=en:a\\,b\\nc\r\n\
                 BDAY:not a date\r\n\
                 END:VCARD\r\n";
    let scribes = Arc::new(ScribeIndex::empty());

    let mut reader = VCardReader::new(input.as_bytes()).with_scribes(Arc::clone(&scribes));
    let card = reader.read_next().expect("read").expect("one card");
    assert!(reader.warnings().is_empty());
    assert!(matches!(
        card.property("BDAY").map(|p| &p.value),
        Some(VCardValue::Unknown(_))
    ));

    let mut writer = VCardWriter::with_options(Vec::new(), writer_options(VCardVersion::V3_0))
        .with_scribes(scribes);
    writer.write(&card).expect("write");
    assert!(writer.warnings().is_empty());
    assert_eq!(String::from_utf8(writer.into_inner()).expect("utf-8"), input);
}
