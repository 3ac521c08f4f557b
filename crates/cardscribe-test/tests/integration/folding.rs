//! Folding invariants for the line writer and the full writer.

use cardscribe_test::rfc::vcard::build::{FoldedLineWriter, FoldingScheme, LengthUnit};
use cardscribe_test::rfc::vcard::core::{VCard, VCardProperty};
use cardscribe_test::rfc::vcard::{VCardVersion, WriterOptions, parse};
use proptest::prelude::*;

use super::helpers::*;

fn fold(text: &str, scheme: FoldingScheme) -> String {
    let mut writer = FoldedLineWriter::new(Vec::new(), scheme);
    writer.write(text).expect("write");
    writer.end_line().expect("end line");
    String::from_utf8(writer.into_inner()).expect("utf-8")
}

fn version() -> impl Strategy<Value = VCardVersion> {
    prop_oneof![
        Just(VCardVersion::V2_1),
        Just(VCardVersion::V3_0),
        Just(VCardVersion::V4_0),
    ]
}

#[test_log::test]
fn byte_unit_counts_octets() {
    let scheme = FoldingScheme {
        unit: LengthUnit::Utf8Bytes,
        ..FoldingScheme::default().with_max_line_length(8)
    };
    let out = fold("NOTE:ééé", scheme);
    assert_eq!(out, "NOTE:é\r\n éé\r\n");

    let out = fold("NOTE:ééé", FoldingScheme::default().with_max_line_length(8));
    assert_eq!(out, "NOTE:ééé\r\n");
}

#[test_log::test]
fn custom_newline_and_indent() {
    let scheme = FoldingScheme {
        indent: "\t".to_string(),
        newline: "\n".to_string(),
        ..FoldingScheme::default().with_max_line_length(6)
    };
    assert_eq!(fold("FN:abcdef", scheme), "FN:abc\n\tdef\n");
}

proptest! {
    #[test]
    fn unfolding_restores_text(text in "\\PC{0,200}", max in 1usize..100) {
        let out = fold(&text, FoldingScheme::default().with_max_line_length(max));
        let body = out.strip_suffix("\r\n").expect("terminated");
        prop_assert_eq!(unfolded(body), text);
    }

    #[test]
    fn lines_fit_in_octets(text in "\\PC{0,200}", max in 5usize..100) {
        let scheme = FoldingScheme {
            unit: LengthUnit::Utf8Bytes,
            ..FoldingScheme::default().with_max_line_length(max)
        };
        let out = fold(&text, scheme);
        for line in out.split("\r\n") {
            prop_assert!(line.len() <= max, "{:?} is longer than {}", line, max);
        }
    }

    #[test]
    fn written_text_reads_back(
        value in "[a-zA-Z0-9 ,;:.\"'^=éß日本\n]{0,200}",
        max in 5usize..80,
        version in version(),
    ) {
        let mut card = VCard::with_version(version);
        card.add_property(VCardProperty::text("NOTE", value.clone()));
        let options = WriterOptions {
            folding: FoldingScheme::default().with_max_line_length(max),
            ..writer_options(version)
        };
        let text = write_cards(&[card], options);
        for line in text.split("\r\n") {
            prop_assert!(line.chars().count() <= max, "{:?}", line);
        }

        let parsed = parse(&text);
        prop_assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
        prop_assert_eq!(parsed.cards.len(), 1);
        prop_assert_eq!(parsed.cards[0].version, version);
        let note = parsed.cards[0].property("NOTE").and_then(VCardProperty::as_text);
        prop_assert_eq!(note, Some(value.as_str()));
    }
}
