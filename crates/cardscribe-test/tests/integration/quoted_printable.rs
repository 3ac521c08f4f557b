//! Quoted-printable values through the reader and writer.

use cardscribe_test::rfc::vcard::build::FoldingScheme;
use cardscribe_test::rfc::vcard::core::{VCard, VCardParameters, VCardProperty};
use cardscribe_test::rfc::vcard::{VCardVersion, WarningCode, WriterOptions, parse};
use proptest::prelude::*;

use super::helpers::*;

fn qp_note(value: &str, charset: &str) -> VCard {
    let mut params = VCardParameters::new();
    params.put("ENCODING", "QUOTED-PRINTABLE");
    params.put("CHARSET", charset);
    let mut card = VCard::with_version(VCardVersion::V2_1);
    card.add_property(VCardProperty::text("NOTE", value).with_params(params));
    card
}

fn note(card: &VCard) -> Option<&str> {
    card.property("NOTE").and_then(VCardProperty::as_text)
}

#[test_log::test]
fn charset_is_used_both_ways() {
    let text = write_cards(
        &[qp_note("Grüße", "ISO-8859-1")],
        writer_options(VCardVersion::V2_1),
    );
    assert!(
        text.contains("\r\nNOTE;ENCODING=QUOTED-PRINTABLE;CHARSET=ISO-8859-1:Gr=FC=DFe\r\n"),
        "{text}"
    );

    let parsed = parse(&text);
    assert!(parsed.warnings.is_empty());
    assert_eq!(note(&parsed.cards[0]), Some("Grüße"));
}

#[test_log::test]
fn malformed_escape_is_passed_through() {
    let parsed = parse(
        "BEGIN:VCARD\r\n\
         VERSION:2.1\r\n\
         NOTE;QUOTED-PRINTABLE:100=25 =ZZ done\r\n\
         END:VCARD\r\n",
    );
    assert_eq!(codes(&parsed.warnings), vec![WarningCode::QuotedPrintable]);
    assert_eq!(note(&parsed.cards[0]), Some("100% =ZZ done"));
}

#[test_log::test]
fn indented_soft_breaks_lose_their_indent() {
    let parsed = parse(
        "BEGIN:VCARD\r\nVERSION:2.1\r\n\
         NOTE;ENCODING=QUOTED-PRINTABLE;CHARSET=UTF-8:caf=\r\n =C3=A9\r\n\
         END:VCARD\r\n",
    );
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(note(&parsed.cards[0]), Some("café"));

    let parsed = parse(
        "BEGIN:VCARD\r\nVERSION:2.1\r\n\
         NOTE;QUOTED-PRINTABLE:one =\r\n\ttwo=\r\nthree\r\n\
         END:VCARD\r\n",
    );
    assert_eq!(note(&parsed.cards[0]), Some("one twothree"));
}

#[test_log::test]
fn written_soft_breaks_are_indented() {
    let options = WriterOptions {
        folding: FoldingScheme::default().with_max_line_length(16),
        ..writer_options(VCardVersion::V2_1)
    };
    let text = write_cards(&[qp_note("Grüße aus Köln", "UTF-8")], options);
    let body = text
        .split("\r\n")
        .skip_while(|line| !line.starts_with("NOTE"))
        .skip(1)
        .take_while(|line| *line != "END:VCARD")
        .collect::<Vec<_>>();
    assert!(!body.is_empty(), "{text}");
    assert!(body.iter().all(|line| line.starts_with(' ')), "{text}");

    let parsed = parse(&text);
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(note(&parsed.cards[0]), Some("Grüße aus Köln"));
}

#[test_log::test]
fn unknown_charset_falls_back() {
    let parsed = parse(
        "BEGIN:VCARD\r\n\
         VERSION:2.1\r\n\
         NOTE;QUOTED-PRINTABLE;CHARSET=X-UNHEARD-OF:caf=C3=A9\r\n\
         END:VCARD\r\n",
    );
    assert_eq!(codes(&parsed.warnings), vec![WarningCode::UnknownCharset]);
    assert_eq!(note(&parsed.cards[0]), Some("café"));
}

#[test_log::test]
fn modern_versions_drop_the_encoding() {
    for version in [VCardVersion::V3_0, VCardVersion::V4_0] {
        let text = write_cards(&[qp_note("café", "UTF-8")], writer_options(version));
        assert!(text.contains("\r\nNOTE:café\r\n"), "{text}");
        assert!(!text.contains("CHARSET"));
    }
}

proptest! {
    #[test]
    fn soft_breaks_read_back(
        value in "[a-zA-Z0-9 ,;:=.é日\n]{0,150}",
        max in 8usize..80,
    ) {
        let options = WriterOptions {
            folding: FoldingScheme::default().with_max_line_length(max),
            ..writer_options(VCardVersion::V2_1)
        };
        let text = write_cards(&[qp_note(&value, "UTF-8")], options);
        for line in text.split("\r\n") {
            prop_assert!(line.chars().count() <= max, "{:?}", line);
        }

        let parsed = parse(&text);
        prop_assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
        prop_assert_eq!(note(&parsed.cards[0]), Some(value.as_str()));
    }
}
