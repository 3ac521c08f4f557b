//! Parameter multimap behaviour seen through the reader and writer.

use cardscribe_test::rfc::vcard::core::{VCard, VCardParameters, VCardProperty};
use cardscribe_test::rfc::vcard::parse::parse_line;
use cardscribe_test::rfc::vcard::{VCardVersion, parse};

use super::helpers::*;

#[test_log::test]
fn repeated_keys_keep_every_value() {
    let mut params = VCardParameters::new();
    params.put("TYPE", "work");
    params.put("TYPE", "home");
    params.put("PREF", "1");

    assert_eq!(params.get_all("TYPE"), vec!["work", "home"]);
    assert_eq!(params.get_all("type"), params.get_all("TYPE"));
    assert_eq!(params.first("Type"), Some("work"));

    params.replace("type", "cell");
    let keys: Vec<_> = params.iter().map(|p| p.effective_key()).collect();
    assert_eq!(keys, vec!["type", "PREF"]);
    assert_eq!(params.types(), vec!["cell"]);
}

#[test_log::test]
fn comma_lists_and_mixed_case_keys() {
    let line = parse_line(
        "TEL;TYPE=work,home;type=voice:123",
        1,
        VCardVersion::V3_0.policy(),
        true,
    )
    .expect("valid line");
    assert_eq!(line.parameters.get_all("TYPE"), vec!["work", "home", "voice"]);

    let mut card = VCard::with_version(VCardVersion::V3_0);
    card.add_property(VCardProperty::text("TEL", "123").with_params(line.parameters));

    let text = write_cards(&[card.clone()], writer_options(VCardVersion::V3_0));
    assert!(text.contains("\r\nTEL;TYPE=work,home,voice:123\r\n"), "{text}");

    let text = write_cards(&[card], writer_options(VCardVersion::V2_1));
    assert!(
        text.contains("\r\nTEL;TYPE=work;TYPE=home;type=voice:123\r\n"),
        "{text}"
    );
}

#[test_log::test]
fn nameless_flags_become_named_in_modern_versions() {
    let parsed = parse(
        "BEGIN:VCARD\r\nVERSION:2.1\r\nTEL;WORK;VOICE;PREF:+1-555-0100\r\nEND:VCARD\r\n",
    );
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    let tel = parsed.cards[0].property("TEL").expect("tel");
    assert_eq!(tel.params.nameless(), vec!["WORK", "VOICE", "PREF"]);
    assert!(tel.params.has_type("voice"));

    let text = write_cards(&parsed.cards, writer_options(VCardVersion::V2_1));
    assert!(text.contains("\r\nTEL;WORK;VOICE;PREF:+1-555-0100\r\n"), "{text}");

    let text = write_cards(&parsed.cards, writer_options(VCardVersion::V4_0));
    assert!(
        text.contains("\r\nTEL;TYPE=WORK,VOICE,PREF:+1-555-0100\r\n"),
        "{text}"
    );
}

#[test_log::test]
fn quoted_values_keep_delimiters() {
    let parsed = parse(
        "BEGIN:VCARD\r\nVERSION:4.0\r\nNOTE;X-LIST=\"a,b;c:d\":x\r\nEND:VCARD\r\n",
    );
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    let note = parsed.cards[0].property("NOTE").expect("note");
    assert_eq!(note.params.get_all("X-LIST"), vec!["a,b;c:d"]);

    let text = write_cards(&parsed.cards, writer_options(VCardVersion::V4_0));
    assert!(text.contains("\r\nNOTE;X-LIST=\"a,b;c:d\":x\r\n"), "{text}");
}
