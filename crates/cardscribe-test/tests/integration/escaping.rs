//! Escaping rules differ per version and are not interchangeable.

use cardscribe_test::rfc::vcard::codec::{escape_text, unescape_text};
use cardscribe_test::rfc::vcard::core::VCardProperty;
use cardscribe_test::rfc::vcard::{VCardVersion, parse};

fn note_as(version: &str, raw: &str) -> String {
    let parsed = parse(&format!(
        "BEGIN:VCARD\r\nVERSION:{version}\r\nNOTE:{raw}\r\nEND:VCARD\r\n"
    ));
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    parsed.cards[0]
        .property("NOTE")
        .and_then(VCardProperty::as_text)
        .expect("text note")
        .to_string()
}

/// ## Summary
/// Text escaped for 2.1 is only guaranteed to read back under 2.1.
#[test_log::test]
fn legacy_escaping_is_not_modern_escaping() {
    let v21 = VCardVersion::V2_1.policy();
    let v30 = VCardVersion::V3_0.policy();

    let original = "C:\\Temp\\,old; done";
    let escaped = escape_text(original, v21);
    assert_eq!(escaped, "C:\\Temp\\,old\\; done");
    assert_eq!(unescape_text(&escaped, v21), original);
    assert_eq!(unescape_text(&escaped, v30), "C:\\Temp,old; done");
    assert_ne!(unescape_text(&escaped, v30), original);

    let escaped = escape_text("x, y", v30);
    assert_eq!(escaped, "x\\, y");
    assert_ne!(unescape_text(&escaped, v21), "x, y");
}

#[test_log::test]
fn same_line_reads_differently_per_version() {
    let raw = "a\\,b\\\\c\\;d\\ne";
    assert_eq!(note_as("2.1", raw), "a\\,b\\\\c;d\ne");
    assert_eq!(note_as("3.0", raw), "a,b\\c;d\ne");
    assert_eq!(note_as("4.0", raw), "a,b\\c;d\ne");
}

#[test_log::test]
fn unknown_sequences_are_kept() {
    assert_eq!(note_as("4.0", "tab\\there"), "tab\\there");
    assert_eq!(note_as("4.0", "trailing\\"), "trailing\\");
}
