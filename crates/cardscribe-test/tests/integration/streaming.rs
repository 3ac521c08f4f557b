//! Reading and writing several cards over one stream.

use cardscribe_test::component::config::{ReaderConfig, WriterConfig};
use cardscribe_test::component::error::CoreError;
use cardscribe_test::rfc::vcard::core::{VCard, VCardProperty};
use cardscribe_test::rfc::vcard::{
    ReaderOptions, VCardReader, VCardVersion, VCardWriter, WarningCode, WriterOptions,
};

use super::helpers::*;

const STREAM: &str = "BEGIN:VCARD\r\n\
                      VERSION:3.0\r\n\
                      FN:Alice\r\n\
                      END:VCARD\r\n\
                      BEGIN:VCARD\r\n\
                      VERSION:4.0\r\n\
                      FN:Bob\r\n\
                      BOGUS LINE\r\n\
                      END:VCARD\r\n\
                      BEGIN:VCARD\r\n\
                      FN:Carol\r\n\
                      END:VCARD\r\n";

#[test_log::test]
fn warnings_belong_to_the_card_just_read() {
    let mut reader = VCardReader::new(STREAM.as_bytes());

    let alice = reader.read_next().expect("read").expect("first card");
    assert_eq!(alice.formatted_name(), Some("Alice"));
    assert_eq!(alice.version, VCardVersion::V3_0);
    assert!(reader.warnings().is_empty());

    let bob = reader.read_next().expect("read").expect("second card");
    assert_eq!(bob.formatted_name(), Some("Bob"));
    assert_eq!(codes(reader.warnings()), vec![WarningCode::InvalidLine]);
    assert_eq!(reader.warnings()[0].line_number, Some(8));

    let carol = reader.read_next().expect("read").expect("third card");
    assert_eq!(carol.version, VCardVersion::V2_1);
    assert_eq!(codes(reader.warnings()), vec![WarningCode::MissingVersion]);

    assert!(reader.read_next().expect("read").is_none());
    assert!(reader.warnings().is_empty());
}

#[test_log::test]
fn read_all_collects_every_warning() {
    let mut reader = VCardReader::new(STREAM.as_bytes());
    let cards = reader.read_all().expect("read");
    assert_eq!(cards.len(), 3);
    assert_eq!(
        codes(reader.warnings()),
        vec![WarningCode::InvalidLine, WarningCode::MissingVersion]
    );
}

#[test_log::test]
fn stream_charset_decodes_legacy_bytes() {
    let input: &[u8] = b"BEGIN:VCARD\r\nVERSION:2.1\r\nFN:J\xF6rg M\xFCller\r\nEND:VCARD\r\n";
    let options = ReaderOptions::try_from(&ReaderConfig {
        stream_charset: "ISO-8859-1".to_string(),
        ..ReaderConfig::default()
    })
    .expect("known charset");

    let mut reader = VCardReader::with_options(input, options);
    let card = reader.read_next().expect("read").expect("card");
    assert_eq!(card.formatted_name(), Some("Jörg Müller"));

    let mut reader = VCardReader::new(input);
    let card = reader.read_next().expect("read").expect("card");
    assert_eq!(card.formatted_name(), Some("J\u{FFFD}rg M\u{FFFD}ller"));
}

#[test]
fn reader_config_is_validated() {
    let err = ReaderOptions::try_from(&ReaderConfig {
        stream_charset: "UTF-16LE".to_string(),
        ..ReaderConfig::default()
    })
    .expect_err("not ASCII-compatible");
    assert_eq!(err, CoreError::UnknownCharset("UTF-16LE".to_string()));

    let err = ReaderOptions::try_from(&ReaderConfig {
        default_version: "5.0".to_string(),
        ..ReaderConfig::default()
    })
    .expect_err("unknown version");
    assert!(matches!(err, CoreError::UnknownVersion(_)));
}

#[test_log::test]
fn writer_emits_cards_back_to_back() {
    let cards: Vec<VCard> = ["Alice", "Bob"]
        .into_iter()
        .map(|name| {
            let mut card = VCard::new();
            card.add_property(VCardProperty::text("FN", name));
            card
        })
        .collect();

    let options = WriterOptions::try_from(&WriterConfig {
        version: "4.0".to_string(),
        newline: "\n".to_string(),
        include_prodid: false,
        ..WriterConfig::default()
    })
    .expect("valid config");

    let mut writer = VCardWriter::with_options(Vec::new(), options);
    for card in &cards {
        writer.write(card).expect("write");
        assert!(writer.warnings().is_empty());
    }
    writer.flush().expect("flush");
    let text = String::from_utf8(writer.into_inner()).expect("utf-8");
    assert_eq!(
        text,
        "BEGIN:VCARD\nVERSION:4.0\nFN:Alice\nEND:VCARD\n\
         BEGIN:VCARD\nVERSION:4.0\nFN:Bob\nEND:VCARD\n"
    );

    let mut reader = VCardReader::new(text.as_bytes());
    let read = reader.read_all().expect("read");
    assert!(reader.warnings().is_empty());
    assert_eq!(read.len(), 2);
    assert_eq!(
        write_cards(&read, writer_options(VCardVersion::V4_0)),
        text.replace('\n', "\r\n")
    );
}
