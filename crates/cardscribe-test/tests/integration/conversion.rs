//! End-to-end conversion driven by settings.

use cardscribe_test::app::convert::convert;
use cardscribe_test::component::config::{FoldUnit, Settings};
use cardscribe_test::rfc::vcard::{WarningCode, parse};

use super::helpers::*;

fn settings(version: &str) -> Settings {
    let mut settings = Settings::default();
    settings.writer.version = version.to_string();
    settings.writer.include_prodid = false;
    settings
}

const LEGACY: &str = "BEGIN:VCARD\r\n\
                      VERSION:2.1\r\n\
                      N:Gump;Forrest\r\n\
                      FN:Forrest Gump\r\n\
                      TEL;WORK;VOICE:(111) 555-1212\r\n\
                      NOTE;ENCODING=QUOTED-PRINTABLE;CHARSET=UTF-8:Caf=C3=A9 =\r\n\
                      owner\r\n\
                      MAILER:PigeonMail 2.1\r\n\
                      END:VCARD\r\n";

#[test_log::test]
fn legacy_card_to_4_0() {
    let mut output = Vec::new();
    let report = convert(LEGACY.as_bytes(), &mut output, &settings("4.0")).expect("convert");
    let text = String::from_utf8(output).expect("utf-8");

    assert_eq!(report.cards, 1);
    assert_eq!(codes(&report.warnings), vec![WarningCode::UnsupportedVersion]);
    assert_eq!(
        text,
        "BEGIN:VCARD\r\n\
         VERSION:4.0\r\n\
         N:Gump;Forrest;;;\r\n\
         FN:Forrest Gump\r\n\
         TEL;TYPE=WORK,VOICE:(111) 555-1212\r\n\
         NOTE:Café owner\r\n\
         END:VCARD\r\n"
    );
}

#[test_log::test]
fn converted_output_reads_back_clean() {
    for version in ["2.1", "3.0", "4.0"] {
        let mut output = Vec::new();
        convert(LEGACY.as_bytes(), &mut output, &settings(version)).expect("convert");
        let text = String::from_utf8(output).expect("utf-8");
        let parsed = parse(&text);
        assert!(parsed.warnings.is_empty(), "{version}: {:?}", parsed.warnings);
        assert_eq!(parsed.cards[0].version.as_str(), version);
        assert_eq!(parsed.cards[0].formatted_name(), Some("Forrest Gump"));
    }
}

#[test_log::test]
fn folding_settings_apply() {
    let mut settings = settings("3.0");
    settings.writer.max_line_length = 20;
    settings.writer.fold_unit = FoldUnit::Utf8Bytes;

    let input = "BEGIN:VCARD\nVERSION:3.0\nFN:Jörg\nNOTE:ééééééééééééééééé\nEND:VCARD\n";
    let mut output = Vec::new();
    convert(input.as_bytes(), &mut output, &settings).expect("convert");
    let text = String::from_utf8(output).expect("utf-8");

    for line in text.split("\r\n") {
        assert!(line.len() <= 20, "{line:?}");
    }
    assert!(unfolded(&text).contains("\r\nNOTE:ééééééééééééééééé\r\n"));
}

#[test]
fn empty_input_converts_nothing() {
    let mut output = Vec::new();
    let report = convert(b"".as_slice(), &mut output, &settings("3.0")).expect("convert");
    assert_eq!(report.cards, 0);
    assert!(report.warnings.is_empty());
    assert!(output.is_empty());
}
