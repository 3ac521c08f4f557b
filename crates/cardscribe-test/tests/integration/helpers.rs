//! Test helpers for integration tests.

use cardscribe_test::rfc::vcard::{
    VCard, VCardVersion, VCardWriter, Warning, WarningCode, WriterOptions,
};

/// Writer options without the automatic product identifier, so outputs can
/// be compared literally.
pub fn writer_options(version: VCardVersion) -> WriterOptions {
    WriterOptions {
        version,
        include_prodid: false,
        ..WriterOptions::default()
    }
}

/// Writes `cards` with `options` and returns the text.
pub fn write_cards(cards: &[VCard], options: WriterOptions) -> String {
    let mut writer = VCardWriter::with_options(Vec::new(), options);
    for card in cards {
        writer.write(card).expect("card should be writable");
    }
    String::from_utf8(writer.into_inner()).expect("writer output is UTF-8")
}

/// Warning codes in the order they were raised.
pub fn codes(warnings: &[Warning]) -> Vec<WarningCode> {
    warnings.iter().filter_map(|warning| warning.code).collect()
}

/// Removes every fold (newline plus one space).
pub fn unfolded(text: &str) -> String {
    text.replace("\r\n ", "")
}
