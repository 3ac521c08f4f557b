//! Re-encodes a vCard stream in the configured target version.

use std::io::{BufRead, Write};

use anyhow::Result;
use cardscribe_core::config::Settings;
use cardscribe_rfc::vcard::{ReaderOptions, VCardReader, VCardWriter, Warning, WriterOptions};

/// Outcome of [`convert`].
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub cards: usize,
    /// Reader and writer warnings in the order they were raised.
    pub warnings: Vec<Warning>,
}

/// ## Summary
/// Reads every vCard from `input` and writes it to `output`, using the
/// `reader` and `writer` sections of `settings`.
///
/// ## Errors
/// Returns an error if the settings are invalid, either stream fails, or a
/// card holds a value that cannot be written.
#[tracing::instrument(skip_all, fields(version = %settings.writer.version))]
pub fn convert<R: BufRead, W: Write>(
    input: R,
    output: W,
    settings: &Settings,
) -> Result<ConversionReport> {
    let mut reader = VCardReader::with_options(input, ReaderOptions::try_from(&settings.reader)?);
    let mut writer =
        VCardWriter::with_options(output, WriterOptions::try_from(&settings.writer)?);
    let mut report = ConversionReport::default();

    while let Some(card) = reader.read_next()? {
        report.warnings.append(&mut reader.take_warnings());
        writer.write(&card)?;
        report.warnings.append(&mut writer.take_warnings());
        report.cards += 1;
    }
    report.warnings.append(&mut reader.take_warnings());
    writer.flush()?;

    tracing::info!(
        cards = report.cards,
        warnings = report.warnings.len(),
        "Conversion finished"
    );
    Ok(report)
}
