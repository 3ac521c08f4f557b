//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_default_settings() {
    tracing::debug!("Testing default settings");

    let settings = Settings::default();
    assert_eq!(settings.reader.default_version, "2.1");
    assert!(settings.reader.caret_decoding);
    assert_eq!(settings.writer.version, "3.0");
    assert_eq!(settings.writer.max_line_length, 75);
    assert_eq!(settings.writer.newline, "\r\n");
    assert_eq!(settings.writer.indent, " ");
    assert!(settings.writer.include_prodid);
}

#[test_log::test]
fn test_load_matches_defaults() {
    let loaded = Settings::load().expect("settings should load from defaults");
    let defaults = Settings::default();

    assert_eq!(loaded.writer.max_line_length, defaults.writer.max_line_length);
    assert_eq!(loaded.writer.fold_unit, FoldUnit::Chars);
    assert_eq!(loaded.reader.default_charset, defaults.reader.default_charset);
}

#[test]
fn test_fold_unit_deserialization() {
    let unit: FoldUnit = serde::Deserialize::deserialize(
        serde::de::value::StrDeserializer::<serde::de::value::Error>::new("utf8_bytes"),
    )
    .expect("fold unit should deserialize");
    assert_eq!(unit, FoldUnit::Utf8Bytes);
}

#[test]
fn test_writer_config_clone() {
    let config = WriterConfig {
        fold_lines: false,
        ..WriterConfig::default()
    };

    let cloned = config.clone();
    assert!(!cloned.fold_lines);
    assert_eq!(cloned.version, config.version);
}

fn load_from_vars(vars: &[(&str, &str)]) -> Settings {
    let mut source = config::Map::new();
    for (key, value) in vars {
        source.insert((*key).to_string(), (*value).to_string());
    }
    Settings::load_with(environment().source(Some(source))).expect("settings should load")
}

#[test_log::test]
fn test_env_versions_stay_strings() {
    let settings = load_from_vars(&[
        ("CARDSCRIBE__WRITER__VERSION", "4.0"),
        ("CARDSCRIBE__READER__DEFAULT_VERSION", "3.0"),
    ]);
    assert_eq!(settings.writer.version, "4.0");
    assert_eq!(settings.reader.default_version, "3.0");
}

#[test_log::test]
fn test_env_scalars_are_converted() {
    let settings = load_from_vars(&[
        ("CARDSCRIBE__WRITER__FOLD_LINES", "false"),
        ("CARDSCRIBE__WRITER__MAX_LINE_LENGTH", "60"),
        ("CARDSCRIBE__WRITER__FOLD_UNIT", "utf8_bytes"),
        ("CARDSCRIBE__LOGGING__LEVEL", "debug"),
    ]);
    assert!(!settings.writer.fold_lines);
    assert_eq!(settings.writer.max_line_length, 60);
    assert_eq!(settings.writer.fold_unit, FoldUnit::Utf8Bytes);
    assert_eq!(settings.logging.level, "debug");
}
