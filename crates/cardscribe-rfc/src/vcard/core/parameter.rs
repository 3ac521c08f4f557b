//! vCard parameters (sub-types).
//!
//! [`VCardParameters`] is an ordered multimap: keys compare case-insensitively,
//! duplicate keys are kept, and iteration follows wire order. Nameless 2.1
//! flags such as `;WORK` are stored under the `None` key.

use std::fmt;

use super::data_type::VCardDataType;
use super::warning::{WarningCode, Warnings};

/// Well-known parameter names.
pub mod names {
    pub const ALTID: &str = "ALTID";
    pub const CALSCALE: &str = "CALSCALE";
    pub const CHARSET: &str = "CHARSET";
    pub const ENCODING: &str = "ENCODING";
    pub const GEO: &str = "GEO";
    pub const INDEX: &str = "INDEX";
    pub const LABEL: &str = "LABEL";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const MEDIATYPE: &str = "MEDIATYPE";
    pub const PID: &str = "PID";
    pub const PREF: &str = "PREF";
    pub const SORT_AS: &str = "SORT-AS";
    pub const TYPE: &str = "TYPE";
    pub const TZ: &str = "TZ";
    pub const VALUE: &str = "VALUE";
}

/// Common TYPE values as constants.
pub mod types {
    pub const HOME: &str = "home";
    pub const WORK: &str = "work";
    pub const PREF: &str = "pref";

    pub const TEXT: &str = "text";
    pub const VOICE: &str = "voice";
    pub const FAX: &str = "fax";
    pub const CELL: &str = "cell";
    pub const VIDEO: &str = "video";
    pub const PAGER: &str = "pager";

    pub const DOM: &str = "dom";
    pub const INTL: &str = "intl";
    pub const POSTAL: &str = "postal";
    pub const PARCEL: &str = "parcel";

    pub const INTERNET: &str = "internet";
}

/// The `ENCODING` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueEncoding {
    QuotedPrintable,
    /// `BASE64` (2.1).
    Base64,
    /// `b` (3.0).
    B,
    EightBit,
    SevenBit,
    Other(String),
}

impl ValueEncoding {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "QUOTED-PRINTABLE" => Self::QuotedPrintable,
            "BASE64" => Self::Base64,
            "B" => Self::B,
            "8BIT" => Self::EightBit,
            "7BIT" => Self::SevenBit,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::QuotedPrintable => "QUOTED-PRINTABLE",
            Self::Base64 => "BASE64",
            Self::B => "b",
            Self::EightBit => "8BIT",
            Self::SevenBit => "7BIT",
            Self::Other(s) => s,
        }
    }

    /// Returns whether this is one of the two base64 spellings.
    #[must_use]
    pub fn is_base64(&self) -> bool {
        matches!(self, Self::Base64 | Self::B)
    }

    fn is_known_flag(s: &str) -> bool {
        !matches!(Self::parse(s), Self::Other(_))
    }
}

impl fmt::Display for ValueEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which key a nameless 2.1 flag stands for.
#[must_use]
pub fn nameless_key(value: &str) -> &'static str {
    if ValueEncoding::is_known_flag(value) {
        return names::ENCODING;
    }
    match VCardDataType::parse(value) {
        VCardDataType::Url | VCardDataType::ContentId | VCardDataType::Inline => names::VALUE,
        _ => names::TYPE,
    }
}

/// One parameter entry. `key` is `None` for nameless flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    pub key: Option<String>,
    pub value: String,
}

impl VCardParameter {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn nameless(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    /// Returns the explicit key, or the key a nameless flag implies.
    #[must_use]
    pub fn effective_key(&self) -> &str {
        self.key
            .as_deref()
            .unwrap_or_else(|| nameless_key(&self.value))
    }

    fn matches(&self, key: &str) -> bool {
        self.effective_key().eq_ignore_ascii_case(key)
    }
}

/// Ordered, case-insensitive parameter multimap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardParameters {
    entries: Vec<VCardParameter>,
}

impl VCardParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion (wire) order.
    pub fn iter(&self) -> std::slice::Iter<'_, VCardParameter> {
        self.entries.iter()
    }

    /// Returns the first value stored under `key`.
    ///
    /// Nameless flags answer for the key they imply, so `first("ENCODING")`
    /// finds a bare `;QUOTED-PRINTABLE`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|p| p.matches(key))
            .map(|p| p.value.as_str())
    }

    /// Returns every value stored under `key`, in order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|p| p.matches(key))
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Returns the values of nameless flags only.
    #[must_use]
    pub fn nameless(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|p| p.key.is_none())
            .map(|p| p.value.as_str())
            .collect()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|p| p.matches(key))
    }

    /// Appends an entry.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(VCardParameter::new(key, value));
    }

    /// Appends a nameless flag.
    pub fn put_nameless(&mut self, value: impl Into<String>) {
        self.entries.push(VCardParameter::nameless(value));
    }

    pub fn push(&mut self, parameter: VCardParameter) {
        self.entries.push(parameter);
    }

    /// Removes every entry under `key` and returns their values.
    pub fn remove_all(&mut self, key: &str) -> Vec<String> {
        let mut removed = Vec::new();
        self.entries.retain(|p| {
            if p.matches(key) {
                removed.push(p.value.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Removes entries under `key` whose value matches case-insensitively.
    pub fn remove_value(&mut self, key: &str, value: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|p| !(p.matches(key) && p.value.eq_ignore_ascii_case(value)));
        before != self.entries.len()
    }

    /// Replaces all values under `key` with a single value.
    ///
    /// The new entry takes the position of the first old one; other
    /// parameters keep their relative order.
    pub fn replace(&mut self, key: &str, value: impl Into<String>) {
        self.replace_all(key, [value.into()]);
    }

    /// Replaces all values under `key`, keeping the first entry's position.
    pub fn replace_all<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let position = self.entries.iter().position(|p| p.matches(key));
        self.remove_all(key);
        let new_entries = values.into_iter().map(|v| VCardParameter::new(key, v));
        match position {
            Some(index) => {
                let tail = self.entries.split_off(index.min(self.entries.len()));
                self.entries.extend(new_entries);
                self.entries.extend(tail);
            }
            None => self.entries.extend(new_entries),
        }
    }

    fn set_optional(&mut self, key: &str, value: Option<String>) {
        match value {
            Some(v) => self.replace(key, v),
            None => {
                self.remove_all(key);
            }
        }
    }

    // --- Typed views ---

    /// The `ENCODING` parameter (or a nameless encoding flag).
    #[must_use]
    pub fn encoding(&self) -> Option<ValueEncoding> {
        self.first(names::ENCODING).map(ValueEncoding::parse)
    }

    pub fn set_encoding(&mut self, encoding: Option<&ValueEncoding>) {
        self.set_optional(names::ENCODING, encoding.map(|e| e.as_str().to_string()));
    }

    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.first(names::CHARSET)
    }

    pub fn set_charset(&mut self, charset: Option<&str>) {
        self.set_optional(names::CHARSET, charset.map(str::to_string));
    }

    /// The `VALUE` parameter (or a nameless 2.1 value flag).
    #[must_use]
    pub fn value_type(&self) -> Option<VCardDataType> {
        self.first(names::VALUE).map(VCardDataType::parse)
    }

    pub fn set_value_type(&mut self, data_type: Option<&VCardDataType>) {
        self.set_optional(names::VALUE, data_type.map(|d| d.as_str().to_string()));
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.first(names::LANGUAGE)
    }

    pub fn set_language(&mut self, language: Option<&str>) {
        self.set_optional(names::LANGUAGE, language.map(str::to_string));
    }

    /// TYPE values, including nameless flags that imply TYPE.
    #[must_use]
    pub fn types(&self) -> Vec<&str> {
        self.get_all(names::TYPE)
    }

    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.types()
            .iter()
            .any(|t| t.eq_ignore_ascii_case(type_value))
    }

    /// Adds a TYPE value unless it is already present.
    pub fn add_type(&mut self, type_value: impl Into<String>) {
        let type_value = type_value.into();
        if !self.has_type(&type_value) {
            self.put(names::TYPE, type_value);
        }
    }

    #[must_use]
    pub fn alt_id(&self) -> Option<&str> {
        self.first(names::ALTID)
    }

    pub fn set_alt_id(&mut self, alt_id: Option<&str>) {
        self.set_optional(names::ALTID, alt_id.map(str::to_string));
    }

    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.first(names::MEDIATYPE)
    }

    pub fn set_media_type(&mut self, media_type: Option<&str>) {
        self.set_optional(names::MEDIATYPE, media_type.map(str::to_string));
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.first(names::LABEL)
    }

    #[must_use]
    pub fn calscale(&self) -> Option<&str> {
        self.first(names::CALSCALE)
    }

    #[must_use]
    pub fn sort_as(&self) -> Vec<&str> {
        self.get_all(names::SORT_AS)
    }

    #[must_use]
    pub fn geo(&self) -> Option<&str> {
        self.first(names::GEO)
    }

    #[must_use]
    pub fn tz(&self) -> Option<&str> {
        self.first(names::TZ)
    }

    /// The `PREF` parameter (1-100).
    ///
    /// A malformed or out-of-range value yields `None` and a warning. In 2.1
    /// and 3.0 a `TYPE=pref` flag counts as preference 1.
    pub fn pref(&self, warnings: &mut Warnings) -> Option<u8> {
        if let Some(raw) = self.first(names::PREF) {
            return match raw.trim().parse::<u8>() {
                Ok(value) if (1..=100).contains(&value) => Some(value),
                _ => {
                    warnings.warn(
                        WarningCode::InvalidParameter,
                        format!("PREF parameter is not an integer between 1 and 100: {raw}"),
                    );
                    None
                }
            };
        }
        self.has_type(types::PREF).then_some(1)
    }

    pub fn set_pref(&mut self, pref: Option<u8>) {
        self.set_optional(names::PREF, pref.map(|p| p.to_string()));
    }

    /// The `INDEX` parameter (RFC 6715), a positive integer.
    pub fn index(&self, warnings: &mut Warnings) -> Option<u32> {
        let raw = self.first(names::INDEX)?;
        match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => Some(value),
            _ => {
                warnings.warn(
                    WarningCode::InvalidParameter,
                    format!("INDEX parameter is not a positive integer: {raw}"),
                );
                None
            }
        }
    }

    /// `PID` values as `(local id, optional source id)` pairs.
    ///
    /// Malformed entries are left out with a warning.
    pub fn pids(&self, warnings: &mut Warnings) -> Vec<(u32, Option<u32>)> {
        let mut pids = Vec::new();
        for raw in self.get_all(names::PID) {
            let (local, source) = match raw.split_once('.') {
                Some((local, source)) => (local, Some(source)),
                None => (raw, None),
            };
            let local = local.trim().parse::<u32>();
            let source = source.map(|s| s.trim().parse::<u32>()).transpose();
            match (local, source) {
                (Ok(local), Ok(source)) => pids.push((local, source)),
                _ => warnings.warn(
                    WarningCode::InvalidParameter,
                    format!("PID parameter is malformed: {raw}"),
                ),
            }
        }
        pids
    }
}

impl<'a> IntoIterator for &'a VCardParameters {
    type Item = &'a VCardParameter;
    type IntoIter = std::slice::Iter<'a, VCardParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<VCardParameter> for VCardParameters {
    fn from_iter<T: IntoIterator<Item = VCardParameter>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
