//! Value data types named by the `VALUE` parameter.

use std::fmt;

use super::version::VCardVersion;

/// A vCard value data type (RFC 6350 §4, RFC 2426 §4, vCard 2.1 §2.1.4).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VCardDataType {
    Text,
    Uri,
    /// 2.1 only.
    Url,
    /// 2.1 only.
    ContentId,
    /// 2.1 only.
    Inline,
    /// 3.0 only.
    Binary,
    Date,
    Time,
    DateTime,
    DateAndOrTime,
    Timestamp,
    Boolean,
    Integer,
    Float,
    UtcOffset,
    LanguageTag,
    /// An extension data type, kept in its wire spelling.
    Other(String),
}

impl VCardDataType {
    /// Parses a `VALUE` parameter value (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "uri" => Self::Uri,
            "url" => Self::Url,
            "content-id" | "cid" => Self::ContentId,
            "inline" => Self::Inline,
            "binary" => Self::Binary,
            "date" => Self::Date,
            "time" => Self::Time,
            "date-time" => Self::DateTime,
            "date-and-or-time" => Self::DateAndOrTime,
            "timestamp" => Self::Timestamp,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "utc-offset" => Self::UtcOffset,
            "language-tag" => Self::LanguageTag,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    /// Returns the wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Uri => "uri",
            Self::Url => "url",
            Self::ContentId => "content-id",
            Self::Inline => "inline",
            Self::Binary => "binary",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date-time",
            Self::DateAndOrTime => "date-and-or-time",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::UtcOffset => "utc-offset",
            Self::LanguageTag => "language-tag",
            Self::Other(s) => s,
        }
    }

    /// Returns whether the data type exists in the given version.
    #[must_use]
    pub fn is_supported_by(&self, version: VCardVersion) -> bool {
        match self {
            Self::Url | Self::ContentId | Self::Inline => version == VCardVersion::V2_1,
            Self::Binary => version == VCardVersion::V3_0,
            Self::Uri | Self::Boolean | Self::Integer | Self::Float | Self::Time => {
                version >= VCardVersion::V3_0
            }
            Self::DateAndOrTime | Self::Timestamp | Self::LanguageTag => {
                version == VCardVersion::V4_0
            }
            Self::Text | Self::Date | Self::DateTime | Self::UtcOffset | Self::Other(_) => true,
        }
    }

    /// Maps URI-ish types onto the spelling the target version uses.
    #[must_use]
    pub fn for_version(&self, version: VCardVersion) -> Self {
        match (self, version) {
            (Self::Uri, VCardVersion::V2_1) => Self::Url,
            (Self::Url, VCardVersion::V3_0 | VCardVersion::V4_0) => Self::Uri,
            _ => self.clone(),
        }
    }
}

impl fmt::Display for VCardDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
