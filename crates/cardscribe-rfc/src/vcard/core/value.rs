//! vCard property values.

use chrono::FixedOffset;

use super::datetime::{DateAndOrTime, Timestamp};
use super::structured::{Address, BinaryData, Gender, Geo, Organization, StructuredName};
use super::vcard::VCard;

/// A typed vCard property value.
#[derive(Debug, Clone, PartialEq)]
pub enum VCardValue {
    /// Text value, unescaped.
    Text(String),

    /// Multi-valued text (comma-separated on the wire).
    TextList(Vec<String>),

    Uri(String),

    /// Date, time, or datetime value.
    DateAndOrTime(DateAndOrTime),

    /// Timestamp (REV property).
    Timestamp(Timestamp),

    StructuredName(StructuredName),

    Address(Address),

    Organization(Organization),

    Gender(Gender),

    Geo(Geo),

    /// UTC offset (TZ property).
    UtcOffset(FixedOffset),

    /// Inline binary data, decoded.
    Binary(BinaryData),

    /// Embedded vCard (AGENT property).
    Agent(Box<VCard>),

    /// Raw wire value of a property no scribe understood, kept verbatim.
    Unknown(String),
}

impl VCardValue {
    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the raw wire text of an unknown value.
    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Unknown(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_structured_name(&self) -> Option<&StructuredName> {
        match self {
            Self::StructuredName(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Self::Organization(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date_and_or_time(&self) -> Option<&DateAndOrTime> {
        match self {
            Self::DateAndOrTime(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_binary(&self) -> Option<&BinaryData> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_agent(&self) -> Option<&VCard> {
        match self {
            Self::Agent(card) => Some(card),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::TextList(_) => "text list",
            Self::Uri(_) => "uri",
            Self::DateAndOrTime(_) => "date-and-or-time",
            Self::Timestamp(_) => "timestamp",
            Self::StructuredName(_) => "structured name",
            Self::Address(_) => "address",
            Self::Organization(_) => "organization",
            Self::Gender(_) => "gender",
            Self::Geo(_) => "geo",
            Self::UtcOffset(_) => "utc-offset",
            Self::Binary(_) => "binary",
            Self::Agent(_) => "agent",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<String> for VCardValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for VCardValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<StructuredName> for VCardValue {
    fn from(n: StructuredName) -> Self {
        Self::StructuredName(n)
    }
}

impl From<Address> for VCardValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<Organization> for VCardValue {
    fn from(o: Organization) -> Self {
        Self::Organization(o)
    }
}

impl From<Gender> for VCardValue {
    fn from(g: Gender) -> Self {
        Self::Gender(g)
    }
}

impl From<DateAndOrTime> for VCardValue {
    fn from(d: DateAndOrTime) -> Self {
        Self::DateAndOrTime(d)
    }
}

impl From<Geo> for VCardValue {
    fn from(g: Geo) -> Self {
        Self::Geo(g)
    }
}

impl From<BinaryData> for VCardValue {
    fn from(b: BinaryData) -> Self {
        Self::Binary(b)
    }
}
