//! Structured vCard types.
//!
//! These types represent structured property values like N, ADR, ORG and GEO.

/// Structured name (N property, RFC 6350 §6.2.2).
///
/// All components are optional. In 2.1 each component holds at most one
/// value; 3.0 and 4.0 allow comma-separated lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    /// Family names (surnames).
    pub family: Vec<String>,
    /// Given names (first names).
    pub given: Vec<String>,
    /// Additional names (middle names).
    pub additional: Vec<String>,
    /// Honorific prefixes (e.g., "Mr.", "Dr.").
    pub prefixes: Vec<String>,
    /// Honorific suffixes (e.g., "Jr.", "M.D.").
    pub suffixes: Vec<String>,
}

impl StructuredName {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: vec![family.into()],
            given: vec![given.into()],
            ..Self::default()
        }
    }

    /// Builds a name from its wire components in N order.
    pub(crate) fn from_components(mut components: Vec<Vec<String>>) -> Self {
        components.resize(5, Vec::new());
        let mut it = components.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            family: next(),
            given: next(),
            additional: next(),
            prefixes: next(),
            suffixes: next(),
        }
    }

    pub(crate) fn components(&self) -> [&[String]; 5] {
        [
            &self.family,
            &self.given,
            &self.additional,
            &self.prefixes,
            &self.suffixes,
        ]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().iter().all(|c| c.is_empty())
    }

    /// Formats as a display name (given + family).
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if !self.given.is_empty() {
            parts.push(self.given.join(" "));
        }
        if !self.family.is_empty() {
            parts.push(self.family.join(" "));
        }
        parts.join(" ")
    }
}

/// Address (ADR property, RFC 6350 §6.3.1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Post office box.
    pub po_box: Vec<String>,
    /// Extended address (e.g., apartment or suite number).
    pub extended: Vec<String>,
    pub street: Vec<String>,
    /// City.
    pub locality: Vec<String>,
    /// State or province.
    pub region: Vec<String>,
    pub postal_code: Vec<String>,
    pub country: Vec<String>,
}

impl Address {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_components(mut components: Vec<Vec<String>>) -> Self {
        components.resize(7, Vec::new());
        let mut it = components.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            po_box: next(),
            extended: next(),
            street: next(),
            locality: next(),
            region: next(),
            postal_code: next(),
            country: next(),
        }
    }

    pub(crate) fn components(&self) -> [&[String]; 7] {
        [
            &self.po_box,
            &self.extended,
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().iter().all(|c| c.is_empty())
    }

    /// Formats as a single-line address.
    #[must_use]
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .flat_map(|v| v.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Organization (ORG property, RFC 6350 §6.6.4).
///
/// First value is the organizational name, subsequent values are
/// organizational units in order of decreasing specificity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    /// Department, division, etc.
    pub units: Vec<String>,
}

impl Organization {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_units(name: impl Into<String>, units: Vec<String>) -> Self {
        Self {
            name: name.into(),
            units,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.units.is_empty()
    }
}

/// Gender (GENDER property, RFC 6350 §6.2.7).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gender {
    /// Sex component: M, F, O, N, or U.
    pub sex: Option<Sex>,
    /// Gender identity text (free-form).
    pub identity: Option<String>,
}

impl Gender {
    #[must_use]
    pub fn sex(sex: Sex) -> Self {
        Self {
            sex: Some(sex),
            identity: None,
        }
    }

    #[must_use]
    pub fn full(sex: Sex, identity: impl Into<String>) -> Self {
        Self {
            sex: Some(sex),
            identity: Some(identity.into()),
        }
    }
}

/// Sex component of GENDER property (RFC 6350 §6.2.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Other,
    /// None or not applicable.
    None,
    Unknown,
}

impl Sex {
    /// Parses from single character.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' | 'm' => Some(Self::Male),
            'F' | 'f' => Some(Self::Female),
            'O' | 'o' => Some(Self::Other),
            'N' | 'n' => Some(Self::None),
            'U' | 'u' => Some(Self::Unknown),
            _ => Option::None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
            Self::Other => 'O',
            Self::None => 'N',
            Self::Unknown => 'U',
        }
    }
}

/// Geographic position (GEO property).
///
/// 2.1 and 3.0 write `lat;lon`; 4.0 writes a `geo:lat,lon` URI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geo {
    pub latitude: f64,
    pub longitude: f64,
}

impl Geo {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Inline binary data (PHOTO, LOGO, SOUND, KEY).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryData {
    pub data: Vec<u8>,
    /// Media type such as `image/jpeg`, when known.
    pub media_type: Option<String>,
}

impl BinaryData {
    #[must_use]
    pub fn new(data: Vec<u8>, media_type: Option<String>) -> Self {
        Self { data, media_type }
    }
}
