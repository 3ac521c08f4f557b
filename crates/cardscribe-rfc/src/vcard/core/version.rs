//! vCard versions and the per-version syntax policy.

use std::fmt;
use std::str::FromStr;

use cardscribe_core::error::CoreError;

/// vCard version.
///
/// Ordered so that "supported since" checks read naturally
/// (`version >= VCardVersion::V3_0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (versit consortium).
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3_0,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4_0,
}

impl VCardVersion {
    /// All versions, oldest first.
    pub const ALL: [Self; 3] = [Self::V2_1, Self::V3_0, Self::V4_0];

    /// Parses from the `VERSION` property value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V2_1),
            "3.0" => Some(Self::V3_0),
            "4.0" => Some(Self::V4_0),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2_1 => "2.1",
            Self::V3_0 => "3.0",
            Self::V4_0 => "4.0",
        }
    }

    /// Returns the syntax policy for this version.
    #[must_use]
    pub const fn policy(self) -> &'static VersionPolicy {
        match self {
            Self::V2_1 => &V2_1_POLICY,
            Self::V3_0 => &V3_0_POLICY,
            Self::V4_0 => &V4_0_POLICY,
        }
    }
}

impl FromStr for VCardVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownVersion(s.to_string()))
    }
}

impl fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How parameter lists are tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSyntax {
    /// 2.1: no comma splitting, quotes are literal, whitespace around `=` trimmed.
    Old,
    /// 3.0 / 4.0: comma splitting, double-quoted values, whitespace preserved.
    New,
}

/// Which backslash escapes a version understands in property values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeSet {
    /// `\;` and `\n` only.
    Minimal,
    /// `\;`, `\,`, `\\` and `\n`.
    Full,
}

/// Per-version syntax rules, consulted by the tokenizer, line parser,
/// escaping engine and writer instead of ad hoc version checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionPolicy {
    pub version: VCardVersion,
    pub param_syntax: ParamSyntax,
    pub escapes: EscapeSet,
    /// Whether RFC 6868 caret encoding may be applied at all.
    pub caret_encoding: bool,
    /// Whether structured value components split on commas.
    pub multi_valued_components: bool,
    /// Whether quoted-printable values are legal on the wire.
    pub quoted_printable: bool,
    /// Name of the product identifier property.
    pub product_id_property: &'static str,
    pub default_max_line_length: usize,
}

impl VersionPolicy {
    /// Returns whether double quotes delimit parameter values.
    #[must_use]
    pub const fn quotes_parameters(&self) -> bool {
        matches!(self.param_syntax, ParamSyntax::New)
    }
}

const V2_1_POLICY: VersionPolicy = VersionPolicy {
    version: VCardVersion::V2_1,
    param_syntax: ParamSyntax::Old,
    escapes: EscapeSet::Minimal,
    caret_encoding: false,
    multi_valued_components: false,
    quoted_printable: true,
    product_id_property: "X-PRODID",
    default_max_line_length: 75,
};

const V3_0_POLICY: VersionPolicy = VersionPolicy {
    version: VCardVersion::V3_0,
    param_syntax: ParamSyntax::New,
    escapes: EscapeSet::Full,
    caret_encoding: true,
    multi_valued_components: true,
    quoted_printable: false,
    product_id_property: "PRODID",
    default_max_line_length: 75,
};

const V4_0_POLICY: VersionPolicy = VersionPolicy {
    version: VCardVersion::V4_0,
    param_syntax: ParamSyntax::New,
    escapes: EscapeSet::Full,
    caret_encoding: true,
    multi_valued_components: true,
    quoted_printable: false,
    product_id_property: "PRODID",
    default_max_line_length: 75,
};
