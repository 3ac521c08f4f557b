//! Property scribes: per-property marshalling between wire values and
//! typed [`VCardValue`]s.
//!
//! A [`Scribe`] is a stateless strategy object registered in a
//! [`ScribeIndex`] under its upper-case property name. The text pipeline
//! calls [`Scribe::unmarshal_text`] and [`Scribe::marshal_text`]; the jCard,
//! xCard and hCard layers call the per-format methods, which default to
//! [`ScribeError::UnsupportedFormat`].
//!
//! Scribes report a tri-state [`ScribeOutcome`]:
//!
//! | Outcome | On read | On write |
//! |---|---|---|
//! | `Done` | property stored | property written |
//! | `Skip` | warning, property left out | warning, property left out |
//! | `Fail` | warning, property kept raw | hard error |

use std::fmt;
use std::sync::Arc;

use crate::vcard::build::WriterOptions;
use crate::vcard::core::{
    VCardDataType, VCardParameters, VCardProperty, VCardValue, VCardVersion, VersionPolicy,
    Warning, Warnings,
};
use crate::vcard::parse::ReaderOptions;

mod agent;
mod binary;
mod datetime;
mod format;
mod geo;
mod list;
mod raw;
mod registry;
mod structured;
mod text;
mod timezone;
mod uri;

pub use agent::AgentScribe;
pub use binary::BinaryScribe;
pub use datetime::{DateScribe, RevScribe};
pub use format::{HtmlElement, QName, XCARD_NAMESPACE, XmlElement, XmlValue};
pub use geo::GeoScribe;
pub use list::ListScribe;
pub use raw::RawScribe;
pub use registry::ScribeIndex;
pub use structured::{AddressScribe, GenderScribe, NameScribe, OrganizationScribe};
pub use text::TextScribe;
pub use timezone::TimezoneScribe;
pub use uri::UriScribe;

/// Result of a scribe operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScribeOutcome<T> {
    Done(T),
    /// Leave the property out; the reason becomes a warning.
    Skip(String),
    Fail(ScribeError),
}

impl<T> ScribeOutcome<T> {
    #[must_use]
    pub fn skip(reason: impl Into<String>) -> Self {
        Self::Skip(reason.into())
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScribeOutcome<U> {
        match self {
            Self::Done(value) => ScribeOutcome::Done(f(value)),
            Self::Skip(reason) => ScribeOutcome::Skip(reason),
            Self::Fail(err) => ScribeOutcome::Fail(err),
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Returns the value of a `Done` outcome.
    #[must_use]
    pub fn done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::Skip(_) | Self::Fail(_) => None,
        }
    }
}

impl<T> From<Result<T, ScribeError>> for ScribeOutcome<T> {
    fn from(result: Result<T, ScribeError>) -> Self {
        match result {
            Ok(value) => Self::Done(value),
            Err(err) => Self::Fail(err),
        }
    }
}

/// Why a scribe could not handle a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScribeError {
    #[error("cannot parse value: {0}")]
    CannotParse(String),

    #[error("{property} does not support {format}")]
    UnsupportedFormat {
        property: String,
        format: DataFormat,
    },

    #[error("{property} cannot hold a {found} value")]
    WrongValueType {
        property: String,
        found: &'static str,
    },
}

impl ScribeError {
    #[must_use]
    pub fn cannot_parse(message: impl Into<String>) -> Self {
        Self::CannotParse(message.into())
    }

    pub(crate) fn wrong_type(property: &VCardProperty) -> Self {
        Self::WrongValueType {
            property: property.name.clone(),
            found: property.value.kind(),
        }
    }
}

/// Serialization formats a scribe may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    /// Plain-text vCard.
    Text,
    /// jCard (RFC 7095).
    Json,
    /// xCard (RFC 6351).
    Xml,
    /// hCard microformat.
    Html,
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "plain-text vCard"),
            Self::Json => write!(f, "jCard"),
            Self::Xml => write!(f, "xCard"),
            Self::Html => write!(f, "hCard"),
        }
    }
}

/// State handed to a scribe while reading.
#[derive(Debug)]
pub struct ParseContext<'a> {
    pub version: VCardVersion,
    pub warnings: &'a mut Warnings,
    pub(crate) scribes: &'a Arc<ScribeIndex>,
    pub(crate) options: &'a ReaderOptions,
}

impl<'a> ParseContext<'a> {
    pub fn new(
        version: VCardVersion,
        warnings: &'a mut Warnings,
        scribes: &'a Arc<ScribeIndex>,
        options: &'a ReaderOptions,
    ) -> Self {
        Self {
            version,
            warnings,
            scribes,
            options,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &'static VersionPolicy {
        self.version.policy()
    }

    /// Records a free-form scribe warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(Warning::message(message));
    }
}

/// State handed to a scribe while writing.
#[derive(Debug)]
pub struct WriteContext<'a> {
    pub version: VCardVersion,
    pub warnings: &'a mut Warnings,
    pub(crate) scribes: &'a Arc<ScribeIndex>,
    pub(crate) options: &'a WriterOptions,
}

impl<'a> WriteContext<'a> {
    pub fn new(
        version: VCardVersion,
        warnings: &'a mut Warnings,
        scribes: &'a Arc<ScribeIndex>,
        options: &'a WriterOptions,
    ) -> Self {
        Self {
            version,
            warnings,
            scribes,
            options,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &'static VersionPolicy {
        self.version.policy()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(Warning::message(message));
    }
}

/// Marshals one kind of property.
///
/// `unmarshal_text` receives the wire value after quoted-printable decoding
/// but before unescaping; `marshal_text` returns it escaped.
pub trait Scribe: Send + Sync + fmt::Debug {
    /// Upper-case property name the scribe is registered under.
    fn property_name(&self) -> &str;

    /// xCard element name.
    fn qname(&self) -> QName {
        QName::xcard(self.property_name().to_ascii_lowercase())
    }

    /// Versions the property may be written in.
    fn supported_versions(&self) -> &[VCardVersion] {
        &VCardVersion::ALL
    }

    /// Data type assumed when no `VALUE` parameter is present.
    ///
    /// `None` means the scribe does not use `VALUE`; the parameter is then
    /// left alone in both directions.
    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType>;

    /// Data type of a particular value; a `VALUE` parameter is written when
    /// it differs from [`Scribe::default_data_type`].
    fn data_type(&self, value: &VCardValue, version: VCardVersion) -> Option<VCardDataType> {
        let _ = value;
        self.default_data_type(version)
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        data_type: Option<&VCardDataType>,
        params: &mut VCardParameters,
        ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue>;

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String>;

    /// Adjusts the parameters written with a property.
    fn prepare_parameters(
        &self,
        property: &VCardProperty,
        params: &mut VCardParameters,
        ctx: &mut WriteContext<'_>,
    ) {
        let _ = (property, params, ctx);
    }

    /// Produces the jCard value of a property.
    fn marshal_json(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<serde_json::Value> {
        let _ = (property, ctx);
        ScribeOutcome::Fail(self.unsupported(DataFormat::Json))
    }

    fn unmarshal_json(
        &self,
        value: &serde_json::Value,
        data_type: Option<&VCardDataType>,
        params: &mut VCardParameters,
        ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let _ = (value, data_type, params, ctx);
        ScribeOutcome::Fail(self.unsupported(DataFormat::Json))
    }

    /// Produces the xCard child elements of a property.
    fn marshal_xml(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        let _ = (property, ctx);
        ScribeOutcome::Fail(self.unsupported(DataFormat::Xml))
    }

    fn unmarshal_xml(
        &self,
        element: &XmlValue,
        params: &mut VCardParameters,
        ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let _ = (element, params, ctx);
        ScribeOutcome::Fail(self.unsupported(DataFormat::Xml))
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        params: &mut VCardParameters,
        ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let _ = (element, params, ctx);
        ScribeOutcome::Fail(self.unsupported(DataFormat::Html))
    }

    /// The error reported by formats the scribe does not implement.
    fn unsupported(&self, format: DataFormat) -> ScribeError {
        ScribeError::UnsupportedFormat {
            property: self.property_name().to_string(),
            format,
        }
    }
}
