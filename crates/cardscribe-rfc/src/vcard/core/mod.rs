//! vCard core types.
//!
//! - [`VCard`] - Complete vCard representation
//! - [`VCardProperty`] - Individual property with parameters and value
//! - [`VCardParameters`] - Ordered parameter multimap
//! - [`VCardValue`] - Property value variants
//! - [`VCardVersion`] / [`VersionPolicy`] - Version and per-version syntax rules
//! - [`Warnings`] - Diagnostics sink for one read or write
//!
//! ## Example
//!
//! ```rust
//! use cardscribe_rfc::vcard::core::{VCard, VCardProperty, VCardVersion};
//!
//! let mut card = VCard::with_version(VCardVersion::V3_0);
//! card.add_property(VCardProperty::text("FN", "John Doe"));
//! card.add_property(VCardProperty::text("EMAIL", "john@example.com"));
//! assert_eq!(card.formatted_name(), Some("John Doe"));
//! ```

mod data_type;
mod datetime;
pub mod parameter;
mod property;
mod structured;
mod value;
mod vcard;
mod version;
mod warning;

pub use data_type::VCardDataType;
pub use datetime::{DateAndOrTime, DateStyle, Timestamp, VCardDate, VCardTime};
pub(crate) use datetime::write_offset;
pub use parameter::{ValueEncoding, VCardParameter, VCardParameters, types};
pub use property::{VCardProperty, names};
pub use structured::{Address, BinaryData, Gender, Geo, Organization, Sex, StructuredName};
pub use value::VCardValue;
pub use vcard::VCard;
pub use version::{EscapeSet, ParamSyntax, VCardVersion, VersionPolicy};
pub use warning::{Warning, WarningCode, Warnings};
