//! vCard document type.

use super::property::{VCardProperty, names};
use super::version::VCardVersion;

/// A vCard: an ordered list of typed properties plus a version.
///
/// `VERSION` is not stored as a property; the writer emits it from
/// [`VCard::version`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VCard {
    pub version: VCardVersion,
    /// All properties in order of appearance.
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    /// Creates an empty vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    pub fn add_property(&mut self, prop: VCardProperty) {
        self.properties.push(prop);
    }

    /// Returns all properties with the given name (case-insensitive).
    pub fn properties_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a VCardProperty> + 'a {
        self.properties.iter().filter(move |p| p.is_named(name))
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&VCardProperty> {
        self.properties.iter().find(|p| p.is_named(name))
    }

    /// Removes every property with the given name.
    pub fn remove_properties(&mut self, name: &str) -> Vec<VCardProperty> {
        let (removed, kept) = std::mem::take(&mut self.properties)
            .into_iter()
            .partition(|p| p.is_named(name));
        self.properties = kept;
        removed
    }

    /// Returns the FN (formatted name) value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.property(names::FN)?.as_text()
    }
}
