//! Scribe lookup by property name and xCard name.

use std::collections::HashMap;
use std::sync::Arc;

use super::agent::AgentScribe;
use super::binary::BinaryScribe;
use super::datetime::{DateScribe, RevScribe};
use super::format::QName;
use super::geo::GeoScribe;
use super::list::ListScribe;
use super::raw::RawScribe;
use super::structured::{AddressScribe, GenderScribe, NameScribe, OrganizationScribe};
use super::text::TextScribe;
use super::timezone::TimezoneScribe;
use super::uri::UriScribe;
use super::Scribe;
use crate::vcard::core::names;

static RAW: RawScribe = RawScribe;

/// Scribes by upper-case property name, plus an xCard name index.
///
/// At most one scribe per name; a later registration replaces an earlier
/// one, so callers can override built-ins. [`ScribeIndex::default`] holds
/// the built-in set.
#[derive(Debug, Clone)]
pub struct ScribeIndex {
    by_name: HashMap<String, Arc<dyn Scribe>>,
    by_qname: HashMap<QName, Arc<dyn Scribe>>,
}

impl ScribeIndex {
    /// An index with no scribes; every property reads raw.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_name: HashMap::new(),
            by_qname: HashMap::new(),
        }
    }

    /// Registers a scribe and returns the one it replaced.
    pub fn register(&mut self, scribe: Arc<dyn Scribe>) -> Option<Arc<dyn Scribe>> {
        let name = scribe.property_name().to_ascii_uppercase();
        let replaced = self.by_name.insert(name, Arc::clone(&scribe));
        if let Some(old) = &replaced {
            self.by_qname.remove(&old.qname());
        }
        self.by_qname.insert(scribe.qname(), scribe);
        replaced
    }

    /// Removes the scribe registered under `name`.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Scribe>> {
        let removed = self.by_name.remove(&name.to_ascii_uppercase())?;
        self.by_qname.remove(&removed.qname());
        Some(removed)
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Scribe>> {
        self.by_name.get(&name.to_ascii_uppercase())
    }

    /// Returns the registered scribe, or [`RawScribe`] for unknown names.
    #[must_use]
    pub fn lookup_or_raw(&self, name: &str) -> &dyn Scribe {
        match self.lookup(name) {
            Some(scribe) => scribe.as_ref(),
            None => &RAW,
        }
    }

    #[must_use]
    pub fn lookup_qname(&self, qname: &QName) -> Option<&Arc<dyn Scribe>> {
        self.by_qname.get(qname)
    }

    /// The pass-through scribe used for unknown properties.
    #[must_use]
    pub fn raw() -> &'static RawScribe {
        &RAW
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Registered property names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

impl Default for ScribeIndex {
    fn default() -> Self {
        let mut index = Self::empty();
        let builtins: Vec<Arc<dyn Scribe>> = vec![
            Arc::new(TextScribe::formatted_name()),
            Arc::new(TextScribe::all_versions(names::NOTE)),
            Arc::new(TextScribe::all_versions(names::TITLE)),
            Arc::new(TextScribe::all_versions(names::ROLE)),
            Arc::new(TextScribe::all_versions(names::EMAIL)),
            Arc::new(TextScribe::all_versions(names::TEL)),
            Arc::new(TextScribe::all_versions(names::UID)),
            Arc::new(TextScribe::legacy(names::MAILER)),
            Arc::new(TextScribe::legacy(names::LABEL)),
            Arc::new(TextScribe::v3_only(names::SORT_STRING)),
            Arc::new(TextScribe::v3_only(names::CLASS)),
            Arc::new(TextScribe::v3_only(names::NAME)),
            Arc::new(TextScribe::product_id()),
            Arc::new(TextScribe::kind()),
            Arc::new(TextScribe::language()),
            Arc::new(UriScribe::all_versions(names::URL)),
            Arc::new(UriScribe::modern(names::SOURCE)),
            Arc::new(UriScribe::modern(names::IMPP)),
            Arc::new(UriScribe::v4_only(names::FBURL)),
            Arc::new(UriScribe::v4_only(names::CALURI)),
            Arc::new(UriScribe::v4_only(names::CALADRURI)),
            Arc::new(UriScribe::v4_only(names::MEMBER)),
            Arc::new(ListScribe::new(names::CATEGORIES)),
            Arc::new(ListScribe::new(names::NICKNAME)),
            Arc::new(NameScribe),
            Arc::new(AddressScribe),
            Arc::new(OrganizationScribe),
            Arc::new(GenderScribe),
            Arc::new(DateScribe::birthday()),
            Arc::new(DateScribe::anniversary()),
            Arc::new(DateScribe::deathdate()),
            Arc::new(RevScribe),
            Arc::new(GeoScribe),
            Arc::new(TimezoneScribe),
            Arc::new(BinaryScribe::photo()),
            Arc::new(BinaryScribe::logo()),
            Arc::new(BinaryScribe::sound()),
            Arc::new(BinaryScribe::key()),
            Arc::new(AgentScribe),
        ];
        for scribe in builtins {
            index.register(scribe);
        }
        index
    }
}
