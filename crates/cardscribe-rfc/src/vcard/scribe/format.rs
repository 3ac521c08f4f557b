//! Value shapes exchanged with the xCard and hCard layers.
//!
//! The XML and HTML layers own their parsers; scribes only see these
//! simplified element descriptions.

use std::fmt;

/// xCard namespace (RFC 6351).
pub const XCARD_NAMESPACE: &str = "urn:ietf:params:xml:ns:vcard-4.0";

/// A namespace-qualified XML name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: String,
    pub local: String,
}

impl QName {
    #[must_use]
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// A name in the xCard namespace.
    #[must_use]
    pub fn xcard(local: impl Into<String>) -> Self {
        Self::new(XCARD_NAMESPACE, local)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

/// One value element inside an xCard property element, e.g. `<text>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name in the xCard namespace.
    pub name: String,
    pub text: String,
}

/// The value elements of an xCard property, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlValue {
    pub elements: Vec<XmlElement>,
}

impl XmlValue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A value with a single element.
    #[must_use]
    pub fn single(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut value = Self::new();
        value.push(name, text);
        value
    }

    pub fn push(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.elements.push(XmlElement {
            name: name.into(),
            text: text.into(),
        });
    }

    /// Text of the first element with the given local name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.text.as_str())
    }

    /// Texts of every element with the given local name.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.name == name)
            .map(|e| e.text.clone())
            .collect()
    }
}

/// An hCard element as seen by a scribe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlElement {
    /// Lower-case tag name.
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub classes: Vec<String>,
    /// Text content with whitespace collapsed.
    pub text: String,
    pub children: Vec<HtmlElement>,
}

impl HtmlElement {
    #[must_use]
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c.eq_ignore_ascii_case(class))
    }

    /// Descendants carrying a class, depth first.
    #[must_use]
    pub fn find_class(&self, class: &str) -> Vec<&HtmlElement> {
        let mut found = Vec::new();
        for child in &self.children {
            if child.has_class(class) {
                found.push(child);
            }
            found.extend(child.find_class(class));
        }
        found
    }

    /// The value microformats read from an element: `title` on `abbr`,
    /// `datetime` on `time`, `value` on `data`, `href` on links, `src` on
    /// media, otherwise the text content.
    #[must_use]
    pub fn value(&self) -> &str {
        let attribute = match self.tag.as_str() {
            "abbr" => self.attribute("title"),
            "time" => self.attribute("datetime"),
            "data" => self.attribute("value"),
            "a" | "link" | "area" => self.attribute("href"),
            "img" | "object" | "audio" | "video" | "source" => self
                .attribute("src")
                .or_else(|| self.attribute("data")),
            _ => None,
        };
        attribute.unwrap_or(&self.text).trim()
    }
}
