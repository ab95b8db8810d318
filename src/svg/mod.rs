//! Minimal SVG reading and writing
//!
//! The rounding engine only needs the root's direct children, but any markup
//! it does not touch must survive a round trip. This module keeps a small
//! generic XML tree for that purpose:
//! - `parser` builds the tree with quick-xml
//! - `writer` serializes a rounded [`Document`](crate::document::Document)

/// quick-xml based reader
pub mod parser;
/// String serializer for rounded documents
pub mod writer;

pub use parser::{parse_svg, parse_svg_str};
pub use writer::{save_svg, write_svg};

/// XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified name as written in the source (`rect`, `svg:rect`, ...)
    pub name: String,
    /// Attributes in source order, values unescaped
    pub attrs: Vec<(String, String)>,
    /// Child nodes in source order
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Name without its namespace prefix
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Value of attribute `key`
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// One node of the XML tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element
    Element(Element),
    /// Unescaped character data
    Text(String),
    /// Raw `<![CDATA[...]]>` content
    CData(String),
    /// Comment body without the `<!--`/`-->` delimiters
    Comment(String),
}

impl XmlNode {
    /// Whitespace-only text, dropped between top-level children
    pub fn is_blank_text(&self) -> bool {
        matches!(self, XmlNode::Text(text) if text.trim().is_empty())
    }
}

pub(crate) fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let el = Element::new("ns0:rect");
        assert_eq!(el.local_name(), "rect");
        let plain = Element::new("rect");
        assert_eq!(plain.local_name(), "rect");
    }

    #[test]
    fn test_blank_text() {
        assert!(XmlNode::Text("\n  ".into()).is_blank_text());
        assert!(!XmlNode::Text(" a ".into()).is_blank_text());
        assert!(!XmlNode::Comment(String::new()).is_blank_text());
    }
}
