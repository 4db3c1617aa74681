//! Schema document tree
//!
//! A small element tree parsed with quick-xml. Namespace prefixes are dropped from
//! element and attribute names while parsing, so every later name comparison in
//! the crate is unqualified. Namespace declarations are discarded altogether.

use crate::error::{Error, Result};
use crate::limits::Limits;
use indexmap::IndexMap;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Element node in the schema tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Local (unprefixed) element name
    pub name: String,
    /// Attributes by local name, in document order
    pub attributes: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value by local name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    /// Remove every descendant with the given local name, at any depth.
    /// Returns the number of removed subtrees.
    pub fn remove_descendants(&mut self, local_name: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|c| c.local_name() != local_name);
        let mut removed = before - self.children.len();
        for child in &mut self.children {
            removed += child.remove_descendants(local_name);
        }
        removed
    }

    /// Serialize this element and its subtree back to XML
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }

        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        if let Some(ref text) = self.text {
            out.push_str(&escape(text.as_str()));
        }
        for child in &self.children {
            child.write_xml(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// Parsed schema document
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Parse a document from a string with default limits
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes(), &Limits::default())
    }

    /// Parse a document from bytes
    pub fn parse(xml: &[u8], limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    element_stack.push(Self::parse_element(&e)?);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = element_stack.pop() {
                        if let Some(parent) = element_stack.last_mut() {
                            parent.add_child(current);
                        } else {
                            doc.root = Some(current);
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e)?;
                    if let Some(parent) = element_stack.last_mut() {
                        parent.add_child(element);
                    } else {
                        doc.root = Some(element);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?
                            .to_string();
                        if !text.trim().is_empty() {
                            current.set_text(text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // comments, processing instructions, doctype
            }
            buf.clear();
        }

        if !element_stack.is_empty() {
            return Err(Error::Xml(format!(
                "Unexpected end of document inside <{}>",
                element_stack[element_stack.len() - 1].name
            )));
        }

        Ok(doc)
    }

    fn parse_element(start: &BytesStart) -> Result<Element> {
        let name = std::str::from_utf8(start.local_name().as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?
            .to_string();

        let mut element = Element::new(name);

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?;

            if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
                continue;
            }

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .to_string();

            let local = attr_name
                .split_once(':')
                .map(|(_prefix, local)| local)
                .unwrap_or(attr_name);
            element.attributes.insert(local.to_string(), attr_value);
        }

        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<root><child>text</child></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.local_name(), "root");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].local_name(), "child");
        assert_eq!(root.children[0].text.as_deref(), Some("text"));
    }

    #[test]
    fn test_prefixes_are_stripped() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns="urn:x">
            <xs:complexType name="Foo" xs:abstract="true"/>
        </xs:schema>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.local_name(), "schema");
        assert!(root.attributes.is_empty());
        let ct = &root.children[0];
        assert_eq!(ct.local_name(), "complexType");
        assert_eq!(ct.get_attribute("name"), Some("Foo"));
        assert_eq!(ct.get_attribute("abstract"), Some("true"));
    }

    #[test]
    fn test_remove_descendants() {
        let xml = r#"<root><annotation/><a><annotation><documentation>x</documentation></annotation><b/></a></root>"#;
        let mut root = Document::from_string(xml).unwrap().root.unwrap();

        assert_eq!(root.remove_descendants("annotation"), 2);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children.len(), 1);
        assert_eq!(root.children[0].children[0].local_name(), "b");
    }

    #[test]
    fn test_to_xml() {
        let xml = r#"<xs:element xmlns:xs="http://www.w3.org/2001/XMLSchema" name="a&lt;b"><xs:any/></xs:element>"#;
        let elem = Document::from_string(xml).unwrap().root.unwrap();
        assert_eq!(elem.to_xml(), r#"<element name="a&lt;b"><any/></element>"#);
        assert_eq!(Element::new("any").to_xml(), "<any/>");
    }

    #[test]
    fn test_depth_limit() {
        let xml = "<a>".repeat(40) + &"</a>".repeat(40);
        let result = Document::parse(xml.as_bytes(), &Limits::strict());
        assert!(matches!(result, Err(Error::LimitExceeded(_))));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(Document::from_string("<root><child></root>").is_err());
        assert!(Document::from_string("<root><child/>").is_err());
    }
}
