//! XML element trees for OOXML parts
//!
//! Parts are parsed into a small owned tree. Element and attribute names
//! are rewritten to canonical prefixes (`w:`, `r:`, `wp:`, ...) based on
//! their namespace URI, so the readers never depend on the prefixes a
//! particular producer chose. `mc:AlternateContent` blocks are replaced by
//! the content of their `mc:Fallback` branch.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::{OoxmlError, Result};

/// Namespace URIs and the prefixes they are canonicalised to
const NAMESPACE_PREFIXES: &[(&str, &str)] = &[
    (
        "http://schemas.openxmlformats.org/wordprocessingml/2006/main",
        "w",
    ),
    ("http://purl.oclc.org/ooxml/wordprocessingml/main", "w"),
    (
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
        "r",
    ),
    (
        "http://purl.oclc.org/ooxml/officeDocument/relationships",
        "r",
    ),
    (
        "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing",
        "wp",
    ),
    ("http://purl.oclc.org/ooxml/drawingml/wordprocessingDrawing", "wp"),
    ("http://schemas.openxmlformats.org/drawingml/2006/main", "a"),
    ("http://purl.oclc.org/ooxml/drawingml/main", "a"),
    (
        "http://schemas.openxmlformats.org/drawingml/2006/picture",
        "pic",
    ),
    ("http://purl.oclc.org/ooxml/drawingml/picture", "pic"),
    (
        "http://schemas.openxmlformats.org/package/2006/content-types",
        "content-types",
    ),
    (
        "http://schemas.openxmlformats.org/package/2006/relationships",
        "relationships",
    ),
    (
        "http://schemas.openxmlformats.org/markup-compatibility/2006",
        "mc",
    ),
    ("urn:schemas-microsoft-com:vml", "v"),
    ("urn:schemas-microsoft-com:office:office", "o"),
    ("urn:schemas-microsoft-com:office:word", "office-word"),
];

/// A node of a parsed XML part
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with canonicalised names
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified name, e.g. `w:p`
    pub name: String,
    /// Attributes in document order, names canonicalised like element names
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

static EMPTY_ELEMENT: XmlElement = XmlElement {
    name: String::new(),
    attributes: Vec::new(),
    children: Vec::new(),
};

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder helper: add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder helper: add a child node
    pub fn with_child(mut self, child: impl Into<XmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Get an attribute value by qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given name
    pub fn find_child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|child| child.name == name)
    }

    /// First child element with the given name, or an empty element
    ///
    /// Lets property lookups chain without checking every level.
    pub fn find_child_or_empty(&self, name: &str) -> &XmlElement {
        self.find_child(name).unwrap_or(&EMPTY_ELEMENT)
    }

    /// All child elements with the given name
    pub fn find_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.child_elements().filter(move |child| child.name == name)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.find_child(name).is_some()
    }

    /// Concatenated text of all descendant text nodes
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        XmlNode::Element(element)
    }
}

impl From<&str> for XmlNode {
    fn from(text: &str) -> Self {
        XmlNode::Text(text.to_string())
    }
}

fn collect_text(nodes: &[XmlNode], out: &mut String) {
    for node in nodes {
        match node {
            XmlNode::Text(text) => out.push_str(text),
            XmlNode::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// Parse an XML part into its root element
pub fn parse_xml(xml: &[u8]) -> Result<XmlElement> {
    let mut reader = NsReader::from_reader(xml);
    // Don't trim text - whitespace inside w:t is significant
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                stack.push(start_element(&reader, e)?);
            }
            Event::Empty(ref e) => {
                let element = start_element(&reader, e)?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut root);
                }
            }
            Event::Text(ref e) => {
                if let Some(parent) = stack.last_mut() {
                    let text = e.unescape()?;
                    if !text.is_empty() {
                        parent.children.push(XmlNode::Text(text.into_owned()));
                    }
                }
            }
            Event::CData(e) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    parent.children.push(XmlNode::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| OoxmlError::InvalidStructure("XML part has no root element".to_string()))
}

fn start_element(reader: &NsReader<&[u8]>, e: &BytesStart) -> Result<XmlElement> {
    let (ns, local) = reader.resolve_element(e.name());
    let name = canonical_name(ns, local.as_ref());

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        let key = canonical_name(ns, local.as_ref());
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn close_element(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) if element.name == "mc:AlternateContent" => {
            if let Some(fallback) = element.find_child("mc:Fallback") {
                parent.children.extend(fallback.children.iter().cloned());
            }
        }
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => *root = Some(element),
    }
}

fn canonical_name(ns: ResolveResult, local: &[u8]) -> String {
    let local = String::from_utf8_lossy(local);
    match ns {
        ResolveResult::Bound(Namespace(uri)) => {
            match NAMESPACE_PREFIXES
                .iter()
                .find(|(known, _)| known.as_bytes() == uri)
            {
                Some((_, prefix)) => format!("{}:{}", prefix, local),
                None => format!("{{{}}}{}", String::from_utf8_lossy(uri), local),
            }
        }
        ResolveResult::Unknown(prefix) => {
            format!("{}:{}", String::from_utf8_lossy(&prefix), local)
        }
        ResolveResult::Unbound => local.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalises_prefixes() {
        let xml = br#"<x:document xmlns:x="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <x:body><x:p x:rsidR="00AB"/></x:body>
        </x:document>"#;

        let root = parse_xml(xml).unwrap();
        assert_eq!(root.name, "w:document");
        let paragraph = root.find_child_or_empty("w:body").find_child("w:p").unwrap();
        assert_eq!(paragraph.attribute("w:rsidR"), Some("00AB"));
    }

    #[test]
    fn test_default_namespace_and_unprefixed_attributes() {
        let xml = br#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
            <Default Extension="png" ContentType="image/png"/>
        </Types>"#;

        let root = parse_xml(xml).unwrap();
        assert_eq!(root.name, "content-types:Types");
        let default = root.find_child("content-types:Default").unwrap();
        assert_eq!(default.attribute("Extension"), Some("png"));
    }

    #[test]
    fn test_unknown_namespace_uses_braced_uri() {
        let root = parse_xml(br#"<a xmlns="urn:example"/>"#).unwrap();
        assert_eq!(root.name, "{urn:example}a");
    }

    #[test]
    fn test_preserves_whitespace_and_unescapes_text() {
        let xml = br#"<w:t xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"> a &amp; b </w:t>"#;
        let root = parse_xml(xml).unwrap();
        assert_eq!(root.inner_text(), " a & b ");
    }

    #[test]
    fn test_alternate_content_uses_fallback() {
        let xml = br#"<w:r xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
                         xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">
            <mc:AlternateContent>
                <mc:Choice Requires="wps"><w:t>choice</w:t></mc:Choice>
                <mc:Fallback><w:t>fallback</w:t></mc:Fallback>
            </mc:AlternateContent>
        </w:r>"#;

        let root = parse_xml(xml).unwrap();
        let names: Vec<_> = root.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["w:t"]);
        assert_eq!(root.inner_text().trim(), "fallback");
    }

    #[test]
    fn test_find_child_or_empty_chains() {
        let element = XmlElement::new("w:p");
        let missing = element.find_child_or_empty("w:pPr").find_child_or_empty("w:pStyle");
        assert!(missing.attribute("w:val").is_none());
        assert!(!element.has_child("w:pPr"));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        assert!(matches!(
            parse_xml(b""),
            Err(OoxmlError::InvalidStructure(_))
        ));
    }
}
