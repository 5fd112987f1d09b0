//! Style definitions parsing (word/styles.xml)
//!
//! Only what the body reader needs is kept: the style ID, its display
//! name and the kind of element it applies to. Lookups are split by kind,
//! since a paragraph style and a character style may share an ID.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use wordhtml_ast::Style;

use crate::error::{OoxmlError, Result};

/// Type of style (`w:style/@w:type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleType {
    /// Paragraph style
    Paragraph,
    /// Character (run) style
    Character,
    /// Table style
    Table,
    /// Numbering style
    Numbering,
}

impl StyleType {
    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "paragraph" => Some(StyleType::Paragraph),
            "character" => Some(StyleType::Character),
            "table" => Some(StyleType::Table),
            "numbering" => Some(StyleType::Numbering),
            _ => None,
        }
    }
}

/// Collection of styles from a document
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// Styles keyed by type and style ID
    styles: HashMap<(StyleType, String), Style>,
}

impl StyleSheet {
    /// Create an empty stylesheet (a document without styles.xml)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse styles from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut stylesheet = StyleSheet::default();
        let mut buf = Vec::new();
        let mut current_style: Option<StyleBuilder> = None;
        // Depth below the current w:style, so nested w:name elements are ignored
        let mut depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"style" && current_style.is_none() {
                        current_style = Some(StyleBuilder::from_start(e));
                        depth = 0;
                    } else if current_style.is_some() {
                        if let Some(builder) = current_style.as_mut() {
                            if depth == 0 {
                                builder.read_child(e);
                            }
                        }
                        depth += 1;
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if e.local_name().as_ref() == b"style" {
                        // A self-closing style has no name
                        if let Some((style_type, style)) = StyleBuilder::from_start(e).build() {
                            stylesheet.add(style_type, style);
                        }
                    } else if let Some(builder) = current_style.as_mut() {
                        if depth == 0 {
                            builder.read_child(e);
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    if current_style.is_some() {
                        if depth == 0 && e.local_name().as_ref() == b"style" {
                            if let Some((style_type, style)) =
                                current_style.take().and_then(StyleBuilder::build)
                            {
                                stylesheet.add(style_type, style);
                            }
                        } else {
                            depth = depth.saturating_sub(1);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(stylesheet)
    }

    /// Register a style (used by tests and by parse)
    pub fn add(&mut self, style_type: StyleType, style: Style) {
        self.styles.insert((style_type, style.id.clone()), style);
    }

    pub fn find_paragraph_style_by_id(&self, id: &str) -> Option<Style> {
        self.find(StyleType::Paragraph, id)
    }

    pub fn find_character_style_by_id(&self, id: &str) -> Option<Style> {
        self.find(StyleType::Character, id)
    }

    pub fn find_table_style_by_id(&self, id: &str) -> Option<Style> {
        self.find(StyleType::Table, id)
    }

    pub fn find_numbering_style_by_id(&self, id: &str) -> Option<Style> {
        self.find(StyleType::Numbering, id)
    }

    fn find(&self, style_type: StyleType, id: &str) -> Option<Style> {
        self.styles.get(&(style_type, id.to_string())).cloned()
    }

    /// Number of styles of all types
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[derive(Default)]
struct StyleBuilder {
    id: Option<String>,
    name: Option<String>,
    style_type: Option<StyleType>,
}

impl StyleBuilder {
    fn from_start(e: &BytesStart) -> Self {
        Self {
            id: get_attr(e, b"styleId"),
            name: None,
            style_type: get_attr(e, b"type").and_then(|t| StyleType::from_attribute(&t)),
        }
    }

    fn read_child(&mut self, e: &BytesStart) {
        if e.local_name().as_ref() == b"name" {
            if let Some(val) = get_attr(e, b"val") {
                self.name = Some(val);
            }
        }
    }

    fn build(self) -> Option<(StyleType, Style)> {
        let id = self.id?;
        let style_type = self.style_type?;
        Some((style_type, Style { id, name: self.name }))
    }
}

/// Attribute value by local name, ignoring the prefix
fn get_attr(e: &BytesStart, local_name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local_name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}
