//! Style references, numbering levels and indentation

use serde::Serialize;

/// A style referenced by a paragraph, run or table
///
/// Two styles are equal when their IDs are equal; the display name is
/// informational only.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct Style {
    /// Style ID (as used by `w:pStyle`, `w:rStyle`, `w:tblStyle`)
    pub id: String,
    /// Display name from styles.xml, if the style is defined
    pub name: Option<String>,
}

impl Style {
    /// Create a style with a display name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// Create a style that is referenced but has no known name
    pub fn undefined(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Human-readable description used in warnings
    pub fn describe(&self) -> String {
        let id_description = format!("Style ID: {}", self.id);
        match &self.name {
            Some(name) => format!("{} ({})", name, id_description),
            None => id_description,
        }
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A resolved list level from numbering.xml
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberingLevel {
    /// Level index (`w:ilvl`), kept as the raw string value
    pub level_index: String,
    /// Whether the level is numbered rather than bulleted
    pub is_ordered: bool,
}

impl NumberingLevel {
    /// Create an ordered list level
    pub fn ordered(level_index: impl Into<String>) -> Self {
        Self {
            level_index: level_index.into(),
            is_ordered: true,
        }
    }

    /// Create a bulleted list level
    pub fn unordered(level_index: impl Into<String>) -> Self {
        Self {
            level_index: level_index.into(),
            is_ordered: false,
        }
    }
}

/// Paragraph indentation (`w:ind`), values kept as written in the source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParagraphIndent {
    pub start: Option<String>,
    pub end: Option<String>,
    pub first_line: Option<String>,
    pub hanging: Option<String>,
}
