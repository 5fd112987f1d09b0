//! Block-level elements for document structure
//!
//! Paragraphs, tables, tables of contents, and the note/comment bodies
//! that are rendered after the main content.

use serde::Serialize;

use crate::element::DocumentElement;
use crate::style::{NumberingLevel, ParagraphIndent, Style};

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Paragraph {
    /// Paragraph style (`w:pStyle`)
    pub style: Option<Style>,
    /// List level, when the paragraph is part of a numbered/bulleted list
    pub numbering: Option<NumberingLevel>,
    pub indent: ParagraphIndent,
    pub children: Vec<DocumentElement>,
}

impl Paragraph {
    /// Create an unstyled paragraph
    pub fn new(children: Vec<DocumentElement>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }
}

/// A table
///
/// Children are normally [`TableRow`]s, but the reader passes through
/// whatever it found when the table structure is unexpected.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    pub style: Option<Style>,
    pub children: Vec<DocumentElement>,
}

/// A table row
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableRow {
    pub children: Vec<DocumentElement>,
    /// Whether the row repeats as a header (`w:tblHeader`)
    pub is_header: bool,
}

/// A table cell with its resolved spans
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub rowspan: u32,
    pub colspan: u32,
    pub children: Vec<DocumentElement>,
}

impl TableCell {
    /// Create a 1x1 cell
    pub fn new(children: Vec<DocumentElement>) -> Self {
        Self {
            rowspan: 1,
            colspan: 1,
            children,
        }
    }
}

/// Content of a structured document tag marked as a table of contents
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableOfContents {
    pub children: Vec<DocumentElement>,
}

/// Footnote or endnote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Footnote,
    Endnote,
}

impl NoteType {
    /// Fragment used when generating HTML ids
    pub fn id_fragment(self) -> &'static str {
        match self {
            NoteType::Footnote => "footnote",
            NoteType::Endnote => "endnote",
        }
    }
}

/// A footnote or endnote body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub note_type: NoteType,
    pub id: String,
    pub body: Vec<DocumentElement>,
}

/// A comment body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub comment_id: String,
    pub author_name: Option<String>,
    pub author_initials: Option<String>,
    pub body: Vec<DocumentElement>,
}
