//! The document element sum type

use serde::Serialize;

use crate::block::{Comment, Note, Paragraph, Table, TableCell, TableOfContents, TableRow};
use crate::inline::{Bookmark, Break, CommentReference, Hyperlink, Image, NoteReference, Run};

/// Any node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DocumentElement {
    Text { value: String },
    Tab,
    Break(Break),
    Run(Run),
    Paragraph(Paragraph),
    Hyperlink(Hyperlink),
    Bookmark(Bookmark),
    NoteReference(NoteReference),
    CommentReference(CommentReference),
    Image(Image),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    Note(Note),
    Comment(Comment),
    TableOfContents(TableOfContents),
}

impl DocumentElement {
    /// Shorthand for a text node
    pub fn text(value: impl Into<String>) -> Self {
        DocumentElement::Text {
            value: value.into(),
        }
    }

    /// Children of container elements; empty for leaves
    pub fn children(&self) -> &[DocumentElement] {
        match self {
            DocumentElement::Run(run) => &run.children,
            DocumentElement::Paragraph(paragraph) => &paragraph.children,
            DocumentElement::Hyperlink(hyperlink) => &hyperlink.children,
            DocumentElement::Table(table) => &table.children,
            DocumentElement::TableRow(row) => &row.children,
            DocumentElement::TableCell(cell) => &cell.children,
            DocumentElement::Note(note) => &note.body,
            DocumentElement::Comment(comment) => &comment.body,
            DocumentElement::TableOfContents(toc) => &toc.children,
            DocumentElement::Text { .. }
            | DocumentElement::Tab
            | DocumentElement::Break(_)
            | DocumentElement::Bookmark(_)
            | DocumentElement::NoteReference(_)
            | DocumentElement::CommentReference(_)
            | DocumentElement::Image(_) => &[],
        }
    }

    /// Concatenated text of this element and its descendants
    pub fn plain_text(&self) -> String {
        match self {
            DocumentElement::Text { value } => value.clone(),
            DocumentElement::Tab => "\t".to_string(),
            other => other.children().iter().map(|c| c.plain_text()).collect(),
        }
    }
}

impl From<Run> for DocumentElement {
    fn from(run: Run) -> Self {
        DocumentElement::Run(run)
    }
}

impl From<Paragraph> for DocumentElement {
    fn from(paragraph: Paragraph) -> Self {
        DocumentElement::Paragraph(paragraph)
    }
}

impl From<Hyperlink> for DocumentElement {
    fn from(hyperlink: Hyperlink) -> Self {
        DocumentElement::Hyperlink(hyperlink)
    }
}

impl From<Table> for DocumentElement {
    fn from(table: Table) -> Self {
        DocumentElement::Table(table)
    }
}

impl From<TableRow> for DocumentElement {
    fn from(row: TableRow) -> Self {
        DocumentElement::TableRow(row)
    }
}

impl From<TableCell> for DocumentElement {
    fn from(cell: TableCell) -> Self {
        DocumentElement::TableCell(cell)
    }
}

impl From<TableOfContents> for DocumentElement {
    fn from(toc: TableOfContents) -> Self {
        DocumentElement::TableOfContents(toc)
    }
}

impl From<Image> for DocumentElement {
    fn from(image: Image) -> Self {
        DocumentElement::Image(image)
    }
}
