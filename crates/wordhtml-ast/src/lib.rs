//! wordhtml-ast - Document tree definitions
//!
//! This crate provides the typed document tree produced by the DOCX body
//! reader and consumed by the HTML converter, plus the small value types
//! shared by both sides (styles, numbering levels, warnings).

pub mod block;
pub mod document;
pub mod element;
pub mod inline;
pub mod style;
pub mod warnings;

pub use block::{Comment, Note, NoteType, Paragraph, Table, TableCell, TableOfContents, TableRow};
pub use document::{Document, Notes};
pub use element::DocumentElement;
pub use inline::{
    Bookmark, Break, BreakType, CommentReference, Hyperlink, HyperlinkTarget, Image, ImageOpener,
    NoteReference, Run, VerticalAlignment,
};
pub use style::{NumberingLevel, ParagraphIndent, Style};
pub use warnings::{Warnings, WithWarnings};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
