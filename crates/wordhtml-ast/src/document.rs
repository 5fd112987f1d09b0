//! Document root
//!
//! The body content plus the footnotes, endnotes and comments that the
//! body refers to.

use serde::Serialize;

use crate::block::{Comment, Note, NoteType};
use crate::element::DocumentElement;

/// A complete document
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    /// Body content
    pub children: Vec<DocumentElement>,
    /// Footnotes and endnotes, in definition order
    pub notes: Notes,
    /// Comments, in definition order
    pub comments: Vec<Comment>,
}

impl Document {
    /// Create a document with body content only
    pub fn new(children: Vec<DocumentElement>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = Notes::new(notes);
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    /// Check if the document has no body content
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get plain text content, one line per top-level element
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Footnotes and endnotes
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Notes {
    notes: Vec<Note>,
}

impl Notes {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Look up a note by type and ID
    pub fn find_note(&self, note_type: NoteType, id: &str) -> Option<&Note> {
        self.notes
            .iter()
            .find(|note| note.note_type == note_type && note.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
