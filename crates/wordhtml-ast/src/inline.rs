//! Inline elements for document content
//!
//! This module defines the elements that appear inside paragraphs:
//! runs, hyperlinks, bookmarks, breaks, note/comment references and images.

use std::fmt;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::element::DocumentElement;
use crate::style::Style;

/// Vertical alignment of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Baseline,
    Superscript,
    Subscript,
}

/// A run of text sharing the same character formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Run {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub small_caps: bool,
    pub vertical_alignment: VerticalAlignment,
    /// Character style (`w:rStyle`)
    pub style: Option<Style>,
    pub children: Vec<DocumentElement>,
}

impl Run {
    /// Create an unformatted run
    pub fn new(children: Vec<DocumentElement>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }
}

/// Kind of break (`w:br/@w:type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    Line,
    Page,
    Column,
}

/// A line, page or column break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Break {
    pub break_type: BreakType,
}

impl Break {
    pub const LINE: Break = Break {
        break_type: BreakType::Line,
    };
    pub const PAGE: Break = Break {
        break_type: BreakType::Page,
    };
    pub const COLUMN: Break = Break {
        break_type: BreakType::Column,
    };
}

/// Where a hyperlink points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HyperlinkTarget {
    /// External (or fully resolved) URL
    Href(String),
    /// Bookmark name inside the same document
    Anchor(String),
}

/// A hyperlink wrapping inline content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hyperlink {
    pub target: HyperlinkTarget,
    /// Target frame (`w:tgtFrame`), e.g. `_blank`
    pub target_frame: Option<String>,
    pub children: Vec<DocumentElement>,
}

impl Hyperlink {
    /// Create a hyperlink to a URL
    pub fn href(
        href: impl Into<String>,
        target_frame: Option<String>,
        children: Vec<DocumentElement>,
    ) -> Self {
        Self {
            target: HyperlinkTarget::Href(href.into()),
            target_frame,
            children,
        }
    }

    /// Create a hyperlink to a bookmark in the same document
    pub fn anchor(
        anchor: impl Into<String>,
        target_frame: Option<String>,
        children: Vec<DocumentElement>,
    ) -> Self {
        Self {
            target: HyperlinkTarget::Anchor(anchor.into()),
            target_frame,
            children,
        }
    }

    pub fn href_value(&self) -> Option<&str> {
        match &self.target {
            HyperlinkTarget::Href(href) => Some(href),
            HyperlinkTarget::Anchor(_) => None,
        }
    }

    pub fn anchor_value(&self) -> Option<&str> {
        match &self.target {
            HyperlinkTarget::Anchor(anchor) => Some(anchor),
            HyperlinkTarget::Href(_) => None,
        }
    }
}

/// A bookmark (anchor point for internal links)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    pub name: String,
}

/// Reference to a footnote or endnote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteReference {
    pub note_type: crate::block::NoteType,
    pub note_id: String,
}

/// Reference to a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentReference {
    pub comment_id: String,
}

/// Lazily opens the bytes of an image
///
/// Nothing is read until [`ImageOpener::open`] is called; the returned
/// stream is owned by the caller and released when dropped.
#[derive(Clone)]
pub struct ImageOpener(Arc<dyn Fn() -> io::Result<Box<dyn Read>> + Send + Sync>);

impl ImageOpener {
    pub fn new<F>(open: F) -> Self
    where
        F: Fn() -> io::Result<Box<dyn Read>> + Send + Sync + 'static,
    {
        Self(Arc::new(open))
    }

    /// An opener over bytes already in memory
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        Self::new(move || Ok(Box::new(Cursor::new(bytes.to_vec())) as Box<dyn Read>))
    }

    /// Open a fresh stream over the image bytes
    pub fn open(&self) -> io::Result<Box<dyn Read>> {
        (self.0)()
    }
}

impl fmt::Debug for ImageOpener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ImageOpener(..)")
    }
}

/// An embedded or linked image
#[derive(Debug, Clone, Serialize)]
pub struct Image {
    pub alt_text: Option<String>,
    /// MIME type resolved from the package content types
    pub content_type: Option<String>,
    #[serde(skip)]
    pub opener: ImageOpener,
}

impl Image {
    pub fn open(&self) -> io::Result<Box<dyn Read>> {
        self.opener.open()
    }
}

// The opener is a capability, not data: images compare by metadata.
impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.alt_text == other.alt_text && self.content_type == other.content_type
    }
}
