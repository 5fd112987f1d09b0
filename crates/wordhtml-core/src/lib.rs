//! wordhtml-core - DOCX to semantic HTML
//!
//! Core library for wordhtml: converts the document tree read by
//! `wordhtml-ooxml` into HTML, guided by a style map.
//!
//! # Example
//!
//! ```no_run
//! use wordhtml_core::{convert_docx, ConversionOptions};
//!
//! let result = convert_docx("document.docx", &ConversionOptions::default())?;
//! for warning in result.warnings.iter() {
//!     eprintln!("warning: {}", warning);
//! }
//! println!("{}", result.value);
//! # Ok::<(), wordhtml_core::ConversionError>(())
//! ```

pub mod document_to_html;
pub mod error;
pub mod html;
pub mod html_path;
pub mod images;
pub mod options;
pub mod raw_text;
pub mod settings;
pub mod style_map;
pub mod writer;

use std::path::Path;

use tracing::debug;
use wordhtml_ast::{Document, WithWarnings};

// Re-export main types and functions
pub use document_to_html::DocumentToHtml;
pub use error::{ConversionError, Result};
pub use html::{simplify, Attributes, HtmlElement, HtmlNode, HtmlTag};
pub use html_path::{HtmlPath, HtmlPathElement};
pub use images::{DataUriImageConverter, ImageConverter, ImageSource};
pub use options::ConversionOptions;
pub use raw_text::extract_raw_text;
pub use settings::Settings;
pub use style_map::{default_style_map, StyleMap};
pub use writer::write_html;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a .docx file to an HTML fragment
///
/// Warnings from reading come first, followed by conversion warnings.
pub fn convert_docx(path: impl AsRef<Path>, options: &ConversionOptions) -> Result<WithWarnings<String>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "converting document");
    let read = wordhtml_ooxml::read_docx_file(path)?;
    convert_read_document(read, options)
}

/// Convert a .docx held in memory to an HTML fragment
pub fn convert_docx_bytes(bytes: &[u8], options: &ConversionOptions) -> Result<WithWarnings<String>> {
    let read = wordhtml_ooxml::read_docx_bytes(bytes)?;
    convert_read_document(read, options)
}

/// Convert a document tree to an HTML fragment
pub fn convert_document(document: &Document, options: &ConversionOptions) -> Result<WithWarnings<String>> {
    let converted = DocumentToHtml::convert_document(document, options)?;
    Ok(converted.map(|nodes| write_html(&simplify(nodes))))
}

/// Read a .docx file and extract its text
pub fn extract_docx_raw_text(path: impl AsRef<Path>) -> Result<WithWarnings<String>> {
    let read = wordhtml_ooxml::read_docx_file(path)?;
    Ok(read.map(|document| extract_raw_text(&document)))
}

fn convert_read_document(
    read: WithWarnings<Document>,
    options: &ConversionOptions,
) -> Result<WithWarnings<String>> {
    let mut warnings = read.warnings;
    let converted = convert_document(&read.value, options)?;
    warnings.extend(converted.warnings);
    Ok(WithWarnings::new(converted.value, warnings))
}
