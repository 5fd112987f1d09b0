//! # wordhtml-ooxml
//!
//! DOCX (Office Open XML) reading for wordhtml.
//!
//! This crate provides functionality to:
//! - Unpack a .docx package and parse its XML parts
//! - Resolve styles, numbering, relationships and content types
//! - Read the document body, notes and comments into a
//!   [`wordhtml_ast::Document`], collecting warnings on the way
//!
//! ## Example: Reading a Document
//!
//! ```no_run
//! let read = wordhtml_ooxml::read_docx_file("document.docx")?;
//! for warning in read.warnings.iter() {
//!     eprintln!("warning: {}", warning);
//! }
//! println!("{}", read.value.plain_text());
//! # Ok::<(), wordhtml_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod body_reader;
pub mod content_types;
pub mod docx;
pub mod error;
pub mod file_reader;
pub mod notes;
pub mod numbering;
mod read_result;
pub mod relationships;
pub mod styles;
mod table_merge;
pub mod test_utils;
pub mod uris;
pub mod xml;

pub use archive::OoxmlArchive;
pub use body_reader::BodyXmlReader;
pub use content_types::ContentTypes;
pub use docx::{read_docx, read_docx_bytes, read_docx_file};
pub use error::{OoxmlError, Result};
pub use file_reader::{FileReader, PathFileReader};
pub use numbering::Numbering;
pub use relationships::Relationships;
pub use styles::{StyleSheet, StyleType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
