//! Error types for OOXML operations

use thiserror::Error;

/// Errors that can occur while reading a DOCX package
///
/// Everything recoverable is reported as a warning instead; these abort
/// the read.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute in XML content
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Required file not found in archive
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// A relationship ID used by the document has no entry in the part's .rels
    #[error("Could not find relationship with ID: {0}")]
    MissingRelationship(String),

    /// Invalid document structure
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
