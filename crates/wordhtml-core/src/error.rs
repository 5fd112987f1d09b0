//! Error types for conversion

use thiserror::Error;

use wordhtml_ooxml::OoxmlError;

/// Errors that abort a conversion
///
/// Anything recoverable is reported as a warning alongside the output.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// A comment reference points at a comment the document does not define
    #[error("Referenced comment could not be found, id: {0}")]
    MissingComment(String),

    /// Reading the source package failed
    #[error(transparent)]
    Ooxml(#[from] OoxmlError),

    /// Error reading a settings file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for [`crate::Settings`]
    #[error("Invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// Settings parsed but describe an impossible style rule
    #[error("Invalid style rule: {0}")]
    StyleRule(String),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;
