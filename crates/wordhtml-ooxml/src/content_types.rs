//! Content types ([Content_Types].xml)
//!
//! Overrides are keyed by absolute part name; defaults by file extension.
//! Common image extensions resolve even when the package omits them.

use std::collections::HashMap;

use crate::error::Result;
use crate::xml::{parse_xml, XmlElement};

/// Image extensions recognised without a `Default` entry
const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "png"),
    ("gif", "gif"),
    ("jpeg", "jpeg"),
    ("jpg", "jpeg"),
    ("tif", "tiff"),
    ("tiff", "tiff"),
    ("bmp", "bmp"),
];

/// Content type table of a package
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Extension (lowercase) → content type
    defaults: HashMap<String, String>,
    /// Part name (with leading `/`) → content type
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(xml: &[u8]) -> Result<Self> {
        Ok(Self::from_element(&parse_xml(xml)?))
    }

    pub fn from_element(root: &XmlElement) -> Self {
        let mut content_types = ContentTypes::new();
        for default in root.find_children("content-types:Default") {
            if let (Some(extension), Some(content_type)) = (
                default.attribute("Extension"),
                default.attribute("ContentType"),
            ) {
                content_types
                    .defaults
                    .insert(extension.to_lowercase(), content_type.to_string());
            }
        }
        for part in root.find_children("content-types:Override") {
            if let (Some(name), Some(content_type)) =
                (part.attribute("PartName"), part.attribute("ContentType"))
            {
                content_types
                    .overrides
                    .insert(name.to_string(), content_type.to_string());
            }
        }
        content_types
    }

    /// Content type of a part, given its path inside the package
    pub fn find_content_type(&self, path: &str) -> Option<String> {
        let part_name = format!("/{}", path.trim_start_matches('/'));
        if let Some(content_type) = self.overrides.get(&part_name) {
            return Some(content_type.clone());
        }

        let (_, extension) = path.rsplit_once('.')?;
        let extension = extension.to_lowercase();
        if let Some(content_type) = self.defaults.get(&extension) {
            return Some(content_type.clone());
        }

        IMAGE_EXTENSIONS
            .iter()
            .find(|(known, _)| *known == extension)
            .map(|(_, subtype)| format!("image/{}", subtype))
    }
}
