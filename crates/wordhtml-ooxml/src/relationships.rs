//! Part relationships (`_rels/*.rels`)
//!
//! Each part may declare relationships from ids to targets. The body
//! reader resolves hyperlinks and images through them, and the package
//! reader finds the main document part and its styles, numbering, notes
//! and comments parts by relationship type.

use indexmap::IndexMap;

use crate::error::{OoxmlError, Result};
use crate::xml::{parse_xml, XmlElement};

const RELATIONSHIP_TYPE_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/";

impl Relationships {
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const TYPE_HYPERLINK: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
    pub const TYPE_IMAGE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const TYPE_NUMBERING: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    pub const TYPE_FOOTNOTES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footnotes";
    pub const TYPE_ENDNOTES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/endnotes";
    pub const TYPE_COMMENTS: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";
}

/// One declared relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipTarget {
    /// URL or package-relative path
    pub target: String,
    /// Relationship type URI, empty when the declaration has none
    pub rel_type: String,
    /// `External` for targets outside the package
    pub target_mode: Option<String>,
}

impl RelationshipTarget {
    pub fn new(target: impl Into<String>, rel_type: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            rel_type: rel_type.into(),
            target_mode: None,
        }
    }

    pub fn is_external(&self) -> bool {
        self.target_mode.as_deref() == Some("External")
    }

    /// Last segment of the type URI, e.g. `image`
    pub fn short_type(&self) -> &str {
        self.rel_type
            .strip_prefix(RELATIONSHIP_TYPE_BASE)
            .unwrap_or(&self.rel_type)
    }
}

/// Relationships of one part, in declaration order
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: IndexMap<String, RelationshipTarget>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(xml: &[u8]) -> Result<Self> {
        Ok(Self::from_element(&parse_xml(xml)?))
    }

    /// Declarations without an `Id` or `Target` are skipped
    pub fn from_element(root: &XmlElement) -> Self {
        let mut relationships = Relationships::new();
        for declaration in root.find_children("relationships:Relationship") {
            let (Some(id), Some(target)) = (declaration.attribute("Id"), declaration.attribute("Target"))
            else {
                continue;
            };
            let mut relationship =
                RelationshipTarget::new(target, declaration.attribute("Type").unwrap_or_default());
            relationship.target_mode = declaration.attribute("TargetMode").map(str::to_string);
            relationships.insert(id, relationship);
        }
        relationships
    }

    /// Register a relationship; a repeated id keeps its first position
    /// but takes the new target
    pub fn insert(&mut self, id: impl Into<String>, target: RelationshipTarget) {
        self.by_id.insert(id.into(), target);
    }

    /// Resolve a relationship id to its target
    ///
    /// An id used by a part but not declared in its .rels file means the
    /// package is inconsistent.
    pub fn find_target_by_relationship_id(&self, id: &str) -> Result<&str> {
        self.get(id)
            .ok_or_else(|| OoxmlError::MissingRelationship(id.to_string()))
    }

    /// Targets of every relationship of the given type, in declaration order
    pub fn find_targets_by_type(&self, rel_type: &str) -> Vec<&str> {
        self.by_id
            .values()
            .filter(|relationship| relationship.rel_type == rel_type)
            .map(|relationship| relationship.target.as_str())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.get_target(id).map(|relationship| relationship.target.as_str())
    }

    pub fn get_target(&self, id: &str) -> Option<&RelationshipTarget> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationshipTarget)> {
        self.by_id
            .iter()
            .map(|(id, relationship)| (id.as_str(), relationship))
    }
}
