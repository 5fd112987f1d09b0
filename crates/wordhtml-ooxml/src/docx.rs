//! Reading a whole DOCX package into a [`Document`]
//!
//! The main document part is located through the package relationships;
//! styles, numbering, notes and comments are located through the main
//! part's relationships, falling back to the conventional paths. Every
//! part except the main document is optional.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use wordhtml_ast::{Document, NoteType, Warnings, WithWarnings};

use crate::archive::OoxmlArchive;
use crate::body_reader::BodyXmlReader;
use crate::content_types::ContentTypes;
use crate::error::{OoxmlError, Result};
use crate::file_reader::{FileReader, PathFileReader};
use crate::notes::{read_comments, read_notes};
use crate::numbering::Numbering;
use crate::relationships::Relationships;
use crate::styles::StyleSheet;
use crate::uris::{relationships_path, split_path, uri_to_zip_entry_name};
use crate::xml::parse_xml;

const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
const PACKAGE_RELATIONSHIPS_PATH: &str = "_rels/.rels";
const DEFAULT_MAIN_DOCUMENT_PATH: &str = "word/document.xml";

/// Shared, part-independent tables
struct PackageTables {
    content_types: ContentTypes,
    styles: StyleSheet,
    numbering: Numbering,
    archive: Arc<OoxmlArchive>,
    file_reader: Arc<dyn FileReader>,
}

impl PackageTables {
    /// A fresh reader for one part
    fn body_reader<'a>(&'a self, relationships: &'a Relationships, dir: &str) -> BodyXmlReader<'a> {
        BodyXmlReader::new(
            &self.styles,
            &self.numbering,
            relationships,
            &self.content_types,
            Arc::clone(&self.archive),
            Arc::clone(&self.file_reader),
        )
        .with_base_dir(dir)
    }
}

/// Read a .docx file from disk; linked images resolve next to it
pub fn read_docx_file(path: impl AsRef<Path>) -> Result<WithWarnings<Document>> {
    let path = path.as_ref();
    let archive = Arc::new(OoxmlArchive::open(path)?);
    read_docx(archive, Arc::new(PathFileReader::for_document(path)))
}

/// Read a .docx held in memory; only absolute links to external images work
pub fn read_docx_bytes(bytes: &[u8]) -> Result<WithWarnings<Document>> {
    let archive = Arc::new(OoxmlArchive::from_bytes(bytes)?);
    read_docx(archive, Arc::new(PathFileReader::detached()))
}

/// Read the document tree of an unpacked package
pub fn read_docx(
    archive: Arc<OoxmlArchive>,
    file_reader: Arc<dyn FileReader>,
) -> Result<WithWarnings<Document>> {
    let content_types = match archive.get(CONTENT_TYPES_PATH) {
        Some(xml) => ContentTypes::parse(xml)?,
        None => ContentTypes::new(),
    };

    let main_path = find_main_document_path(&archive)?;
    let (main_dir, _) = split_path(&main_path);
    let main_relationships = read_relationships(&archive, &main_path)?;

    let part_path = |rel_type: &str, fallback: &str| -> String {
        main_relationships
            .find_targets_by_type(rel_type)
            .first()
            .map(|target| uri_to_zip_entry_name(main_dir, target))
            .unwrap_or_else(|| uri_to_zip_entry_name(main_dir, fallback))
    };

    let styles = match archive.get(&part_path(Relationships::TYPE_STYLES, "styles.xml")) {
        Some(xml) => StyleSheet::parse(xml)?,
        None => StyleSheet::new(),
    };
    let numbering = match archive.get(&part_path(Relationships::TYPE_NUMBERING, "numbering.xml")) {
        Some(xml) => Numbering::parse(xml)?,
        None => Numbering::new(),
    };
    debug!(
        main = %main_path,
        styles = styles.len(),
        "resolved document parts"
    );

    let tables = PackageTables {
        content_types,
        styles,
        numbering,
        archive: Arc::clone(&archive),
        file_reader,
    };

    let mut warnings = Warnings::new();

    // Body
    let document_xml = archive.require(&main_path)?;
    let root = parse_xml(document_xml)?;
    let body = root.find_child("w:body").ok_or_else(|| {
        OoxmlError::InvalidStructure(
            "Could not find the body element: are you sure this is a docx file?".to_string(),
        )
    })?;
    let children = tables.body_reader(&main_relationships, main_dir).read_all(&body.children)?;
    warnings.extend(children.warnings);

    // Notes
    let mut notes = Vec::new();
    for (note_type, rel_type, fallback) in [
        (NoteType::Footnote, Relationships::TYPE_FOOTNOTES, "footnotes.xml"),
        (NoteType::Endnote, Relationships::TYPE_ENDNOTES, "endnotes.xml"),
    ] {
        let path = part_path(rel_type, fallback);
        let Some(xml) = archive.get(&path) else {
            continue;
        };
        let relationships = read_relationships(&archive, &path)?;
        let (dir, _) = split_path(&path);
        let read = read_notes(
            note_type,
            &parse_xml(xml)?,
            &mut tables.body_reader(&relationships, dir),
        )?;
        debug!(part = %path, count = read.value.len(), "read notes");
        warnings.extend(read.warnings);
        notes.extend(read.value);
    }

    // Comments
    let comments_path = part_path(Relationships::TYPE_COMMENTS, "comments.xml");
    let comments = match archive.get(&comments_path) {
        Some(xml) => {
            let relationships = read_relationships(&archive, &comments_path)?;
            let (dir, _) = split_path(&comments_path);
            let read = read_comments(&parse_xml(xml)?, &mut tables.body_reader(&relationships, dir))?;
            debug!(part = %comments_path, count = read.value.len(), "read comments");
            warnings.extend(read.warnings);
            read.value
        }
        None => Vec::new(),
    };

    let document = Document::new(children.value)
        .with_notes(notes)
        .with_comments(comments);
    debug!(
        elements = document.children.len(),
        warnings = warnings.len(),
        "read document"
    );
    Ok(WithWarnings::new(document, warnings))
}

fn find_main_document_path(archive: &OoxmlArchive) -> Result<String> {
    let Some(xml) = archive.get(PACKAGE_RELATIONSHIPS_PATH) else {
        return Ok(DEFAULT_MAIN_DOCUMENT_PATH.to_string());
    };
    let relationships = Relationships::parse(xml)?;
    Ok(relationships
        .find_targets_by_type(Relationships::TYPE_OFFICE_DOCUMENT)
        .first()
        .map(|target| uri_to_zip_entry_name("", target))
        .unwrap_or_else(|| DEFAULT_MAIN_DOCUMENT_PATH.to_string()))
}

/// Relationships of a part; a part without a .rels file has none
fn read_relationships(archive: &OoxmlArchive, part_path: &str) -> Result<Relationships> {
    match archive.get(&relationships_path(part_path)) {
        Some(xml) => Relationships::parse(xml),
        None => Ok(Relationships::new()),
    }
}
