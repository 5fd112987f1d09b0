//! Shared test utilities for wordhtml crates
//!
//! [`DocxFixture`] builds small but valid .docx packages in memory, so
//! tests can describe a document by its body XML and the parts it needs.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

use crate::error::Result;
use crate::relationships::Relationships;

/// Namespace declarations used by the generated parts
pub const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" "#,
    r#"xmlns:v="urn:schemas-microsoft-com:vml" "#,
    r#"xmlns:o="urn:schemas-microsoft-com:office:office""#,
);

/// Builder for an in-memory .docx
///
/// # Example
/// ```
/// use wordhtml_ooxml::test_utils::DocxFixture;
///
/// let docx = DocxFixture::new()
///     .body(r#"<w:p><w:r><w:t>Hello</w:t></w:r></w:p>"#)
///     .build()
///     .unwrap();
/// let read = wordhtml_ooxml::read_docx_bytes(&docx).unwrap();
/// assert_eq!(read.value.plain_text(), "Hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocxFixture {
    body: String,
    /// (id, type, target) of word/document.xml relationships
    relationships: Vec<(String, String, String)>,
    /// Extra parts, written as given
    parts: Vec<(String, Vec<u8>)>,
}

impl DocxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of `w:body`
    pub fn body(mut self, xml: impl Into<String>) -> Self {
        self.body = xml.into();
        self
    }

    /// Style definitions, without the `w:styles` root
    pub fn styles(self, xml: &str) -> Self {
        self.main_part(Relationships::TYPE_STYLES, "styles.xml", "w:styles", xml)
    }

    /// Numbering definitions, without the `w:numbering` root
    pub fn numbering(self, xml: &str) -> Self {
        self.main_part(Relationships::TYPE_NUMBERING, "numbering.xml", "w:numbering", xml)
    }

    /// Footnotes, without the `w:footnotes` root
    pub fn footnotes(self, xml: &str) -> Self {
        self.main_part(Relationships::TYPE_FOOTNOTES, "footnotes.xml", "w:footnotes", xml)
    }

    /// Endnotes, without the `w:endnotes` root
    pub fn endnotes(self, xml: &str) -> Self {
        self.main_part(Relationships::TYPE_ENDNOTES, "endnotes.xml", "w:endnotes", xml)
    }

    /// Comments, without the `w:comments` root
    pub fn comments(self, xml: &str) -> Self {
        self.main_part(Relationships::TYPE_COMMENTS, "comments.xml", "w:comments", xml)
    }

    /// Add a relationship of the main document part
    pub fn relationship(mut self, id: &str, rel_type: &str, target: &str) -> Self {
        self.relationships
            .push((id.to_string(), rel_type.to_string(), target.to_string()));
        self
    }

    /// Add an image under `word/media/` and a relationship to it
    pub fn image(self, id: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.relationship(id, Relationships::TYPE_IMAGE, &format!("media/{}", file_name))
            .part(format!("word/media/{}", file_name), bytes.to_vec())
    }

    /// Add an arbitrary part
    pub fn part(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.parts.push((path.into(), contents.into()));
        self
    }

    fn main_part(self, rel_type: &str, file_name: &str, root: &str, xml: &str) -> Self {
        let id = format!("rIdPart{}", self.relationships.len() + 1);
        let contents = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><{root} {ns}>{xml}</{root}>"#,
            root = root,
            ns = NAMESPACES,
            xml = xml
        );
        self.relationship(&id, rel_type, file_name)
            .part(format!("word/{}", file_name), contents)
    }

    /// Write the package
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#,
        )?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#,
        )?;

        zip.start_file("word/_rels/document.xml.rels", options)?;
        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, rel_type, target) in &self.relationships {
            rels.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id, rel_type, target
            ));
        }
        rels.push_str("</Relationships>");
        zip.write_all(rels.as_bytes())?;

        zip.start_file("word/document.xml", options)?;
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><w:document {}><w:body>{}</w:body></w:document>"#,
                NAMESPACES, self.body
            )
            .as_bytes(),
        )?;

        for (path, contents) in &self.parts {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(buffer.into_inner())
    }
}
