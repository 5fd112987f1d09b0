//! Body XML reader
//!
//! Converts the elements of a WordprocessingML part body (document,
//! footnotes, endnotes, comments) into document elements. The reader is
//! stateful: complex fields (`w:fldChar` ... `w:fldChar`) span sibling
//! runs, so the open fields and the pending instruction text live on the
//! reader instance. Use one reader per part.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::warn;

use wordhtml_ast::{
    Bookmark, Break, CommentReference, DocumentElement, Hyperlink, Image, ImageOpener, NoteReference,
    NoteType, NumberingLevel, Paragraph, ParagraphIndent, Run, Style, Table, TableOfContents,
    VerticalAlignment, Warnings, WithWarnings,
};

use crate::archive::OoxmlArchive;
use crate::content_types::ContentTypes;
use crate::error::Result;
use crate::file_reader::FileReader;
use crate::numbering::Numbering;
use crate::read_result::{into_elements, BodyNode, ReadResult};
use crate::relationships::Relationships;
use crate::styles::StyleSheet;
use crate::table_merge::calculate_rowspans;
use crate::uris::{replace_fragment, uri_to_zip_entry_name};
use crate::xml::{XmlElement, XmlNode};

/// Image types that browsers render natively
const IMAGE_TYPES_SUPPORTED_BY_BROWSERS: &[&str] = &[
    "image/png",
    "image/gif",
    "image/jpeg",
    "image/svg+xml",
    "image/tiff",
];

/// An open complex field
#[derive(Debug, Clone, PartialEq)]
enum ComplexField {
    Unknown,
    Hyperlink(String),
}

type StyleLookup = fn(&StyleSheet, &str) -> Option<Style>;

/// Stateful reader for one body part
pub struct BodyXmlReader<'a> {
    styles: &'a StyleSheet,
    numbering: &'a Numbering,
    relationships: &'a Relationships,
    content_types: &'a ContentTypes,
    archive: Arc<OoxmlArchive>,
    file_reader: Arc<dyn FileReader>,
    /// Directory that relative relationship targets are resolved against
    base_dir: String,
    current_instr_text: String,
    complex_field_stack: Vec<ComplexField>,
}

impl<'a> BodyXmlReader<'a> {
    pub fn new(
        styles: &'a StyleSheet,
        numbering: &'a Numbering,
        relationships: &'a Relationships,
        content_types: &'a ContentTypes,
        archive: Arc<OoxmlArchive>,
        file_reader: Arc<dyn FileReader>,
    ) -> Self {
        Self {
            styles,
            numbering,
            relationships,
            content_types,
            archive,
            file_reader,
            base_dir: "word".to_string(),
            current_instr_text: String::new(),
            complex_field_stack: Vec::new(),
        }
    }

    /// Resolve relative targets against another directory (default `word`)
    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Read a sequence of sibling nodes into document elements
    ///
    /// Extra elements that reached the top level are appended after the
    /// normal ones.
    pub fn read_all(&mut self, nodes: &[XmlNode]) -> Result<WithWarnings<Vec<DocumentElement>>> {
        Ok(self.read_elements(nodes)?.into_output())
    }

    pub(crate) fn read_elements(&mut self, nodes: &[XmlNode]) -> Result<ReadResult> {
        let mut results = Vec::new();
        for node in nodes {
            if let XmlNode::Element(element) = node {
                results.push(self.read_element(element)?);
            }
        }
        Ok(ReadResult::join(results))
    }

    pub(crate) fn read_element(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let result = match element.name.as_str() {
            "w:t" => ReadResult::success(DocumentElement::text(element.inner_text())),
            "w:r" => return self.read_run(element),
            "w:p" => return self.read_paragraph(element),

            "w:fldChar" => self.read_field_char(element),
            "w:instrText" => {
                self.current_instr_text.push_str(&element.inner_text());
                ReadResult::empty()
            }

            "w:tab" => ReadResult::success(DocumentElement::Tab),
            "w:noBreakHyphen" => ReadResult::success(DocumentElement::text("\u{2011}")),
            "w:br" => read_break(element),

            "w:tbl" => return self.read_table(element),
            "w:tr" => return self.read_table_row(element),
            "w:tc" => return self.read_table_cell(element),

            "w:hyperlink" => return self.read_hyperlink(element),
            "w:bookmarkStart" => read_bookmark(element),
            "w:footnoteReference" => read_note_reference(NoteType::Footnote, element),
            "w:endnoteReference" => read_note_reference(NoteType::Endnote, element),
            "w:commentReference" => read_comment_reference(element),

            "w:pict" => return Ok(self.read_elements(&element.children)?.to_extra()),

            "v:imagedata" => return self.read_imagedata(element),

            "wp:inline" | "wp:anchor" => return self.read_inline(element),

            "w:sdt" => return self.read_sdt(element),

            "w:ins" | "w:object" | "w:smartTag" | "w:drawing" | "v:group" | "v:rect"
            | "v:roundrect" | "v:shape" | "v:textbox" | "w:txbxContent" => {
                return self.read_elements(&element.children)
            }

            "office-word:wrap"
            | "v:shadow"
            | "v:shapetype"
            | "w:bookmarkEnd"
            | "w:sectPr"
            | "w:proofErr"
            | "w:lastRenderedPageBreak"
            | "w:commentRangeStart"
            | "w:commentRangeEnd"
            | "w:del"
            | "w:footnoteRef"
            | "w:endnoteRef"
            | "w:annotationRef"
            | "w:pPr"
            | "w:rPr"
            | "w:tblPr"
            | "w:tblGrid"
            | "w:trPr"
            | "w:tcPr" => ReadResult::empty(),

            other => ReadResult::empty_with_warning(format!(
                "An unrecognised element was ignored: {}",
                other
            )),
        };
        Ok(result)
    }

    fn read_run(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let properties = element.find_child_or_empty("w:rPr");
        let (style, style_warnings) = self.read_style(
            properties,
            "w:rStyle",
            "Run",
            StyleSheet::find_character_style_by_id,
        );
        let children = self.read_elements(&element.children)?;

        // Fields opened or closed by this run's own children already apply
        let hyperlink_href = self.current_hyperlink_href();
        Ok(children
            .map(|children| {
                let mut children = into_elements(children);
                if let Some(href) = hyperlink_href {
                    children = vec![Hyperlink::href(href, None, children).into()];
                }
                node(Run {
                    bold: read_boolean_element(properties, "w:b"),
                    italic: read_boolean_element(properties, "w:i"),
                    underline: read_boolean_element(properties, "w:u"),
                    strikethrough: read_boolean_element(properties, "w:strike"),
                    small_caps: read_boolean_element(properties, "w:smallCaps"),
                    vertical_alignment: read_vertical_alignment(properties),
                    style,
                    children,
                })
            })
            .prepend_warnings(style_warnings))
    }

    /// Href of the nearest enclosing hyperlink field, if any
    fn current_hyperlink_href(&self) -> Option<String> {
        self.complex_field_stack
            .iter()
            .rev()
            .find_map(|field| match field {
                ComplexField::Hyperlink(href) => Some(href.clone()),
                ComplexField::Unknown => None,
            })
    }

    fn read_paragraph(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let properties = element.find_child_or_empty("w:pPr");
        let numbering = self.read_numbering(properties);
        let indent = read_paragraph_indent(properties);
        let (style, style_warnings) = self.read_style(
            properties,
            "w:pStyle",
            "Paragraph",
            StyleSheet::find_paragraph_style_by_id,
        );

        Ok(self
            .read_elements(&element.children)?
            .map(|children| {
                node(Paragraph {
                    style,
                    numbering,
                    indent,
                    children: into_elements(children),
                })
            })
            .prepend_warnings(style_warnings)
            .append_extra())
    }

    fn read_field_char(&mut self, element: &XmlElement) -> ReadResult {
        match element.attribute("w:fldCharType").unwrap_or_default() {
            "begin" => {
                self.complex_field_stack.push(ComplexField::Unknown);
                self.current_instr_text.clear();
            }
            "end" => {
                self.complex_field_stack.pop();
            }
            "separate" => {
                let field = parse_hyperlink_field_code(&self.current_instr_text)
                    .map(ComplexField::Hyperlink)
                    .unwrap_or(ComplexField::Unknown);
                // A separate without a begin has nothing to replace
                if self.complex_field_stack.pop().is_some() {
                    self.complex_field_stack.push(field);
                }
            }
            _ => {}
        }
        ReadResult::empty()
    }

    fn read_style(
        &self,
        properties: &XmlElement,
        style_tag_name: &str,
        style_type: &str,
        find_style_by_id: StyleLookup,
    ) -> (Option<Style>, Warnings) {
        let Some(style_id) = read_val(properties, style_tag_name) else {
            return (None, Warnings::new());
        };
        match find_style_by_id(self.styles, style_id) {
            Some(style) => (Some(style), Warnings::new()),
            None => (
                Some(Style::undefined(style_id)),
                Warnings::single(format!(
                    "{} style with ID {} was referenced but not defined in the document",
                    style_type, style_id
                )),
            ),
        }
    }

    fn read_numbering(&self, properties: &XmlElement) -> Option<NumberingLevel> {
        let numbering_properties = properties.find_child_or_empty("w:numPr");
        let num_id = read_val(numbering_properties, "w:numId")?;
        let level = read_val(numbering_properties, "w:ilvl")?;
        self.numbering.find_level(num_id, level)
    }

    fn read_table(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let properties = element.find_child_or_empty("w:tblPr");
        let (style, style_warnings) = self.read_style(
            properties,
            "w:tblStyle",
            "Table",
            StyleSheet::find_table_style_by_id,
        );

        Ok(self
            .read_elements(&element.children)?
            .flat_map(calculate_rowspans)
            .map(|rows| {
                node(Table {
                    style,
                    children: into_elements(rows),
                })
            })
            .prepend_warnings(style_warnings))
    }

    fn read_table_row(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let is_header = element
            .find_child_or_empty("w:trPr")
            .has_child("w:tblHeader");
        Ok(self
            .read_elements(&element.children)?
            .map(|cells| BodyNode::UnmergedRow { cells, is_header }))
    }

    fn read_table_cell(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let properties = element.find_child_or_empty("w:tcPr");
        let mut warnings = Warnings::new();
        let colspan = match properties.find_child_or_empty("w:gridSpan").attribute("w:val") {
            None => 1,
            Some(value) => match value.trim().parse::<u32>() {
                Ok(colspan) if colspan >= 1 => colspan,
                _ => {
                    warnings.push(format!(
                        "Invalid w:gridSpan value was ignored: {}",
                        value
                    ));
                    1
                }
            },
        };
        let vmerge = read_vmerge(properties);

        Ok(self
            .read_elements(&element.children)?
            .map(|children| BodyNode::UnmergedCell {
                vmerge,
                colspan,
                children,
            })
            .prepend_warnings(warnings))
    }

    fn read_hyperlink(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let relationship_id = element.attribute("r:id");
        let anchor = element.attribute("w:anchor");
        let target_frame = element
            .attribute("w:tgtFrame")
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let children = self.read_elements(&element.children)?;

        if let Some(relationship_id) = relationship_id {
            let target = self.find_target(relationship_id)?;
            let href = match anchor {
                Some(anchor) => replace_fragment(target, anchor),
                None => target.to_string(),
            };
            Ok(children.map(|children| {
                node(Hyperlink::href(href, target_frame, into_elements(children)))
            }))
        } else if let Some(anchor) = anchor {
            Ok(children.map(|children| {
                node(Hyperlink::anchor(anchor, target_frame, into_elements(children)))
            }))
        } else {
            Ok(children)
        }
    }

    fn read_imagedata(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let Some(relationship_id) = element.attribute("r:id") else {
            return Ok(ReadResult::empty_with_warning(
                "A v:imagedata element without a relationship ID was ignored",
            ));
        };
        let title = element.attribute("o:title").map(str::to_string);
        let image_path = self.relationship_id_to_docx_path(relationship_id)?;
        let opener = self.archive.part_opener(&image_path);
        Ok(self.read_image(&image_path, title, opener))
    }

    fn read_inline(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let properties = element.find_child_or_empty("wp:docPr");
        let alt_text = properties
            .attribute("descr")
            .filter(|description| !description.trim().is_empty())
            .or_else(|| properties.attribute("title"))
            .map(str::to_string);

        let blips = element
            .find_children("a:graphic")
            .flat_map(|e| e.find_children("a:graphicData"))
            .flat_map(|e| e.find_children("pic:pic"))
            .flat_map(|e| e.find_children("pic:blipFill"))
            .flat_map(|e| e.find_children("a:blip"));

        let mut results = Vec::new();
        for blip in blips {
            results.push(self.read_blip(blip, alt_text.clone())?);
        }
        Ok(ReadResult::join(results))
    }

    fn read_blip(&self, blip: &XmlElement, alt_text: Option<String>) -> Result<ReadResult> {
        if let Some(embed_id) = blip.attribute("r:embed") {
            let image_path = self.relationship_id_to_docx_path(embed_id)?;
            let opener = self.archive.part_opener(&image_path);
            Ok(self.read_image(&image_path, alt_text, opener))
        } else if let Some(link_id) = blip.attribute("r:link") {
            let image_path = self.find_target(link_id)?.to_string();
            let file_reader = Arc::clone(&self.file_reader);
            let uri = image_path.clone();
            let opener = ImageOpener::new(move || file_reader.open(&uri));
            Ok(self.read_image(&image_path, alt_text, opener))
        } else {
            Ok(ReadResult::empty())
        }
    }

    fn read_image(
        &self,
        image_path: &str,
        alt_text: Option<String>,
        opener: ImageOpener,
    ) -> ReadResult {
        let content_type = self.content_types.find_content_type(image_path);
        let warning = match content_type.as_deref() {
            Some(supported) if IMAGE_TYPES_SUPPORTED_BY_BROWSERS.contains(&supported) => None,
            other => Some(format!(
                "Image of type {} is unlikely to display in web browsers",
                other.unwrap_or("(unknown)")
            )),
        };
        let image = node(Image {
            alt_text,
            content_type,
            opener,
        });
        match warning {
            Some(warning) => ReadResult::with_warning(vec![image], warning),
            None => ReadResult::success(image),
        }
    }

    fn read_sdt(&mut self, element: &XmlElement) -> Result<ReadResult> {
        let is_table_of_contents = element
            .find_child("w:sdtPr")
            .is_some_and(|properties| properties.has_child("w:docPartObj"));
        let content = self.read_elements(&element.find_child_or_empty("w:sdtContent").children)?;
        if is_table_of_contents {
            Ok(content.map(|children| {
                node(TableOfContents {
                    children: into_elements(children),
                })
            }))
        } else {
            Ok(content)
        }
    }

    fn find_target(&self, relationship_id: &str) -> Result<&str> {
        self.relationships
            .find_target_by_relationship_id(relationship_id)
            .inspect_err(|e| warn!(error = %e, "unresolvable relationship in body"))
    }

    fn relationship_id_to_docx_path(&self, relationship_id: &str) -> Result<String> {
        let target = self.find_target(relationship_id)?;
        Ok(uri_to_zip_entry_name(&self.base_dir, target))
    }
}

fn node(element: impl Into<DocumentElement>) -> BodyNode {
    BodyNode::Element(element.into())
}

fn read_val<'e>(element: &'e XmlElement, name: &str) -> Option<&'e str> {
    element.find_child_or_empty(name).attribute("w:val")
}

/// Absent ⇒ false; present without a value ⇒ true; else true unless "false"/"0"
fn read_boolean_element(properties: &XmlElement, tag_name: &str) -> bool {
    properties
        .find_child(tag_name)
        .map(|child| {
            child
                .attribute("w:val")
                .map_or(true, |value| value != "false" && value != "0")
        })
        .unwrap_or(false)
}

fn read_vertical_alignment(properties: &XmlElement) -> VerticalAlignment {
    match read_val(properties, "w:vertAlign") {
        Some("superscript") => VerticalAlignment::Superscript,
        Some("subscript") => VerticalAlignment::Subscript,
        _ => VerticalAlignment::Baseline,
    }
}

fn read_paragraph_indent(properties: &XmlElement) -> ParagraphIndent {
    let indent = properties.find_child_or_empty("w:ind");
    let attribute = |name: &str| indent.attribute(name).map(str::to_string);
    ParagraphIndent {
        start: attribute("w:start").or_else(|| attribute("w:left")),
        end: attribute("w:end").or_else(|| attribute("w:right")),
        first_line: attribute("w:firstLine"),
        hanging: attribute("w:hanging"),
    }
}

fn read_break(element: &XmlElement) -> ReadResult {
    match element.attribute("w:type").unwrap_or("textWrapping") {
        "textWrapping" => ReadResult::success(DocumentElement::Break(Break::LINE)),
        "page" => ReadResult::success(DocumentElement::Break(Break::PAGE)),
        "column" => ReadResult::success(DocumentElement::Break(Break::COLUMN)),
        other => ReadResult::empty_with_warning(format!("Unsupported break type: {}", other)),
    }
}

fn read_vmerge(properties: &XmlElement) -> bool {
    properties
        .find_child("w:vMerge")
        .map(|vmerge| vmerge.attribute("w:val").map_or(true, |val| val == "continue"))
        .unwrap_or(false)
}

fn read_bookmark(element: &XmlElement) -> ReadResult {
    match element.attribute("w:name") {
        Some("_GoBack") => ReadResult::empty(),
        Some(name) => ReadResult::success(DocumentElement::Bookmark(Bookmark {
            name: name.to_string(),
        })),
        None => ReadResult::empty_with_warning("A w:bookmarkStart element without a name was ignored"),
    }
}

fn read_note_reference(note_type: NoteType, element: &XmlElement) -> ReadResult {
    match element.attribute("w:id") {
        Some(note_id) => ReadResult::success(DocumentElement::NoteReference(NoteReference {
            note_type,
            note_id: note_id.to_string(),
        })),
        None => ReadResult::empty_with_warning(format!(
            "A {} reference without an ID was ignored",
            note_type.id_fragment()
        )),
    }
}

fn read_comment_reference(element: &XmlElement) -> ReadResult {
    match element.attribute("w:id") {
        Some(comment_id) => {
            ReadResult::success(DocumentElement::CommentReference(CommentReference {
                comment_id: comment_id.to_string(),
            }))
        }
        None => ReadResult::empty_with_warning("A comment reference without an ID was ignored"),
    }
}

/// Target of a `HYPERLINK "<target>"` field instruction
fn parse_hyperlink_field_code(instr_text: &str) -> Option<String> {
    static HYPERLINK_RE: OnceLock<Regex> = OnceLock::new();
    let re = HYPERLINK_RE.get_or_init(|| {
        Regex::new(r#"^\s*HYPERLINK "(.*)""#).expect("HYPERLINK pattern is valid")
    });
    re.captures(instr_text).map(|caps| caps[1].to_string())
}
