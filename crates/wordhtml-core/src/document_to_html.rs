//! Document tree to HTML nodes
//!
//! [`DocumentToHtml`] walks the tree once, depth first. Styled elements
//! are wrapped according to the style map; note and comment references
//! are recorded on the way and their bodies rendered after the main
//! content, notes as an `ol` and comments as a `dl`, each entry ending
//! with a link back to its reference.
//!
//! # Example
//!
//! ```
//! use wordhtml_ast::{Document, DocumentElement, Paragraph, Run};
//! use wordhtml_core::{simplify, write_html, ConversionOptions, DocumentToHtml};
//!
//! let mut run = Run::new(vec![DocumentElement::text("Hi")]);
//! run.bold = true;
//! let document = Document::new(vec![Paragraph::new(vec![run.into()]).into()]);
//!
//! let result = DocumentToHtml::convert_document(&document, &ConversionOptions::default()).unwrap();
//! assert_eq!(write_html(&simplify(result.value)), "<p><strong>Hi</strong></p>");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, warn};

use wordhtml_ast::{
    Break, BreakType, Comment, CommentReference, Document, DocumentElement, Hyperlink,
    HyperlinkTarget, Image, Note, NoteReference, NoteType, Paragraph, Run, Table, TableCell,
    TableOfContents, VerticalAlignment, Warnings, WithWarnings,
};

use crate::error::{ConversionError, Result};
use crate::html::{attributes, Attributes, HtmlNode};
use crate::html_path::HtmlPath;
use crate::images::ImageSource;
use crate::options::ConversionOptions;
use crate::style_map::StyleMap;

#[derive(Debug, Clone, Copy, Default)]
struct Context {
    /// Inside the leading header rows of a table
    is_header: bool,
}

struct ReferencedComment<'a> {
    label: String,
    comment: &'a Comment,
}

/// Converter state for a single conversion
pub struct DocumentToHtml<'a> {
    options: &'a ConversionOptions,
    style_map: &'a StyleMap,
    comments: HashMap<&'a str, &'a Comment>,
    note_references: Vec<NoteReference>,
    referenced_comments: Vec<ReferencedComment<'a>>,
    warnings: Warnings,
}

impl<'a> DocumentToHtml<'a> {
    /// Convert a whole document, appending the notes and comments trailers
    pub fn convert_document(
        document: &Document,
        options: &ConversionOptions,
    ) -> Result<WithWarnings<Vec<HtmlNode>>> {
        let style_map = options.effective_style_map();
        let mut converter = DocumentToHtml::new(options, &style_map, &document.comments);
        let nodes = converter.document_to_html(document)?;
        debug!(
            nodes = nodes.len(),
            notes = converter.note_references.len(),
            comments = converter.referenced_comments.len(),
            warnings = converter.warnings.len(),
            "converted document"
        );
        Ok(WithWarnings::new(nodes, converter.warnings))
    }

    /// Convert a single element; no comments are known, so any comment
    /// reference fails
    pub fn convert_element(
        element: &DocumentElement,
        options: &ConversionOptions,
    ) -> Result<WithWarnings<Vec<HtmlNode>>> {
        let style_map = options.effective_style_map();
        let mut converter = DocumentToHtml::new(options, &style_map, &[]);
        let nodes = converter.element_to_html(element, Context::default())?;
        Ok(WithWarnings::new(nodes, converter.warnings))
    }

    fn new(options: &'a ConversionOptions, style_map: &'a StyleMap, comments: &'a [Comment]) -> Self {
        Self {
            options,
            style_map,
            comments: comments
                .iter()
                .map(|comment| (comment.comment_id.as_str(), comment))
                .collect(),
            note_references: Vec::new(),
            referenced_comments: Vec::new(),
            warnings: Warnings::new(),
        }
    }

    fn document_to_html(&mut self, document: &Document) -> Result<Vec<HtmlNode>> {
        let context = Context::default();
        let mut nodes = self.elements_to_html(&document.children, context)?;

        // References found while rendering the trailers are numbered but
        // not rendered themselves.
        let note_references = self.note_references.clone();
        let mut note_items = Vec::new();
        for reference in &note_references {
            match document.notes.find_note(reference.note_type, &reference.note_id) {
                Some(note) => note_items.push(self.note_to_html(note, context)?),
                None => self.warnings.push(format!(
                    "{} with ID {} was referenced but not defined in the document",
                    note_type_name(reference.note_type),
                    reference.note_id
                )),
            }
        }
        if !note_items.is_empty() {
            nodes.push(HtmlNode::element("ol", Attributes::new(), note_items));
        }

        let mut comment_items = Vec::new();
        for index in 0..self.referenced_comments.len() {
            let label = self.referenced_comments[index].label.clone();
            let comment = self.referenced_comments[index].comment;
            comment_items.extend(self.comment_to_html(&label, comment, context)?);
        }
        if !comment_items.is_empty() {
            nodes.push(HtmlNode::element("dl", Attributes::new(), comment_items));
        }

        Ok(nodes)
    }

    fn note_to_html(&mut self, note: &Note, context: Context) -> Result<HtmlNode> {
        let fragment = note.note_type.id_fragment();
        let id = self.referent_id(fragment, &note.id);
        let reference_id = self.reference_id(fragment, &note.id);
        let mut body = self.elements_to_html(&note.body, context)?;
        body.push(back_link(&reference_id));
        Ok(HtmlNode::element("li", attributes([("id", id)]), body))
    }

    fn comment_to_html(
        &mut self,
        label: &str,
        comment: &Comment,
        context: Context,
    ) -> Result<Vec<HtmlNode>> {
        let id = self.referent_id("comment", &comment.comment_id);
        let reference_id = self.reference_id("comment", &comment.comment_id);
        let mut body = self.elements_to_html(&comment.body, context)?;
        body.push(back_link(&reference_id));
        Ok(vec![
            HtmlNode::element(
                "dt",
                attributes([("id", id)]),
                vec![HtmlNode::text(format!("Comment {}", label))],
            ),
            HtmlNode::element("dd", Attributes::new(), body),
        ])
    }

    fn elements_to_html(
        &mut self,
        elements: &[DocumentElement],
        context: Context,
    ) -> Result<Vec<HtmlNode>> {
        let mut nodes = Vec::new();
        for element in elements {
            nodes.extend(self.element_to_html(element, context)?);
        }
        Ok(nodes)
    }

    fn element_to_html(&mut self, element: &DocumentElement, context: Context) -> Result<Vec<HtmlNode>> {
        match element {
            DocumentElement::Text { value } if value.is_empty() => Ok(Vec::new()),
            DocumentElement::Text { value } => Ok(vec![HtmlNode::text(value.clone())]),
            DocumentElement::Tab => Ok(vec![HtmlNode::text("\t")]),
            DocumentElement::Break(element) => Ok(self.break_to_html(element)),
            DocumentElement::Run(run) => self.run_to_html(run, context),
            DocumentElement::Paragraph(paragraph) => self.paragraph_to_html(paragraph, context),
            DocumentElement::Hyperlink(hyperlink) => self.hyperlink_to_html(hyperlink, context),
            DocumentElement::Bookmark(bookmark) => Ok(vec![HtmlNode::element(
                "a",
                attributes([("id", self.generate_id(&bookmark.name))]),
                Vec::new(),
            )
            .force_write()]),
            DocumentElement::NoteReference(reference) => Ok(self.note_reference_to_html(reference)),
            DocumentElement::CommentReference(reference) => self.comment_reference_to_html(reference),
            DocumentElement::Image(image) => Ok(self.image_to_html(image)),
            DocumentElement::Table(table) => self.table_to_html(table),
            DocumentElement::TableRow(row) => Ok(vec![HtmlNode::element(
                "tr",
                Attributes::new(),
                self.elements_to_html(&row.children, context)?,
            )]),
            DocumentElement::TableCell(cell) => self.table_cell_to_html(cell, context),
            DocumentElement::Note(note) => self.elements_to_html(&note.body, context),
            DocumentElement::Comment(comment) => self.elements_to_html(&comment.body, context),
            DocumentElement::TableOfContents(toc) => self.table_of_contents_to_html(toc, context),
        }
    }

    fn paragraph_to_html(&mut self, paragraph: &Paragraph, context: Context) -> Result<Vec<HtmlNode>> {
        let style_map = self.style_map;
        let path = match style_map.paragraph_html_path(paragraph) {
            Some(path) => Cow::Borrowed(path),
            None => {
                if let Some(style) = &paragraph.style {
                    self.warnings
                        .push(format!("Unrecognised paragraph style: {}", style.describe()));
                }
                Cow::Owned(HtmlPath::element("p"))
            }
        };
        path.wrap(self.options.preserve_empty_paragraphs, || {
            self.elements_to_html(&paragraph.children, context)
        })
    }

    fn run_to_html(&mut self, run: &Run, context: Context) -> Result<Vec<HtmlNode>> {
        let style_map = self.style_map;

        // Innermost first
        let mut paths: Vec<Cow<'_, HtmlPath>> = Vec::new();
        if run.small_caps {
            paths.push(or_default(style_map.small_caps.as_ref(), HtmlPath::empty));
        }
        if run.strikethrough {
            paths.push(or_default(style_map.strikethrough.as_ref(), || {
                HtmlPath::collapsible("s")
            }));
        }
        if run.underline {
            paths.push(or_default(style_map.underline.as_ref(), HtmlPath::empty));
        }
        match run.vertical_alignment {
            VerticalAlignment::Subscript => paths.push(Cow::Owned(HtmlPath::collapsible("sub"))),
            VerticalAlignment::Superscript => paths.push(Cow::Owned(HtmlPath::collapsible("sup"))),
            VerticalAlignment::Baseline => {}
        }
        if run.italic {
            paths.push(or_default(style_map.italic.as_ref(), || HtmlPath::collapsible("em")));
        }
        if run.bold {
            paths.push(or_default(style_map.bold.as_ref(), || {
                HtmlPath::collapsible("strong")
            }));
        }
        let style_path = match style_map.run_html_path(run) {
            Some(path) => Cow::Borrowed(path),
            None => {
                if let Some(style) = &run.style {
                    self.warnings
                        .push(format!("Unrecognised run style: {}", style.describe()));
                }
                Cow::Owned(HtmlPath::empty())
            }
        };
        paths.push(style_path);

        if paths.iter().any(|path| path.is_ignore()) {
            return Ok(Vec::new());
        }
        let nodes = self.elements_to_html(&run.children, context)?;
        Ok(paths
            .iter()
            .fold(nodes, |nodes, path| path.wrap_nodes(nodes, false)))
    }

    fn break_to_html(&mut self, element: &Break) -> Vec<HtmlNode> {
        let path = match self.style_map.break_html_path(element) {
            Some(path) => Cow::Borrowed(path),
            None if element.break_type == BreakType::Line => Cow::Owned(HtmlPath::element("br")),
            None => Cow::Owned(HtmlPath::empty()),
        };
        path.wrap_nodes(Vec::new(), false)
    }

    fn table_to_html(&mut self, table: &Table) -> Result<Vec<HtmlNode>> {
        let style_map = self.style_map;
        let path = style_map
            .table_html_path(table)
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(HtmlPath::element("table")));
        path.wrap(false, || self.table_children_to_html(table))
    }

    fn table_children_to_html(&mut self, table: &Table) -> Result<Vec<HtmlNode>> {
        let body_index = table
            .children
            .iter()
            .position(|child| !is_header_row(child))
            .unwrap_or(table.children.len());
        let header = Context { is_header: true };
        let body = Context { is_header: false };

        if body_index == 0 {
            return self.elements_to_html(&table.children, body);
        }
        let head_rows = self.elements_to_html(&table.children[..body_index], header)?;
        let body_rows = self.elements_to_html(&table.children[body_index..], body)?;
        Ok(vec![
            HtmlNode::element("thead", Attributes::new(), head_rows),
            HtmlNode::element("tbody", Attributes::new(), body_rows),
        ])
    }

    fn table_cell_to_html(&mut self, cell: &TableCell, context: Context) -> Result<Vec<HtmlNode>> {
        let tag = if context.is_header { "th" } else { "td" };
        let mut cell_attributes = Attributes::new();
        if cell.colspan != 1 {
            cell_attributes.insert("colspan".to_string(), cell.colspan.to_string());
        }
        if cell.rowspan != 1 {
            cell_attributes.insert("rowspan".to_string(), cell.rowspan.to_string());
        }
        let children = self.elements_to_html(&cell.children, context)?;
        Ok(vec![HtmlNode::element(tag, cell_attributes, children).force_write()])
    }

    fn hyperlink_to_html(&mut self, hyperlink: &Hyperlink, context: Context) -> Result<Vec<HtmlNode>> {
        let href = match &hyperlink.target {
            HyperlinkTarget::Href(href) => href.clone(),
            HyperlinkTarget::Anchor(anchor) => format!("#{}", self.generate_id(anchor)),
        };
        let mut link_attributes = attributes([("href", href)]);
        if let Some(target_frame) = &hyperlink.target_frame {
            link_attributes.insert("target".to_string(), target_frame.clone());
        }
        let children = self.elements_to_html(&hyperlink.children, context)?;
        Ok(vec![HtmlNode::collapsible_element("a", link_attributes, children)])
    }

    fn note_reference_to_html(&mut self, reference: &NoteReference) -> Vec<HtmlNode> {
        self.note_references.push(reference.clone());
        let fragment = reference.note_type.id_fragment();
        let note_id = self.referent_id(fragment, &reference.note_id);
        let reference_id = self.reference_id(fragment, &reference.note_id);
        vec![HtmlNode::element(
            "sup",
            Attributes::new(),
            vec![HtmlNode::element(
                "a",
                attributes([("href", format!("#{}", note_id)), ("id", reference_id)]),
                vec![HtmlNode::text(format!("[{}]", self.note_references.len()))],
            )],
        )]
    }

    /// The comment is numbered and recorded even when the style map hides
    /// the reference itself.
    fn comment_reference_to_html(&mut self, reference: &CommentReference) -> Result<Vec<HtmlNode>> {
        let comment_id = &reference.comment_id;
        let comment = match self.comments.get(comment_id.as_str()) {
            Some(comment) => *comment,
            None => {
                warn!(comment_id = %comment_id, "referenced comment is not defined");
                return Err(ConversionError::MissingComment(comment_id.clone()));
            }
        };
        let label = format!(
            "[{}{}]",
            comment.author_initials.as_deref().unwrap_or(""),
            self.referenced_comments.len() + 1
        );
        self.referenced_comments.push(ReferencedComment {
            label: label.clone(),
            comment,
        });

        let style_map = self.style_map;
        let path = or_default(style_map.comment_reference.as_ref(), || HtmlPath::Ignore);
        let link = HtmlNode::element(
            "a",
            attributes([
                ("href", format!("#{}", self.referent_id("comment", comment_id))),
                ("id", self.reference_id("comment", comment_id)),
            ]),
            vec![HtmlNode::text(label)],
        );
        Ok(path.wrap_nodes(vec![link], false))
    }

    fn image_to_html(&mut self, image: &Image) -> Vec<HtmlNode> {
        let Some(content_type) = image.content_type.as_deref() else {
            return Vec::new();
        };
        match self
            .options
            .image_converter
            .convert(&ImageSource::new(image, content_type))
        {
            Ok(mut image_attributes) => {
                if let Some(alt_text) = &image.alt_text {
                    image_attributes.insert("alt".to_string(), alt_text.clone());
                }
                vec![HtmlNode::element("img", image_attributes, Vec::new())]
            }
            Err(err) => {
                debug!(error = %err, content_type, "image could not be converted");
                self.warnings.push(err.to_string());
                Vec::new()
            }
        }
    }

    fn table_of_contents_to_html(
        &mut self,
        toc: &TableOfContents,
        context: Context,
    ) -> Result<Vec<HtmlNode>> {
        let path = HtmlPath::element_with_attributes(
            "div",
            attributes([("class", self.options.toc_class.clone())]),
        );
        path.wrap(self.options.preserve_empty_paragraphs, || {
            self.elements_to_html(&toc.children, context)
        })
    }

    fn generate_id(&self, name: &str) -> String {
        format!("{}{}", self.options.id_prefix, name)
    }

    /// Id of the element a reference points at, e.g. `footnote-1`
    fn referent_id(&self, reference_type: &str, id: &str) -> String {
        self.generate_id(&format!("{}-{}", reference_type, id))
    }

    /// Id of the reference itself, e.g. `footnote-ref-1`
    fn reference_id(&self, reference_type: &str, id: &str) -> String {
        self.generate_id(&format!("{}-ref-{}", reference_type, id))
    }
}

fn or_default(path: Option<&HtmlPath>, default: impl FnOnce() -> HtmlPath) -> Cow<'_, HtmlPath> {
    match path {
        Some(path) => Cow::Borrowed(path),
        None => Cow::Owned(default()),
    }
}

fn is_header_row(element: &DocumentElement) -> bool {
    matches!(element, DocumentElement::TableRow(row) if row.is_header)
}

fn note_type_name(note_type: NoteType) -> &'static str {
    match note_type {
        NoteType::Footnote => "Footnote",
        NoteType::Endnote => "Endnote",
    }
}

/// `<p> <a href="#…">↑</a></p>`, merged into a trailing body paragraph
fn back_link(reference_id: &str) -> HtmlNode {
    HtmlNode::collapsible_element(
        "p",
        Attributes::new(),
        vec![
            HtmlNode::text(" "),
            HtmlNode::element(
                "a",
                attributes([("href", format!("#{}", reference_id))]),
                vec![HtmlNode::text("↑")],
            ),
        ],
    )
}
