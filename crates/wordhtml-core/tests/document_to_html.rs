//! Conversion of document trees to HTML

use std::io;

use wordhtml_ast::{
    Break, Comment, CommentReference, Document, DocumentElement, Hyperlink, Image, ImageOpener,
    Note, NoteReference, NoteType, NumberingLevel, Paragraph, Run, Style, Table, TableCell,
    TableOfContents, TableRow, VerticalAlignment,
};
use wordhtml_core::style_map::{BreakMatcher, ParagraphMatcher, RunMatcher};
use wordhtml_core::{
    simplify, write_html, Attributes, ConversionError, ConversionOptions, DocumentToHtml,
    HtmlPath, HtmlPathElement, ImageSource, StyleMap,
};

fn convert(document: &Document, options: &ConversionOptions) -> (String, Vec<String>) {
    let result = DocumentToHtml::convert_document(document, options).unwrap();
    (
        write_html(&simplify(result.value)),
        result.warnings.into_vec(),
    )
}

fn html(children: Vec<DocumentElement>) -> String {
    convert(&Document::new(children), &ConversionOptions::default()).0
}

fn text(value: &str) -> DocumentElement {
    DocumentElement::text(value)
}

fn run(children: Vec<DocumentElement>) -> Run {
    Run::new(children)
}

fn paragraph(children: Vec<DocumentElement>) -> DocumentElement {
    Paragraph::new(children).into()
}

fn styled_paragraph(style: Style, children: Vec<DocumentElement>) -> DocumentElement {
    Paragraph {
        style: Some(style),
        ..Paragraph::new(children)
    }
    .into()
}

fn row(cells: Vec<DocumentElement>, is_header: bool) -> DocumentElement {
    TableRow {
        children: cells,
        is_header,
    }
    .into()
}

fn cell(text_value: &str) -> DocumentElement {
    TableCell::new(vec![paragraph(vec![text(text_value)])]).into()
}

// ==================== Paragraphs ====================

#[test]
fn test_bold_run_in_paragraph() {
    let mut bold = run(vec![text("Hi")]);
    bold.bold = true;
    assert_eq!(html(vec![paragraph(vec![bold.into()])]), "<p><strong>Hi</strong></p>");
}

#[test]
fn test_default_heading_mapping() {
    let document = Document::new(vec![styled_paragraph(
        Style::new("Heading1", "Heading 1"),
        vec![text("Title")],
    )]);
    let (output, warnings) = convert(&document, &ConversionOptions::default());
    assert_eq!(output, "<h1>Title</h1>");
    assert!(warnings.is_empty());
}

#[test]
fn test_unrecognised_paragraph_style_falls_back_to_p() {
    let document = Document::new(vec![styled_paragraph(
        Style::new("Fancy", "Fancy Para"),
        vec![text("x")],
    )]);
    let (output, warnings) = convert(&document, &ConversionOptions::default());
    assert_eq!(output, "<p>x</p>");
    assert_eq!(
        warnings,
        vec!["Unrecognised paragraph style: Fancy Para (Style ID: Fancy)".to_string()]
    );
}

#[test]
fn test_unstyled_paragraph_has_no_warning() {
    let (_, warnings) = convert(
        &Document::new(vec![paragraph(vec![text("x")])]),
        &ConversionOptions::default(),
    );
    assert!(warnings.is_empty());
}

#[test]
fn test_empty_paragraphs_are_dropped_unless_preserved() {
    let document = Document::new(vec![paragraph(vec![]), paragraph(vec![text("")])]);
    assert_eq!(convert(&document, &ConversionOptions::default()).0, "");

    let options = ConversionOptions::new().preserve_empty_paragraphs(true);
    assert_eq!(convert(&document, &options).0, "<p></p><p></p>");
}

#[test]
fn test_consecutive_list_items_share_a_list() {
    let item = |value: &str| -> DocumentElement {
        Paragraph {
            numbering: Some(NumberingLevel::unordered("0")),
            ..Paragraph::new(vec![text(value)])
        }
        .into()
    };
    assert_eq!(
        html(vec![item("a"), item("b")]),
        "<ul><li>a</li><li>b</li></ul>"
    );
}

#[test]
fn test_nested_list_collapses_into_parent_item() {
    let item = |value: &str, level: &str, ordered: bool| -> DocumentElement {
        Paragraph {
            numbering: Some(NumberingLevel {
                level_index: level.to_string(),
                is_ordered: ordered,
            }),
            ..Paragraph::new(vec![text(value)])
        }
        .into()
    };
    assert_eq!(
        html(vec![item("a", "0", false), item("b", "1", true)]),
        "<ul><li>a<ol><li>b</li></ol></li></ul>"
    );
}

// ==================== Runs ====================

#[test]
fn test_run_wraps_innermost_to_outermost() {
    let mut formatted = run(vec![text("x")]);
    formatted.bold = true;
    formatted.italic = true;
    formatted.strikethrough = true;
    formatted.vertical_alignment = VerticalAlignment::Superscript;
    assert_eq!(
        html(vec![paragraph(vec![formatted.into()])]),
        "<p><strong><em><sup><s>x</s></sup></em></strong></p>"
    );
}

#[test]
fn test_subscript() {
    let mut formatted = run(vec![text("2")]);
    formatted.vertical_alignment = VerticalAlignment::Subscript;
    assert_eq!(
        html(vec![paragraph(vec![text("H"), formatted.into(), text("O")])]),
        "<p>H<sub>2</sub>O</p>"
    );
}

#[test]
fn test_underline_and_small_caps_are_unwrapped_by_default() {
    let mut formatted = run(vec![text("x")]);
    formatted.underline = true;
    formatted.small_caps = true;
    assert_eq!(html(vec![paragraph(vec![formatted.into()])]), "<p>x</p>");
}

#[test]
fn test_adjacent_bold_runs_collapse() {
    let mut first = run(vec![text("Hello")]);
    first.bold = true;
    let mut second = run(vec![text(" world")]);
    second.bold = true;
    assert_eq!(
        html(vec![paragraph(vec![first.into(), second.into()])]),
        "<p><strong>Hello world</strong></p>"
    );
}

#[test]
fn test_style_map_overrides_formatting_paths() {
    let mut style_map = StyleMap::new();
    style_map.underline = Some(HtmlPath::collapsible("u"));
    style_map.bold = Some(HtmlPath::collapsible("b"));
    let options = ConversionOptions::new().style_map(style_map);

    let mut formatted = run(vec![text("x")]);
    formatted.underline = true;
    formatted.bold = true;
    let document = Document::new(vec![paragraph(vec![formatted.into()])]);
    assert_eq!(convert(&document, &options).0, "<p><b><u>x</u></b></p>");
}

#[test]
fn test_ignored_run_style_suppresses_run() {
    let mut style_map = StyleMap::new();
    style_map.map_run(RunMatcher::style_id("Hidden"), HtmlPath::Ignore);
    let options = ConversionOptions::new().style_map(style_map);

    let mut hidden = run(vec![text("secret")]);
    hidden.bold = true;
    hidden.style = Some(Style::undefined("Hidden"));
    let document = Document::new(vec![paragraph(vec![text("shown"), hidden.into()])]);
    assert_eq!(convert(&document, &options).0, "<p>shown</p>");
}

#[test]
fn test_unrecognised_run_style_warns() {
    let mut styled = run(vec![text("x")]);
    styled.style = Some(Style::undefined("Custom"));
    let document = Document::new(vec![paragraph(vec![styled.into()])]);
    let (output, warnings) = convert(&document, &ConversionOptions::default());
    assert_eq!(output, "<p>x</p>");
    assert_eq!(
        warnings,
        vec!["Unrecognised run style: Style ID: Custom".to_string()]
    );
}

#[test]
fn test_tab_and_text() {
    assert_eq!(
        html(vec![paragraph(vec![text("a"), DocumentElement::Tab, text("b")])]),
        "<p>a\tb</p>"
    );
}

// ==================== Breaks ====================

#[test]
fn test_line_break_is_br_and_page_break_is_nothing() {
    assert_eq!(
        html(vec![paragraph(vec![
            text("a"),
            DocumentElement::Break(Break::LINE),
            text("b"),
            DocumentElement::Break(Break::PAGE),
        ])]),
        "<p>a<br />b</p>"
    );
}

#[test]
fn test_mapped_page_break() {
    let mut style_map = StyleMap::new();
    style_map.map_break(
        BreakMatcher::new(wordhtml_ast::BreakType::Page),
        HtmlPath::element("hr"),
    );
    let options = ConversionOptions::new().style_map(style_map);
    let document = Document::new(vec![DocumentElement::Break(Break::PAGE)]);
    assert_eq!(convert(&document, &options).0, "<hr />");
}

// ==================== Tables ====================

#[test]
fn test_table_without_header_rows() {
    let table = Table {
        style: None,
        children: vec![row(vec![cell("a"), cell("b")], false)],
    };
    assert_eq!(
        html(vec![table.into()]),
        "<table><tr><td><p>a</p></td><td><p>b</p></td></tr></table>"
    );
}

#[test]
fn test_leading_header_rows_go_in_thead() {
    let table = Table {
        style: None,
        children: vec![
            row(vec![cell("H")], true),
            row(vec![cell("1")], false),
            row(vec![cell("2")], true),
        ],
    };
    assert_eq!(
        html(vec![table.into()]),
        "<table><thead><tr><th><p>H</p></th></tr></thead>\
         <tbody><tr><td><p>1</p></td></tr><tr><td><p>2</p></td></tr></tbody></table>"
    );
}

#[test]
fn test_cell_spans_and_empty_cells() {
    let spanning = TableCell {
        rowspan: 2,
        colspan: 3,
        children: vec![],
    };
    let table = Table {
        style: None,
        children: vec![row(vec![spanning.into(), TableCell::new(vec![]).into()], false)],
    };
    assert_eq!(
        html(vec![table.into()]),
        r#"<table><tr><td colspan="3" rowspan="2"></td><td></td></tr></table>"#
    );
}

#[test]
fn test_mapped_table_style() {
    let mut style_map = StyleMap::new();
    style_map.map_table(
        wordhtml_core::style_map::TableMatcher::style_name("Grid"),
        HtmlPath::elements(vec![HtmlPathElement::fresh("table").with_class("grid")]),
    );
    let options = ConversionOptions::new().style_map(style_map);
    let table = Table {
        style: Some(Style::new("TableGrid", "Grid")),
        children: vec![row(vec![cell("a")], false)],
    };
    let document = Document::new(vec![table.into()]);
    assert_eq!(
        convert(&document, &options).0,
        r#"<table class="grid"><tr><td><p>a</p></td></tr></table>"#
    );
}

// ==================== Links and bookmarks ====================

#[test]
fn test_hyperlinks() {
    let external = Hyperlink::href(
        "http://example.com",
        Some("_blank".to_string()),
        vec![text("site")],
    );
    let internal = Hyperlink::anchor("intro", None, vec![text("intro")]);
    let options = ConversionOptions::new().id_prefix("doc-");
    let document = Document::new(vec![paragraph(vec![external.into(), internal.into()])]);
    assert_eq!(
        convert(&document, &options).0,
        r##"<p><a href="http://example.com" target="_blank">site</a><a href="#doc-intro">intro</a></p>"##
    );
}

#[test]
fn test_adjacent_links_to_same_target_collapse() {
    let link = |value: &str| -> DocumentElement {
        Hyperlink::href("http://a", None, vec![text(value)]).into()
    };
    assert_eq!(
        html(vec![paragraph(vec![link("one"), link(" two")])]),
        r#"<p><a href="http://a">one two</a></p>"#
    );
}

#[test]
fn test_bookmark_is_written_even_though_empty() {
    let options = ConversionOptions::new().id_prefix("p-");
    let document = Document::new(vec![paragraph(vec![
        DocumentElement::Bookmark(wordhtml_ast::Bookmark {
            name: "start".to_string(),
        }),
        text("x"),
    ])]);
    assert_eq!(convert(&document, &options).0, r#"<p><a id="p-start"></a>x</p>"#);
}

// ==================== Notes ====================

fn note_reference(note_type: NoteType, id: &str) -> DocumentElement {
    DocumentElement::NoteReference(NoteReference {
        note_type,
        note_id: id.to_string(),
    })
}

fn note(note_type: NoteType, id: &str, body: &str) -> Note {
    Note {
        note_type,
        id: id.to_string(),
        body: vec![paragraph(vec![text(body)])],
    }
}

#[test]
fn test_notes_are_numbered_and_rendered_in_reference_order() {
    let document = Document::new(vec![paragraph(vec![
        text("a"),
        note_reference(NoteType::Endnote, "2"),
        text("b"),
        note_reference(NoteType::Footnote, "1"),
    ])])
    .with_notes(vec![
        note(NoteType::Footnote, "1", "Foot"),
        note(NoteType::Endnote, "2", "End"),
    ]);
    let (output, warnings) = convert(&document, &ConversionOptions::new().id_prefix("doc-"));
    assert_eq!(
        output,
        concat!(
            r##"<p>a<sup><a href="#doc-endnote-2" id="doc-endnote-ref-2">[1]</a></sup>"##,
            r##"b<sup><a href="#doc-footnote-1" id="doc-footnote-ref-1">[2]</a></sup></p>"##,
            r##"<ol><li id="doc-endnote-2"><p>End <a href="#doc-endnote-ref-2">↑</a></p></li>"##,
            r##"<li id="doc-footnote-1"><p>Foot <a href="#doc-footnote-ref-1">↑</a></p></li></ol>"##,
        )
    );
    assert!(warnings.is_empty());
}

#[test]
fn test_missing_note_is_skipped_with_warning() {
    let document = Document::new(vec![paragraph(vec![note_reference(NoteType::Footnote, "9")])]);
    let (output, warnings) = convert(&document, &ConversionOptions::default());
    assert_eq!(
        output,
        r##"<p><sup><a href="#footnote-9" id="footnote-ref-9">[1]</a></sup></p>"##
    );
    assert_eq!(
        warnings,
        vec!["Footnote with ID 9 was referenced but not defined in the document".to_string()]
    );
}

// ==================== Comments ====================

fn comment(id: &str, initials: Option<&str>, body: &str) -> Comment {
    Comment {
        comment_id: id.to_string(),
        author_name: None,
        author_initials: initials.map(str::to_string),
        body: vec![paragraph(vec![text(body)])],
    }
}

fn comment_reference(id: &str) -> DocumentElement {
    DocumentElement::CommentReference(CommentReference {
        comment_id: id.to_string(),
    })
}

fn comment_options() -> ConversionOptions {
    let mut style_map = StyleMap::new();
    style_map.comment_reference = Some(HtmlPath::collapsible("sup"));
    ConversionOptions::new().style_map(style_map)
}

#[test]
fn test_comment_references_are_hidden_by_default_but_recorded() {
    let document = Document::new(vec![paragraph(vec![text("x"), comment_reference("0")])])
        .with_comments(vec![comment("0", Some("AB"), "Hm")]);
    let (output, _) = convert(&document, &ConversionOptions::default());
    assert_eq!(
        output,
        concat!(
            "<p>x</p>",
            r#"<dl><dt id="comment-0">Comment [AB1]</dt>"#,
            r##"<dd><p>Hm <a href="#comment-ref-0">↑</a></p></dd></dl>"##,
        )
    );
}

#[test]
fn test_mapped_comment_references_are_labelled() {
    let document = Document::new(vec![paragraph(vec![
        text("x"),
        comment_reference("4"),
        comment_reference("7"),
    ])])
    .with_comments(vec![comment("4", Some("AB"), "First"), comment("7", None, "Second")]);
    let (output, _) = convert(&document, &comment_options());
    assert!(output.starts_with(concat!(
        r##"<p>x<sup><a href="#comment-4" id="comment-ref-4">[AB1]</a>"##,
        r##"<a href="#comment-7" id="comment-ref-7">[2]</a></sup></p>"##,
    )));
    assert!(output.contains(r#"<dt id="comment-7">Comment [2]</dt>"#));
}

#[test]
fn test_missing_comment_is_fatal() {
    let document = Document::new(vec![paragraph(vec![comment_reference("5")])]);
    let err = DocumentToHtml::convert_document(&document, &ConversionOptions::default()).unwrap_err();
    assert!(matches!(err, ConversionError::MissingComment(ref id) if id == "5"));
}

// ==================== Images ====================

fn image(content_type: Option<&str>, opener: ImageOpener) -> DocumentElement {
    Image {
        alt_text: Some("A dot".to_string()),
        content_type: content_type.map(str::to_string),
        opener,
    }
    .into()
}

#[test]
fn test_image_is_embedded_as_data_uri_with_alt() {
    let element = image(Some("image/png"), ImageOpener::from_bytes(b"abc".to_vec()));
    assert_eq!(
        html(vec![paragraph(vec![element])]),
        r#"<p><img src="data:image/png;base64,YWJj" alt="A dot" /></p>"#
    );
}

#[test]
fn test_custom_image_converter() {
    let options = ConversionOptions::new().image_converter(
        |source: &ImageSource<'_>| -> io::Result<Attributes> {
            let mut attributes = Attributes::new();
            attributes.insert(
                "src".to_string(),
                format!("img.{}", source.content_type().trim_start_matches("image/")),
            );
            Ok(attributes)
        },
    );
    let document = Document::new(vec![image(Some("image/gif"), ImageOpener::from_bytes(Vec::new()))]);
    assert_eq!(convert(&document, &options).0, r#"<img src="img.gif" alt="A dot" />"#);
}

#[test]
fn test_image_open_failure_becomes_warning() {
    let failing = ImageOpener::new(|| Err(io::Error::new(io::ErrorKind::NotFound, "media/gone.png is missing")));
    let document = Document::new(vec![paragraph(vec![text("x"), image(Some("image/png"), failing)])]);
    let (output, warnings) = convert(&document, &ConversionOptions::default());
    assert_eq!(output, "<p>x</p>");
    assert_eq!(warnings, vec!["media/gone.png is missing".to_string()]);
}

#[test]
fn test_image_without_content_type_is_dropped() {
    let element = image(None, ImageOpener::from_bytes(b"abc".to_vec()));
    assert_eq!(html(vec![paragraph(vec![text("x"), element])]), "<p>x</p>");
}

// ==================== Table of contents ====================

#[test]
fn test_table_of_contents_div() {
    let toc = TableOfContents {
        children: vec![paragraph(vec![text("Entry")])],
    };
    let options = ConversionOptions::new().toc_class("contents");
    let document = Document::new(vec![DocumentElement::TableOfContents(toc)]);
    assert_eq!(
        convert(&document, &options).0,
        r#"<div class="contents"><p>Entry</p></div>"#
    );
}

#[test]
fn test_empty_table_of_contents_kept_when_preserving_paragraphs() {
    let document = Document::new(vec![DocumentElement::TableOfContents(TableOfContents::default())]);
    assert_eq!(convert(&document, &ConversionOptions::default()).0, "");
    let options = ConversionOptions::new().preserve_empty_paragraphs(true);
    assert_eq!(convert(&document, &options).0, r#"<div class="toc"></div>"#);
}

// ==================== Options ====================

#[test]
fn test_without_default_style_map_headings_warn() {
    let document = Document::new(vec![styled_paragraph(
        Style::new("Heading1", "Heading 1"),
        vec![text("Title")],
    )]);
    let options = ConversionOptions::new().without_default_style_map();
    let (output, warnings) = convert(&document, &options);
    assert_eq!(output, "<p>Title</p>");
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_user_paragraph_rule_beats_default() {
    let mut style_map = StyleMap::new();
    style_map.map_paragraph(
        ParagraphMatcher::style_id("Heading1"),
        HtmlPath::elements(vec![HtmlPathElement::fresh("h2").with_class("top")]),
    );
    let options = ConversionOptions::new().style_map(style_map);
    let document = Document::new(vec![styled_paragraph(
        Style::undefined("Heading1"),
        vec![text("T")],
    )]);
    assert_eq!(convert(&document, &options).0, r#"<h2 class="top">T</h2>"#);
}

#[test]
fn test_convert_single_element() {
    let result = DocumentToHtml::convert_element(
        &paragraph(vec![text("Alone")]),
        &ConversionOptions::default(),
    )
    .unwrap();
    assert_eq!(write_html(&simplify(result.value)), "<p>Alone</p>");

    let err = DocumentToHtml::convert_element(&comment_reference("1"), &comment_options()).unwrap_err();
    assert!(matches!(err, ConversionError::MissingComment(_)));
}
