//! End-to-end conversion of generated .docx packages

use wordhtml_core::{
    convert_docx, convert_docx_bytes, extract_docx_raw_text, ConversionError, ConversionOptions,
    Settings,
};
use wordhtml_ooxml::test_utils::DocxFixture;

fn convert(fixture: DocxFixture, options: &ConversionOptions) -> (String, Vec<String>) {
    let docx = fixture.build().unwrap();
    let result = convert_docx_bytes(&docx, options).unwrap();
    (result.value, result.warnings.into_vec())
}

#[test]
fn test_heading_and_body_text() {
    let fixture = DocxFixture::new()
        .styles(
            r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
               <w:style w:type="paragraph" w:styleId="Normal"><w:name w:val="Normal"/></w:style>"#,
        )
        .body(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>
               <w:p><w:pPr><w:pStyle w:val="Normal"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r>
               <w:r><w:t xml:space="preserve"> plain</w:t></w:r></w:p>"#,
        );
    let (html, warnings) = convert(fixture, &ConversionOptions::default());
    assert_eq!(html, "<h1>Title</h1><p><strong>Bold</strong> plain</p>");
    assert!(warnings.is_empty());
}

#[test]
fn test_reader_warnings_come_before_conversion_warnings() {
    let fixture = DocxFixture::new().body(
        r#"<w:p><w:pPr><w:pStyle w:val="Mystery"/></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
    );
    let (html, warnings) = convert(fixture, &ConversionOptions::default());
    assert_eq!(html, "<p>x</p>");
    assert_eq!(
        warnings,
        vec![
            "Paragraph style with ID Mystery was referenced but not defined in the document"
                .to_string(),
            "Unrecognised paragraph style: Style ID: Mystery".to_string(),
        ]
    );
}

#[test]
fn test_complex_field_hyperlink() {
    let fixture = DocxFixture::new().body(
        r#"<w:p>
            <w:r><w:fldChar w:fldCharType="begin"/></w:r>
            <w:r><w:instrText xml:space="preserve"> HYPERLINK "http://example.com"</w:instrText></w:r>
            <w:r><w:fldChar w:fldCharType="separate"/></w:r>
            <w:r><w:t>exam</w:t></w:r>
            <w:r><w:t>ple</w:t></w:r>
            <w:r><w:fldChar w:fldCharType="end"/></w:r>
            <w:r><w:t> after</w:t></w:r>
        </w:p>"#,
    );
    let (html, _) = convert(fixture, &ConversionOptions::default());
    assert_eq!(html, r#"<p><a href="http://example.com">example</a> after</p>"#);
}

#[test]
fn test_vertically_merged_table() {
    let cell = |properties: &str, text: &str| {
        format!(
            r#"<w:tc><w:tcPr>{}</w:tcPr><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>"#,
            properties, text
        )
    };
    let body = format!(
        r#"<w:tbl><w:tr>{}{}</w:tr><w:tr>{}{}</w:tr></w:tbl>"#,
        cell(r#"<w:vMerge w:val="restart"/>"#, "A"),
        cell("", "B"),
        cell("<w:vMerge/>", ""),
        cell("", "C"),
    );
    let (html, warnings) = convert(DocxFixture::new().body(body), &ConversionOptions::default());
    assert_eq!(
        html,
        r#"<table><tr><td rowspan="2"><p>A</p></td><td><p>B</p></td></tr><tr><td><p>C</p></td></tr></table>"#
    );
    assert!(warnings.is_empty());
}

#[test]
fn test_footnotes_trailer() {
    let fixture = DocxFixture::new()
        .body(r#"<w:p><w:r><w:t>Text</w:t></w:r><w:r><w:footnoteReference w:id="1"/></w:r></w:p>"#)
        .footnotes(r#"<w:footnote w:id="1"><w:p><w:r><w:t>Note</w:t></w:r></w:p></w:footnote>"#);
    let (html, _) = convert(fixture, &ConversionOptions::new().id_prefix("x-"));
    assert_eq!(
        html,
        concat!(
            r##"<p>Text<sup><a href="#x-footnote-1" id="x-footnote-ref-1">[1]</a></sup></p>"##,
            r##"<ol><li id="x-footnote-1"><p>Note <a href="#x-footnote-ref-1">↑</a></p></li></ol>"##,
        )
    );
}

#[test]
fn test_embedded_image() {
    let fixture = DocxFixture::new()
        .image("rIdImage", "dot.png", b"abc")
        .body(
            r#"<w:p><w:r><w:drawing><wp:inline>
                <wp:docPr id="1" name="Picture" descr="A dot"/>
                <a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="rIdImage"/></pic:blipFill></pic:pic></a:graphicData></a:graphic>
            </wp:inline></w:drawing></w:r></w:p>"#,
        );
    let (html, _) = convert(fixture, &ConversionOptions::default());
    assert_eq!(html, r#"<p><img src="data:image/png;base64,YWJj" alt="A dot" /></p>"#);
}

#[test]
fn test_settings_drive_conversion() {
    let settings = Settings::from_toml(
        r#"
[[style_map.paragraph]]
style_name = "Quote"
html = [{ tag = "blockquote", fresh = true }]
"#,
    )
    .unwrap();
    let fixture = DocxFixture::new()
        .styles(r#"<w:style w:type="paragraph" w:styleId="Q"><w:name w:val="Quote"/></w:style>"#)
        .body(r#"<w:p><w:pPr><w:pStyle w:val="Q"/></w:pPr><w:r><w:t>Said</w:t></w:r></w:p>"#);
    let (html, _) = convert(fixture, &settings.to_options().unwrap());
    assert_eq!(html, "<blockquote>Said</blockquote>");
}

#[test]
fn test_missing_comment_aborts_conversion() {
    let docx = DocxFixture::new()
        .body(r#"<w:p><w:r><w:commentReference w:id="3"/></w:r></w:p>"#)
        .build()
        .unwrap();
    let err = convert_docx_bytes(&docx, &ConversionOptions::default()).unwrap_err();
    assert!(matches!(err, ConversionError::MissingComment(ref id) if id == "3"));
}

#[test]
fn test_reading_errors_are_wrapped() {
    let err = convert_docx_bytes(b"not a docx", &ConversionOptions::default()).unwrap_err();
    assert!(matches!(err, ConversionError::Ooxml(_)));
}

#[test]
fn test_convert_and_extract_from_file() {
    let docx = DocxFixture::new()
        .body(r#"<w:p><w:r><w:t>One</w:t></w:r></w:p><w:p><w:r><w:t>Two</w:t></w:r></w:p>"#)
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.docx");
    std::fs::write(&path, docx).unwrap();

    let html = convert_docx(&path, &ConversionOptions::default()).unwrap();
    assert_eq!(html.value, "<p>One</p><p>Two</p>");

    let text = extract_docx_raw_text(&path).unwrap();
    assert_eq!(text.value, "One\n\nTwo\n\n");
}
