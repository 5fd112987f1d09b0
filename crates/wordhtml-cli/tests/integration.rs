//! Integration tests for the wordhtml CLI
//!
//! These tests drive the commands against generated .docx files and
//! check what lands on disk.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use wordhtml_cli::{convert_command, text_command, tree_command, ConvertArgs};
use wordhtml_ooxml::test_utils::DocxFixture;

/// Write a small document with a custom paragraph style to `dir`
fn write_test_docx(dir: &TempDir) -> PathBuf {
    let docx = DocxFixture::new()
        .styles(
            r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
               <w:style w:type="paragraph" w:styleId="Aside"><w:name w:val="Aside"/></w:style>"#,
        )
        .body(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Report</w:t></w:r></w:p>
               <w:p><w:pPr><w:pStyle w:val="Aside"/></w:pPr><w:r><w:t>Note this</w:t></w:r></w:p>
               <w:p><w:r><w:t>Body</w:t></w:r><w:r><w:footnoteReference w:id="1"/></w:r></w:p>"#,
        )
        .footnotes(r#"<w:footnote w:id="1"><w:p><w:r><w:t>Source</w:t></w:r></w:p></w:footnote>"#)
        .build()
        .unwrap();
    let path = dir.path().join("report.docx");
    fs::write(&path, docx).unwrap();
    path
}

#[test]
fn test_convert_writes_html() {
    let dir = TempDir::new().unwrap();
    let input = write_test_docx(&dir);
    let output = dir.path().join("report.html");

    convert_command(&ConvertArgs {
        input,
        output: Some(output.clone()),
        id_prefix: Some("r-".to_string()),
        ..ConvertArgs::default()
    })
    .unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<h1>Report</h1><p>Note this</p>"));
    assert!(html.contains(r##"<a href="#r-footnote-1" id="r-footnote-ref-1">[1]</a>"##));
    assert!(html.ends_with(r##"<ol><li id="r-footnote-1"><p>Source <a href="#r-footnote-ref-1">↑</a></p></li></ol>"##));
}

#[test]
fn test_convert_with_config_style_map() {
    let dir = TempDir::new().unwrap();
    let input = write_test_docx(&dir);
    let config = dir.path().join("wordhtml.toml");
    fs::write(
        &config,
        r#"
[[style_map.paragraph]]
style_name = "Aside"
html = [{ tag = "aside", fresh = true }]
"#,
    )
    .unwrap();
    let output = dir.path().join("report.html");

    convert_command(&ConvertArgs {
        input,
        output: Some(output.clone()),
        config: Some(config),
        ..ConvertArgs::default()
    })
    .unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<h1>Report</h1><aside>Note this</aside>"));
}

#[test]
fn test_convert_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let input = write_test_docx(&dir);
    let config = dir.path().join("broken.toml");
    fs::write(
        &config,
        r#"
[[style_map.paragraph]]
style_name = "Aside"
ignore = true
html = [{ tag = "aside" }]
"#,
    )
    .unwrap();

    let err = convert_command(&ConvertArgs {
        input,
        output: Some(dir.path().join("unused.html")),
        config: Some(config),
        ..ConvertArgs::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("Failed to load config"));
}

#[test]
fn test_convert_reports_corrupt_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("corrupt.docx");
    fs::write(&input, b"plain text, not a zip").unwrap();

    let err = convert_command(&ConvertArgs {
        input,
        ..ConvertArgs::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("Failed to convert"));
}

#[test]
fn test_tree_dumps_document_json() {
    let dir = TempDir::new().unwrap();
    let input = write_test_docx(&dir);
    let output = dir.path().join("tree.json");

    tree_command(&input, Some(&output)).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(json["document"].is_object());
    assert_eq!(json["warnings"], serde_json::json!([]));
    let dump = json.to_string();
    assert!(dump.contains("Report"));
    assert!(dump.contains("Source"));
}

#[test]
fn test_text_extracts_paragraphs() {
    let dir = TempDir::new().unwrap();
    let input = write_test_docx(&dir);
    let output = dir.path().join("report.txt");

    text_command(&input, Some(&output)).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("Report\n\nNote this\n\nBody"));
}
