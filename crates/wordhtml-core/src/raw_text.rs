//! Plain-text extraction

use wordhtml_ast::{Document, DocumentElement};

/// Text of the document body, each paragraph followed by a blank line
///
/// Formatting, images and the notes and comments trailers are dropped.
pub fn extract_raw_text(document: &Document) -> String {
    let mut output = String::new();
    for element in &document.children {
        write_raw_text(&mut output, element);
    }
    output
}

fn write_raw_text(output: &mut String, element: &DocumentElement) {
    match element {
        DocumentElement::Text { value } => output.push_str(value),
        DocumentElement::Tab => output.push('\t'),
        other => {
            for child in other.children() {
                write_raw_text(output, child);
            }
            if matches!(other, DocumentElement::Paragraph(_)) {
                output.push_str("\n\n");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordhtml_ast::{Paragraph, Run, Table, TableCell, TableRow};

    fn paragraph(text: &str) -> DocumentElement {
        Paragraph::new(vec![Run::new(vec![DocumentElement::text(text)]).into()]).into()
    }

    #[test]
    fn test_paragraphs_end_with_blank_line() {
        let document = Document::new(vec![paragraph("One"), paragraph("Two")]);
        assert_eq!(extract_raw_text(&document), "One\n\nTwo\n\n");
    }

    #[test]
    fn test_table_cells_are_walked() {
        let table = Table {
            style: None,
            children: vec![TableRow {
                children: vec![
                    TableCell::new(vec![paragraph("a")]).into(),
                    TableCell::new(vec![paragraph("b")]).into(),
                ],
                is_header: false,
            }
            .into()],
        };
        let document = Document::new(vec![table.into()]);
        assert_eq!(extract_raw_text(&document), "a\n\nb\n\n");
    }

    #[test]
    fn test_tabs_are_kept() {
        let document = Document::new(vec![Paragraph::new(vec![Run::new(vec![
            DocumentElement::text("a"),
            DocumentElement::Tab,
            DocumentElement::text("b"),
        ])
        .into()])
        .into()]);
        assert_eq!(extract_raw_text(&document), "a\tb\n\n");
    }
}
