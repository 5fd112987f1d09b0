//! Footnotes, endnotes and comments parts

use wordhtml_ast::{Comment, Note, NoteType, Warnings, WithWarnings};

use crate::body_reader::BodyXmlReader;
use crate::error::Result;
use crate::xml::XmlElement;

/// Read a `w:footnotes` or `w:endnotes` root
///
/// Separator notes only hold the rule drawn above the notes area and are
/// skipped.
pub fn read_notes(
    note_type: NoteType,
    root: &XmlElement,
    body_reader: &mut BodyXmlReader<'_>,
) -> Result<WithWarnings<Vec<Note>>> {
    let tag_name = match note_type {
        NoteType::Footnote => "w:footnote",
        NoteType::Endnote => "w:endnote",
    };

    let mut notes = Vec::new();
    let mut warnings = Warnings::new();
    for element in root.find_children(tag_name) {
        if is_separator(element) {
            continue;
        }
        let Some(id) = element.attribute("w:id") else {
            warnings.push(format!(
                "A {} without an ID was ignored",
                note_type.id_fragment()
            ));
            continue;
        };
        let body = body_reader.read_all(&element.children)?;
        warnings.extend(body.warnings);
        notes.push(Note {
            note_type,
            id: id.to_string(),
            body: body.value,
        });
    }

    Ok(WithWarnings::new(notes, warnings))
}

fn is_separator(element: &XmlElement) -> bool {
    matches!(
        element.attribute("w:type"),
        Some("separator") | Some("continuationSeparator")
    )
}

/// Read a `w:comments` root
pub fn read_comments(
    root: &XmlElement,
    body_reader: &mut BodyXmlReader<'_>,
) -> Result<WithWarnings<Vec<Comment>>> {
    let mut comments = Vec::new();
    let mut warnings = Warnings::new();
    for element in root.find_children("w:comment") {
        let Some(id) = element.attribute("w:id") else {
            warnings.push("A comment without an ID was ignored");
            continue;
        };
        let non_blank = |name: &str| {
            element
                .attribute(name)
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string)
        };
        let body = body_reader.read_all(&element.children)?;
        warnings.extend(body.warnings);
        comments.push(Comment {
            comment_id: id.to_string(),
            author_name: non_blank("w:author"),
            author_initials: non_blank("w:initials"),
            body: body.value,
        });
    }

    Ok(WithWarnings::new(comments, warnings))
}
