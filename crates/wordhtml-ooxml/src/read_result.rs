//! Results of reading body XML
//!
//! A read yields the elements in their normal position, "extra" elements
//! that bubble up to the nearest paragraph boundary, and the warnings
//! raised on the way. Combining results never drops a warning.

use wordhtml_ast::{DocumentElement, TableCell, TableRow, Warnings, WithWarnings};

/// A node produced while reading, before tables are resolved
///
/// Unmerged rows and cells only exist between reading `w:tr`/`w:tc` and
/// resolving their table; they never reach the document tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BodyNode {
    Element(DocumentElement),
    UnmergedRow {
        cells: Vec<BodyNode>,
        is_header: bool,
    },
    UnmergedCell {
        vmerge: bool,
        colspan: u32,
        children: Vec<BodyNode>,
    },
}

impl BodyNode {
    /// Materialise into a document element
    ///
    /// An unmerged cell that escaped table reading becomes a 1-row cell.
    pub(crate) fn into_element(self) -> DocumentElement {
        match self {
            BodyNode::Element(element) => element,
            BodyNode::UnmergedRow { cells, is_header } => DocumentElement::TableRow(TableRow {
                children: into_elements(cells),
                is_header,
            }),
            BodyNode::UnmergedCell {
                colspan, children, ..
            } => DocumentElement::TableCell(TableCell {
                rowspan: 1,
                colspan,
                children: into_elements(children),
            }),
        }
    }
}

impl From<DocumentElement> for BodyNode {
    fn from(element: DocumentElement) -> Self {
        BodyNode::Element(element)
    }
}

pub(crate) fn into_elements(nodes: Vec<BodyNode>) -> Vec<DocumentElement> {
    nodes.into_iter().map(BodyNode::into_element).collect()
}

/// Elements, extra elements and warnings from one read
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ReadResult {
    pub elements: Vec<BodyNode>,
    pub extra: Vec<BodyNode>,
    pub warnings: Warnings,
}

impl ReadResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn success(node: impl Into<BodyNode>) -> Self {
        Self::success_all(vec![node.into()])
    }

    pub fn success_all(elements: Vec<BodyNode>) -> Self {
        Self {
            elements,
            ..Default::default()
        }
    }

    pub fn empty_with_warning(warning: impl Into<String>) -> Self {
        Self {
            warnings: Warnings::single(warning),
            ..Default::default()
        }
    }

    pub fn with_warning(elements: Vec<BodyNode>, warning: impl Into<String>) -> Self {
        Self {
            elements,
            extra: Vec::new(),
            warnings: Warnings::single(warning),
        }
    }

    /// Concatenate results in order
    pub fn join(results: impl IntoIterator<Item = ReadResult>) -> Self {
        results
            .into_iter()
            .fold(ReadResult::empty(), |mut joined, result| {
                joined.elements.extend(result.elements);
                joined.extra.extend(result.extra);
                joined.warnings.extend(result.warnings);
                joined
            })
    }

    /// Replace the elements with a single element built from them
    pub fn map(self, f: impl FnOnce(Vec<BodyNode>) -> BodyNode) -> Self {
        Self {
            elements: vec![f(self.elements)],
            extra: self.extra,
            warnings: self.warnings,
        }
    }

    /// Replace the elements with the result of a further read
    pub fn flat_map(self, f: impl FnOnce(Vec<BodyNode>) -> ReadResult) -> Self {
        let next = f(self.elements);
        let mut extra = self.extra;
        extra.extend(next.extra);
        let mut warnings = self.warnings;
        warnings.extend(next.warnings);
        Self {
            elements: next.elements,
            extra,
            warnings,
        }
    }

    /// Add warnings raised before this result, keeping them first
    pub fn prepend_warnings(self, warnings: Warnings) -> Self {
        let mut combined = warnings;
        combined.extend(self.warnings);
        Self {
            warnings: combined,
            ..self
        }
    }

    /// Move all elements to the extra list
    pub fn to_extra(self) -> Self {
        let mut extra = self.elements;
        extra.extend(self.extra);
        Self {
            elements: Vec::new(),
            extra,
            warnings: self.warnings,
        }
    }

    /// Surface the extra elements after the normal ones
    pub fn append_extra(self) -> Self {
        let mut elements = self.elements;
        elements.extend(self.extra);
        Self {
            elements,
            extra: Vec::new(),
            warnings: self.warnings,
        }
    }

    /// Final document elements (normal then extra) with warnings
    pub fn into_output(self) -> WithWarnings<Vec<DocumentElement>> {
        let result = self.append_extra();
        WithWarnings::new(into_elements(result.elements), result.warnings)
    }
}
