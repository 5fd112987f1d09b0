//! Style map: rules choosing the HTML for styled document elements
//!
//! Each rule pairs a matcher with an [`HtmlPath`]; the first matching rule
//! wins. User rules are placed before the default rules (see
//! [`StyleMap::with_defaults`]) so they take precedence.
//!
//! # Example
//!
//! ```
//! use wordhtml_core::style_map::{ParagraphMatcher, StyleMap};
//! use wordhtml_core::{HtmlPath, HtmlPathElement};
//!
//! let mut style_map = StyleMap::new();
//! style_map.map_paragraph(
//!     ParagraphMatcher::style_name("Title"),
//!     HtmlPath::elements(vec![HtmlPathElement::fresh("h1").with_class("title")]),
//! );
//! let style_map = style_map.with_defaults();
//! ```

use wordhtml_ast::{Break, BreakType, NumberingLevel, Paragraph, Run, Style, Table};

use crate::html_path::{HtmlPath, HtmlPathElement};

/// Case-insensitive comparison of style names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringMatcher {
    EqualTo(String),
    StartsWith(String),
}

impl StringMatcher {
    pub fn matches(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        match self {
            StringMatcher::EqualTo(expected) => value == expected.to_lowercase(),
            StringMatcher::StartsWith(prefix) => value.starts_with(&prefix.to_lowercase()),
        }
    }
}

/// Matches the style of a paragraph, run or table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMatcher {
    pub style_id: Option<String>,
    pub style_name: Option<StringMatcher>,
}

impl StyleMatcher {
    fn matches(&self, style: Option<&Style>) -> bool {
        let id_matches = match &self.style_id {
            None => true,
            Some(id) => style.is_some_and(|style| &style.id == id),
        };
        let name_matches = match &self.style_name {
            None => true,
            Some(matcher) => style
                .and_then(|style| style.name.as_deref())
                .is_some_and(|name| matcher.matches(name)),
        };
        id_matches && name_matches
    }
}

/// Matches paragraphs by style and list level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphMatcher {
    pub style: StyleMatcher,
    pub numbering: Option<NumberingLevel>,
}

impl ParagraphMatcher {
    /// Any paragraph
    pub fn any() -> Self {
        Self::default()
    }

    pub fn style_id(id: &str) -> Self {
        Self {
            style: StyleMatcher {
                style_id: Some(id.to_string()),
                style_name: None,
            },
            numbering: None,
        }
    }

    pub fn style_name(name: &str) -> Self {
        Self {
            style: StyleMatcher {
                style_id: None,
                style_name: Some(StringMatcher::EqualTo(name.to_string())),
            },
            numbering: None,
        }
    }

    /// Paragraphs at a 0-based list level
    pub fn list_level(level_index: u32, is_ordered: bool) -> Self {
        Self {
            style: StyleMatcher::default(),
            numbering: Some(NumberingLevel {
                level_index: level_index.to_string(),
                is_ordered,
            }),
        }
    }

    pub fn matches(&self, paragraph: &Paragraph) -> bool {
        self.style.matches(paragraph.style.as_ref())
            && match &self.numbering {
                None => true,
                Some(numbering) => paragraph.numbering.as_ref() == Some(numbering),
            }
    }
}

/// Matches runs by character style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunMatcher {
    pub style: StyleMatcher,
}

impl RunMatcher {
    pub fn style_id(id: &str) -> Self {
        Self {
            style: StyleMatcher {
                style_id: Some(id.to_string()),
                style_name: None,
            },
        }
    }

    pub fn style_name(name: &str) -> Self {
        Self {
            style: StyleMatcher {
                style_id: None,
                style_name: Some(StringMatcher::EqualTo(name.to_string())),
            },
        }
    }

    pub fn matches(&self, run: &Run) -> bool {
        self.style.matches(run.style.as_ref())
    }
}

/// Matches tables by table style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMatcher {
    pub style: StyleMatcher,
}

impl TableMatcher {
    pub fn style_name(name: &str) -> Self {
        Self {
            style: StyleMatcher {
                style_id: None,
                style_name: Some(StringMatcher::EqualTo(name.to_string())),
            },
        }
    }

    pub fn matches(&self, table: &Table) -> bool {
        self.style.matches(table.style.as_ref())
    }
}

/// Matches breaks by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakMatcher {
    pub break_type: BreakType,
}

impl BreakMatcher {
    pub fn new(break_type: BreakType) -> Self {
        Self { break_type }
    }

    pub fn matches(&self, element: &Break) -> bool {
        element.break_type == self.break_type
    }
}

/// Ordered rule lists plus the fixed run-formatting paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    pub paragraph_styles: Vec<(ParagraphMatcher, HtmlPath)>,
    pub run_styles: Vec<(RunMatcher, HtmlPath)>,
    pub table_styles: Vec<(TableMatcher, HtmlPath)>,
    pub break_styles: Vec<(BreakMatcher, HtmlPath)>,
    pub bold: Option<HtmlPath>,
    pub italic: Option<HtmlPath>,
    pub underline: Option<HtmlPath>,
    pub strikethrough: Option<HtmlPath>,
    pub small_caps: Option<HtmlPath>,
    pub comment_reference: Option<HtmlPath>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_paragraph(&mut self, matcher: ParagraphMatcher, path: HtmlPath) -> &mut Self {
        self.paragraph_styles.push((matcher, path));
        self
    }

    pub fn map_run(&mut self, matcher: RunMatcher, path: HtmlPath) -> &mut Self {
        self.run_styles.push((matcher, path));
        self
    }

    pub fn map_table(&mut self, matcher: TableMatcher, path: HtmlPath) -> &mut Self {
        self.table_styles.push((matcher, path));
        self
    }

    pub fn map_break(&mut self, matcher: BreakMatcher, path: HtmlPath) -> &mut Self {
        self.break_styles.push((matcher, path));
        self
    }

    pub fn paragraph_html_path(&self, paragraph: &Paragraph) -> Option<&HtmlPath> {
        first_match(&self.paragraph_styles, |matcher| matcher.matches(paragraph))
    }

    pub fn run_html_path(&self, run: &Run) -> Option<&HtmlPath> {
        first_match(&self.run_styles, |matcher| matcher.matches(run))
    }

    pub fn table_html_path(&self, table: &Table) -> Option<&HtmlPath> {
        first_match(&self.table_styles, |matcher| matcher.matches(table))
    }

    pub fn break_html_path(&self, element: &Break) -> Option<&HtmlPath> {
        first_match(&self.break_styles, |matcher| matcher.matches(element))
    }

    /// Combine with `fallback`: rules of `self` come first, fixed paths of
    /// `self` win when set
    pub fn followed_by(mut self, fallback: StyleMap) -> StyleMap {
        self.paragraph_styles.extend(fallback.paragraph_styles);
        self.run_styles.extend(fallback.run_styles);
        self.table_styles.extend(fallback.table_styles);
        self.break_styles.extend(fallback.break_styles);
        self.bold = self.bold.or(fallback.bold);
        self.italic = self.italic.or(fallback.italic);
        self.underline = self.underline.or(fallback.underline);
        self.strikethrough = self.strikethrough.or(fallback.strikethrough);
        self.small_caps = self.small_caps.or(fallback.small_caps);
        self.comment_reference = self.comment_reference.or(fallback.comment_reference);
        self
    }

    /// These rules with the default rules appended
    pub fn with_defaults(self) -> StyleMap {
        self.followed_by(default_style_map())
    }
}

fn first_match<M>(rules: &[(M, HtmlPath)], matches: impl Fn(&M) -> bool) -> Option<&HtmlPath> {
    rules
        .iter()
        .find(|(matcher, _)| matches(matcher))
        .map(|(_, path)| path)
}

/// The built-in rules for common Word and LibreOffice styles
pub fn default_style_map() -> StyleMap {
    let mut style_map = StyleMap::new();

    for level in 1..=6 {
        let tag = format!("h{}", level);
        style_map
            .map_paragraph(
                ParagraphMatcher::style_id(&format!("Heading{}", level)),
                HtmlPath::element(&tag),
            )
            .map_paragraph(
                ParagraphMatcher::style_name(&format!("Heading {}", level)),
                HtmlPath::element(&tag),
            );
    }

    style_map
        .map_run(RunMatcher::style_name("Strong"), HtmlPath::collapsible("strong"))
        .map_paragraph(ParagraphMatcher::style_name("footnote text"), HtmlPath::element("p"))
        .map_run(RunMatcher::style_name("footnote reference"), HtmlPath::empty())
        .map_paragraph(ParagraphMatcher::style_name("endnote text"), HtmlPath::element("p"))
        .map_run(RunMatcher::style_name("endnote reference"), HtmlPath::empty())
        .map_paragraph(ParagraphMatcher::style_name("annotation text"), HtmlPath::element("p"))
        .map_run(RunMatcher::style_name("annotation reference"), HtmlPath::empty())
        // LibreOffice
        .map_paragraph(ParagraphMatcher::style_name("Footnote"), HtmlPath::element("p"))
        .map_run(RunMatcher::style_name("Footnote anchor"), HtmlPath::empty())
        .map_paragraph(ParagraphMatcher::style_name("Endnote"), HtmlPath::element("p"))
        .map_run(RunMatcher::style_name("Endnote anchor"), HtmlPath::empty());

    for is_ordered in [false, true] {
        for level in 0..5 {
            style_map.map_paragraph(
                ParagraphMatcher::list_level(level, is_ordered),
                list_path(level, is_ordered),
            );
        }
    }

    style_map
        .map_run(RunMatcher::style_name("Hyperlink"), HtmlPath::empty())
        .map_paragraph(ParagraphMatcher::style_name("Normal"), HtmlPath::element("p"))
        .map_paragraph(ParagraphMatcher::style_name("Body"), HtmlPath::element("p"));

    style_map
}

/// `ul > li:fresh` for the first level, `ul|ol > li > ul > li:fresh` for
/// the second, `ul|ol > li > ul|ol > li > ul > li:fresh` for the third
fn list_path(level_index: u32, is_ordered: bool) -> HtmlPath {
    let list = if is_ordered { "ol" } else { "ul" };
    let mut elements = Vec::new();
    for depth in 0..=level_index {
        if depth == level_index {
            elements.push(HtmlPathElement::collapsible(list));
            elements.push(HtmlPathElement::fresh("li"));
        } else {
            elements.push(HtmlPathElement::collapsible_any(&["ul", "ol"]));
            elements.push(HtmlPathElement::collapsible("li"));
        }
    }
    HtmlPath::elements(elements)
}
