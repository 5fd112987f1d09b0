//! HTML node tree
//!
//! The converter produces [`HtmlNode`]s rather than text so that empty
//! wrappers can be removed and adjacent equivalent wrappers merged before
//! anything is written. See [`simplify`] and [`crate::writer::write_html`].

use indexmap::IndexMap;

/// Element attributes, in the order they are written
pub type Attributes = IndexMap<String, String>;

/// Elements written without content or a closing tag
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr"];

/// Tag of an element, as described by a style rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTag {
    /// Tag names; the first is written, the rest are accepted when collapsing
    pub names: Vec<String>,
    pub attributes: Attributes,
    /// Whether an equal preceding sibling absorbs this element
    pub collapsible: bool,
    /// Text inserted between the contents of two collapsed elements
    pub separator: String,
}

impl HtmlTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            attributes: Attributes::new(),
            collapsible: false,
            separator: String::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Name written to the output
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("")
    }
}

/// An element with its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    pub tag: HtmlTag,
    pub children: Vec<HtmlNode>,
    /// Keep the element even when it ends up with no content
    pub force_write: bool,
}

impl HtmlElement {
    pub fn name(&self) -> &str {
        self.tag.name()
    }

    pub fn is_void(&self) -> bool {
        self.children.is_empty() && VOID_ELEMENTS.contains(&self.name())
    }
}

/// A node of the output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Text(String),
    Element(HtmlElement),
}

impl HtmlNode {
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Text(value.into())
    }

    /// A non-collapsible element
    pub fn element(name: &str, attributes: Attributes, children: Vec<HtmlNode>) -> Self {
        Self::from_tag(HtmlTag::new(name).with_attributes(attributes), children)
    }

    /// An element merged into an equal preceding sibling
    pub fn collapsible_element(name: &str, attributes: Attributes, children: Vec<HtmlNode>) -> Self {
        Self::from_tag(
            HtmlTag::new(name)
                .with_attributes(attributes)
                .collapsible(true),
            children,
        )
    }

    pub fn from_tag(tag: HtmlTag, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Element(HtmlElement {
            tag,
            children,
            force_write: false,
        })
    }

    /// Mark an element as written even when empty; text is unchanged
    pub fn force_write(mut self) -> Self {
        if let HtmlNode::Element(element) = &mut self {
            element.force_write = true;
        }
        self
    }
}

/// Build an attribute map from pairs
pub fn attributes<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Remove empty content, then merge collapsible siblings
pub fn simplify(nodes: Vec<HtmlNode>) -> Vec<HtmlNode> {
    collapse(strip_empty(nodes))
}

/// Remove empty text and elements left without content
///
/// Void elements and force-written elements are kept.
pub fn strip_empty(nodes: Vec<HtmlNode>) -> Vec<HtmlNode> {
    nodes.into_iter().filter_map(strip_empty_node).collect()
}

fn strip_empty_node(node: HtmlNode) -> Option<HtmlNode> {
    match node {
        HtmlNode::Text(value) if value.is_empty() => None,
        HtmlNode::Text(value) => Some(HtmlNode::Text(value)),
        HtmlNode::Element(mut element) => {
            element.children = strip_empty(element.children);
            if element.children.is_empty() && !element.force_write && !element.is_void() {
                None
            } else {
                Some(HtmlNode::Element(element))
            }
        }
    }
}

/// Merge each collapsible element into a matching preceding sibling
pub fn collapse(nodes: Vec<HtmlNode>) -> Vec<HtmlNode> {
    let mut collapsed = Vec::with_capacity(nodes.len());
    for node in nodes {
        collapsing_add(&mut collapsed, node);
    }
    collapsed
}

fn collapsing_add(siblings: &mut Vec<HtmlNode>, node: HtmlNode) {
    let node = match node {
        HtmlNode::Element(mut element) => {
            element.children = collapse(element.children);
            HtmlNode::Element(element)
        }
        text => text,
    };

    let merges = match (siblings.last(), &node) {
        (Some(HtmlNode::Element(last)), HtmlNode::Element(next)) => {
            next.tag.collapsible && is_match(last, next)
        }
        _ => false,
    };
    if !merges {
        siblings.push(node);
        return;
    }

    if let (Some(HtmlNode::Element(last)), HtmlNode::Element(next)) = (siblings.last_mut(), node) {
        if !next.tag.separator.is_empty() {
            last.children.push(HtmlNode::Text(next.tag.separator));
        }
        last.force_write |= next.force_write;
        for child in next.children {
            collapsing_add(&mut last.children, child);
        }
    }
}

fn is_match(first: &HtmlElement, second: &HtmlElement) -> bool {
    second.tag.names.iter().any(|name| name == first.name())
        && first.tag.attributes == second.tag.attributes
}
