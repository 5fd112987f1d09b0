//! Output paths: how converted content is wrapped in HTML elements

use crate::html::{Attributes, HtmlNode, HtmlTag};

/// One element of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPathElement {
    pub tag: HtmlTag,
}

impl HtmlPathElement {
    /// An element that always starts a new output element
    pub fn fresh(name: &str) -> Self {
        Self {
            tag: HtmlTag::new(name),
        }
    }

    /// An element merged into an equal preceding sibling
    pub fn collapsible(name: &str) -> Self {
        Self {
            tag: HtmlTag::new(name).collapsible(true),
        }
    }

    /// A collapsible element written as the first of `names`, merging into any of them
    pub fn collapsible_any(names: &[&str]) -> Self {
        let mut element = Self::collapsible(names.first().copied().unwrap_or(""));
        element.tag.names = names.iter().map(|name| name.to_string()).collect();
        element
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.tag.attributes = attributes;
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.tag
            .attributes
            .insert("class".to_string(), class.to_string());
        self
    }

    pub fn with_separator(mut self, separator: &str) -> Self {
        self.tag.separator = separator.to_string();
        self
    }
}

/// Where converted content goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlPath {
    /// Nested elements, outermost first; no elements leaves content unwrapped
    Elements(Vec<HtmlPathElement>),
    /// Drop the content without converting it
    Ignore,
}

impl HtmlPath {
    /// Leaves content unwrapped
    pub fn empty() -> Self {
        HtmlPath::Elements(Vec::new())
    }

    pub fn elements(elements: Vec<HtmlPathElement>) -> Self {
        HtmlPath::Elements(elements)
    }

    /// A single fresh element
    pub fn element(name: &str) -> Self {
        HtmlPath::Elements(vec![HtmlPathElement::fresh(name)])
    }

    /// A single fresh element with attributes
    pub fn element_with_attributes(name: &str, attributes: Attributes) -> Self {
        HtmlPath::Elements(vec![HtmlPathElement::fresh(name).with_attributes(attributes)])
    }

    /// A single collapsible element
    pub fn collapsible(name: &str) -> Self {
        HtmlPath::Elements(vec![HtmlPathElement::collapsible(name)])
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, HtmlPath::Ignore)
    }

    /// Wrap generated content in this path
    ///
    /// `generate` is not called for [`HtmlPath::Ignore`]. With
    /// `force_write`, the innermost element is kept even if the content
    /// turns out empty.
    pub fn wrap<E>(
        &self,
        force_write: bool,
        generate: impl FnOnce() -> Result<Vec<HtmlNode>, E>,
    ) -> Result<Vec<HtmlNode>, E> {
        match self {
            HtmlPath::Ignore => Ok(Vec::new()),
            HtmlPath::Elements(_) => Ok(self.wrap_nodes(generate()?, force_write)),
        }
    }

    /// Wrap already generated content in this path
    pub fn wrap_nodes(&self, nodes: Vec<HtmlNode>, force_write: bool) -> Vec<HtmlNode> {
        let HtmlPath::Elements(elements) = self else {
            return Vec::new();
        };
        let mut elements = elements.iter().rev();
        let Some(innermost) = elements.next() else {
            return nodes;
        };

        let mut node = HtmlNode::from_tag(innermost.tag.clone(), nodes);
        if force_write {
            node = node.force_write();
        }
        for element in elements {
            node = HtmlNode::from_tag(element.tag.clone(), vec![node]);
        }
        vec![node]
    }
}
