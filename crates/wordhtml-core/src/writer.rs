//! HTML serialization

use crate::html::{HtmlElement, HtmlNode};

/// Write nodes as an HTML fragment
///
/// Text and attribute values are escaped; void elements are written in
/// self-closing form (`<br />`).
pub fn write_html(nodes: &[HtmlNode]) -> String {
    let mut output = String::new();
    for node in nodes {
        write_node(&mut output, node);
    }
    output
}

fn write_node(output: &mut String, node: &HtmlNode) {
    match node {
        HtmlNode::Text(value) => output.push_str(&html_escape::encode_text(value)),
        HtmlNode::Element(element) => write_element(output, element),
    }
}

fn write_element(output: &mut String, element: &HtmlElement) {
    let name = element.name();
    output.push('<');
    output.push_str(name);
    for (key, value) in &element.tag.attributes {
        output.push(' ');
        output.push_str(key);
        output.push_str("=\"");
        output.push_str(&html_escape::encode_double_quoted_attribute(value));
        output.push('"');
    }

    if element.is_void() {
        output.push_str(" />");
        return;
    }

    output.push('>');
    for child in &element.children {
        write_node(output, child);
    }
    output.push_str("</");
    output.push_str(name);
    output.push('>');
}
