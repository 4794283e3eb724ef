//! Markup serializer with output escaping.
//!
//! All text leaves are XML-escaped on output, so a pass that inserts raw
//! line content as text nodes can never inject markup into the result.

use std::fmt::Write;

use crate::tree::{Element, Node};

/// Serialize a fragment tree back to markup.
///
/// The synthetic root wrapper produced by
/// [`parse_fragment`](crate::parse_fragment) is not emitted; only its
/// children are.
#[must_use]
pub fn serialize_fragment(root: &Element) -> String {
    let mut out = String::with_capacity(4096);
    for child in &root.children {
        serialize_node(child, &mut out);
    }
    out
}

/// Serialize a single node recursively.
fn serialize_node(node: &Node, out: &mut String) {
    let el = match node {
        Node::Text(text) => {
            out.push_str(&escape_text(text));
            return;
        }
        Node::Element(el) => el,
    };

    out.push('<');
    out.push_str(&el.tag);

    for (key, value) in &el.attrs {
        write!(out, r#" {}="{}""#, key, escape_attr(value)).unwrap();
    }

    if el.children.is_empty() {
        out.push_str(" />");
    } else {
        out.push('>');
        for child in &el.children {
            serialize_node(child, out);
        }
        write!(out, "</{}>", el.tag).unwrap();
    }
}

/// Escape text for XML content.
fn escape_text(text: &str) -> String {
    escape_xml(text, false)
}

/// Escape text for XML attribute values.
fn escape_attr(text: &str) -> String {
    escape_xml(text, true)
}

/// Escape XML special characters.
fn escape_xml(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            '\'' if escape_quotes => result.push_str("&apos;"),
            _ => result.push(ch),
        }
    }
    result
}
