//! HTML fragment parser.
//!
//! Wraps the fragment in a synthetic root element and parses it with
//! quick-xml into a [`Node`] tree. Text, entity references and CDATA all
//! become text leaves in sibling order; adjacent runs are merged into one
//! leaf so each text node carries the maximal uninterrupted text span.

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::convert_html_entities;
use crate::error::DomError;
use crate::tree::{Element, Node};

/// Tag of the synthetic wrapper element.
const FRAGMENT_ROOT: &str = "root";

/// Parse an HTML/XHTML fragment into an element tree.
///
/// The returned element is a synthetic root holding the fragment's
/// top-level nodes as children. Named HTML entities are converted to
/// Unicode before parsing.
///
/// # Errors
///
/// Returns an error if the fragment cannot be parsed as well-formed XML.
pub fn parse_fragment(html: &str) -> Result<Element, DomError> {
    let html = convert_html_entities(html);
    let wrapped = format!("<{FRAGMENT_ROOT}>{html}</{FRAGMENT_ROOT}>");

    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    // Consume the wrapper's opening tag
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => break,
            Event::Eof => return Ok(Element::new(FRAGMENT_ROOT)),
            _ => {}
        }
        buf.clear();
    }

    let children = parse_children(&mut reader, FRAGMENT_ROOT)?;
    Ok(Element::new(FRAGMENT_ROOT).with_children(children))
}

/// Parse child nodes until the parent's closing tag.
fn parse_children<R: BufRead>(
    reader: &mut Reader<R>,
    parent_tag: &str,
) -> Result<Vec<Node>, DomError> {
    let mut buf = Vec::new();
    let mut children = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_tag(reader, &e);
                let attrs = decode_attrs(reader, &e);
                let nested = parse_children(reader, &tag)?;
                children.push(Node::Element(Element {
                    tag,
                    attrs,
                    children: nested,
                }));
            }
            Event::Empty(e) => {
                // Self-closing element
                children.push(Node::Element(Element {
                    tag: decode_tag(reader, &e),
                    attrs: decode_attrs(reader, &e),
                    children: Vec::new(),
                }));
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut children, &text);
            }
            Event::GeneralRef(e) => {
                // Entity references (e.g. &lt; &gt; &amp;)
                let entity = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut children, &decode_entity(&entity));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(&mut children, &text);
            }
            Event::End(e) => {
                let end_tag = decode_tag_from_bytes(reader, e.name().as_ref());
                if end_tag == parent_tag {
                    return Ok(children);
                }
                // Mismatched end tag - continue
            }
            Event::Eof => {
                return Ok(children);
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Append text, merging into a trailing text leaf when present.
fn append_text(children: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(existing)) = children.last_mut() {
        existing.push_str(text);
    } else {
        children.push(Node::Text(text.to_owned()));
    }
}

fn decode_tag<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> String {
    decode_tag_from_bytes(reader, e.name().as_ref())
}

fn decode_tag_from_bytes<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn decode_attrs<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
            |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            std::borrow::Cow::into_owned,
        );

        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );

        attrs.insert(key, value);
    }
    attrs
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        // Numeric character references
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}
