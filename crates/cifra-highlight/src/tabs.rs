//! Tablature line renderer.
//!
//! Replaces fenced code blocks tagged with the configured tablature
//! language by a `<pre class="tab-rendered">` wrapper holding one `<div>`
//! per input line. No tablature semantics are interpreted; this is purely
//! a line-to-element mapping, and line content is escaped by the
//! serializer on output.

use cifra_config::Config;
use cifra_dom::{Element, Node};

/// Class of the rebuilt wrapper element.
const RENDERED_CLASS: &str = "tab-rendered";

/// Replace all tagged tablature blocks under `root`.
///
/// A tablature block is a `<pre>` whose only element child is a `<code>`
/// carrying the `language-{tab_language}` class. The entire `<pre>` is
/// replaced, so a second pass finds nothing to match.
pub fn render_tabs(root: &mut Node, config: &Config) {
    if let Node::Element(el) = root {
        replace_tab_blocks(el, &config.tab_language);
    }
}

fn replace_tab_blocks(el: &mut Element, language: &str) {
    for child in &mut el.children {
        if let Node::Element(child_el) = child {
            if let Some(source) = tab_block_source(child_el, language) {
                *child_el = render_tab(&source);
            } else {
                replace_tab_blocks(child_el, language);
            }
        }
    }
}

/// Extract the text of a tagged tablature block, if `el` is one.
fn tab_block_source(el: &Element, language: &str) -> Option<String> {
    if el.tag != "pre" {
        return None;
    }

    let mut elements = el.children.iter().filter_map(Node::as_element);
    let code = elements.next()?;
    if elements.next().is_some() || code.tag != "code" {
        return None;
    }

    let class = code.attrs.get("class")?;
    let tag = format!("language-{language}");
    if !class.split_whitespace().any(|c| c == tag) {
        return None;
    }

    Some(code.text_content())
}

/// Build the line-per-div wrapper for one block's text.
///
/// The fence terminator's trailing newline is stripped before splitting;
/// interior empty lines still produce empty `<div>` elements.
fn render_tab(source: &str) -> Element {
    let content = source.strip_suffix('\n').unwrap_or(source);

    let mut wrapper = Element::new("pre").with_attr("class", RENDERED_CLASS);
    for line in content.split('\n') {
        let div = if line.is_empty() {
            Element::new("div")
        } else {
            Element::new("div").with_text(line)
        };
        wrapper.children.push(div.into());
    }
    wrapper
}
