//! Post-processing passes for rendered chord sheets.
//!
//! Two passes over a [`cifra_dom`] tree, run by the host once per
//! rendered subtree:
//!
//! - [`highlight_chords`]: wraps marker-delimited chord tokens in styled
//!   `<span>` elements, splicing around the matched text.
//! - [`render_tabs`]: replaces fenced code blocks tagged with the
//!   configured tablature language by a line-per-`<div>` wrapper.
//!
//! [`process`] composes both in the order the original post-processor
//! used. All passes mutate the tree in place, never fail, and are
//! idempotent on their own output: emitted chord spans no longer contain
//! markers and the rebuilt tablature wrapper no longer carries the
//! language tag, so a second run is a no-op.
//!
//! # Example
//!
//! ```
//! use cifra_config::Config;
//! use cifra_dom::{Node, parse_fragment, serialize_fragment};
//!
//! let config = Config::default();
//! let mut root = Node::Element(parse_fragment("<p>[[C]] major</p>").unwrap());
//! cifra_highlight::process(&mut root, &config);
//!
//! let html = serialize_fragment(root.as_element().unwrap());
//! assert!(html.contains("<span"));
//! assert!(html.contains(">C</span> major"));
//! ```

mod chords;
mod tabs;

pub use chords::highlight_chords;
pub use tabs::render_tabs;

use cifra_config::Config;
use cifra_dom::Node;

/// Run both post-processing passes over a rendered subtree.
///
/// Mutates `root` in place; no return value. Configuration is read-only
/// for the duration of the pass.
pub fn process(root: &mut Node, config: &Config) {
    highlight_chords(root, config);
    render_tabs(root, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cifra_dom::{parse_fragment, serialize_fragment};
    use pretty_assertions::assert_eq;

    fn process_html(html: &str, config: &Config) -> String {
        let mut root = Node::Element(parse_fragment(html).unwrap());
        process(&mut root, config);
        serialize_fragment(root.as_element().unwrap())
    }

    #[test]
    fn test_both_passes_run() {
        let config = Config::default();
        let html = concat!(
            "<p>Intro: [[Am]]</p>",
            r#"<pre><code class="language-tablatura">e|--0--</code></pre>"#,
        );
        let out = process_html(html, &config);

        assert!(out.contains(">Am</span>"));
        assert!(out.contains(r#"<pre class="tab-rendered"><div>e|--0--</div></pre>"#));
    }

    #[test]
    fn test_process_is_idempotent() {
        let config = Config::default();
        let mut root = Node::Element(
            parse_fragment("<p>[[C]] and [[G7]]</p>").unwrap(),
        );
        process(&mut root, &config);
        let once = root.clone();
        process(&mut root, &config);
        assert_eq!(root, once);
    }

    #[test]
    fn test_detached_text_root_is_untouched() {
        let config = Config::default();
        let mut root = Node::text("[[C]] has no parent to splice into");
        process(&mut root, &config);
        assert_eq!(root, Node::text("[[C]] has no parent to splice into"));
    }
}
