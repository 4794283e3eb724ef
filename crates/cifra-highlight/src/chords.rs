//! Chord scanner/rewriter.
//!
//! Walks every text leaf under the root and replaces each
//! marker-delimited chord token with a styled `<span>`, preserving all
//! surrounding text exactly. Marker strings come from user configuration
//! and are escaped before the matcher is compiled, so a marker containing
//! regex metacharacters cannot corrupt matching or abort the render.

use cifra_config::Config;
use cifra_dom::{Element, Node};
use regex::Regex;

/// Chord body shape: root letter, optional accidental, optional quality,
/// optional single-digit extension.
const CHORD_BODY: &str = "[A-G][#b]?(?:m|maj|min|dim|aug)?[0-9]?";

/// Compiled marker-delimited chord matcher.
struct ChordMatcher {
    pattern: Regex,
}

impl ChordMatcher {
    /// Compile the matcher for the configured marker pair.
    ///
    /// Both marker literals are regex-escaped. An empty marker is a
    /// valid degenerate configuration: the pattern reduces to the bare
    /// chord-body shape.
    fn compile(config: &Config) -> Result<Self, regex::Error> {
        let pattern = format!(
            "{}({CHORD_BODY}){}",
            regex::escape(&config.open_marker),
            regex::escape(&config.close_marker())
        );
        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    /// Split one text leaf into replacement nodes.
    ///
    /// Returns `None` when the leaf has no match, so the caller can move
    /// the original leaf back untouched. Matches are non-overlapping;
    /// each scan resumes strictly after the previous match's end.
    fn split_leaf(&self, text: &str, config: &Config) -> Option<Vec<Node>> {
        let mut nodes = Vec::new();
        let mut last_end = 0;

        for caps in self.pattern.captures_iter(text) {
            let whole = caps.get(0).expect("group 0 is the whole match");
            if whole.start() > last_end {
                nodes.push(Node::text(&text[last_end..whole.start()]));
            }
            nodes.push(Node::Element(chord_span(&caps[1], config)));
            last_end = whole.end();
        }

        if last_end == 0 {
            return None;
        }
        if last_end < text.len() {
            nodes.push(Node::text(&text[last_end..]));
        }
        Some(nodes)
    }
}

/// Build the styled span for one matched chord body.
fn chord_span(body: &str, config: &Config) -> Element {
    let weight = if config.bold { "bold" } else { "normal" };
    Element::new("span")
        .with_attr(
            "style",
            format!(
                "color:{};font-weight:{weight};font-size:{}px",
                config.highlight_color, config.font_size
            ),
        )
        .with_text(body)
}

/// Highlight all chord tokens under `root`.
///
/// Mutates text leaves in place (by replacement, never by edit); leaves
/// with no match are not touched at all. A bare text root has no parent
/// to splice into and is skipped. If the configured markers somehow fail
/// to compile, the pass logs a warning and leaves the subtree untouched
/// rather than breaking the render.
pub fn highlight_chords(root: &mut Node, config: &Config) {
    let matcher = match ChordMatcher::compile(config) {
        Ok(matcher) => matcher,
        Err(err) => {
            tracing::warn!(%err, "chord marker pattern failed to compile, skipping pass");
            return;
        }
    };

    if let Node::Element(el) = root {
        rewrite_element(el, &matcher, config);
    }
}

/// Rebuild one element's child list, splicing chord spans into text
/// leaves.
///
/// The child vector is taken by value and rebuilt, so mutation can never
/// invalidate an in-progress traversal, and freshly inserted nodes are
/// never re-scanned.
fn rewrite_element(el: &mut Element, matcher: &ChordMatcher, config: &Config) {
    let children = std::mem::take(&mut el.children);
    let mut rebuilt = Vec::with_capacity(children.len());

    for child in children {
        match child {
            Node::Text(text) => match matcher.split_leaf(&text, config) {
                Some(replacement) => rebuilt.extend(replacement),
                None => rebuilt.push(Node::Text(text)),
            },
            Node::Element(mut child_el) => {
                rewrite_element(&mut child_el, matcher, config);
                rebuilt.push(Node::Element(child_el));
            }
        }
    }

    el.children = rebuilt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use cifra_dom::{parse_fragment, serialize_fragment};
    use pretty_assertions::assert_eq;

    fn config_with_markers(open: &str, close: Option<&str>) -> Config {
        Config {
            open_marker: open.to_owned(),
            close_marker: close.map(str::to_owned),
            ..Config::default()
        }
    }

    fn highlight_html(html: &str, config: &Config) -> String {
        let mut root = Node::Element(parse_fragment(html).unwrap());
        highlight_chords(&mut root, config);
        serialize_fragment(root.as_element().unwrap())
    }

    #[test]
    fn test_basic_chord_replaced() {
        let config = Config::default();
        let out = highlight_html("<p>Play [[C]] here</p>", &config);
        assert_eq!(
            out,
            r#"<p>Play <span style="color:red;font-weight:bold;font-size:16px">C</span> here</p>"#
        );
    }

    #[test]
    fn test_style_application() {
        let config = Config {
            highlight_color: "orange".to_owned(),
            bold: true,
            font_size: 20,
            ..Config::default()
        };
        let out = highlight_html("<p>[[C]]</p>", &config);
        assert!(out.contains(r#"style="color:orange;font-weight:bold;font-size:20px""#));
    }

    #[test]
    fn test_not_bold_uses_normal_weight() {
        let config = Config {
            bold: false,
            ..Config::default()
        };
        let out = highlight_html("<p>[[C]]</p>", &config);
        assert!(out.contains("font-weight:normal"));
    }

    #[test]
    fn test_round_trip_text_preserved_without_matches() {
        let config = Config::default();
        let html = "<p>No chords here, just [brackets] and C notes</p>";
        let root = parse_fragment(html).unwrap();
        let original_text = root.text_content();

        let mut node = Node::Element(root);
        highlight_chords(&mut node, &config);

        assert_eq!(node.text_content(), original_text);
    }

    #[test]
    fn test_unmatched_leaf_not_replaced() {
        let config = Config::default();
        let before = parse_fragment("<p>plain text</p>").unwrap();
        let mut node = Node::Element(before.clone());
        highlight_chords(&mut node, &config);
        assert_eq!(node, Node::Element(before));
    }

    #[test]
    fn test_marker_with_regex_special_chars() {
        // ((C)) with ((/)) markers: parens are regex groups if unescaped
        let config = config_with_markers("((", Some("))"));
        let out = highlight_html("<p>((C))</p>", &config);
        assert_eq!(
            out,
            r#"<p><span style="color:red;font-weight:bold;font-size:16px">C</span></p>"#
        );
    }

    #[test]
    fn test_marker_with_dot_and_star() {
        let config = config_with_markers(".*", Some("*."));
        let out = highlight_html("<p>.*D*. but xxDyy stays</p>", &config);
        assert!(out.contains(">D</span>"));
        assert!(out.contains("xxDyy stays"));
    }

    #[test]
    fn test_adjacent_matches_do_not_merge() {
        let config = config_with_markers("[", Some("]"));
        let out = highlight_html("<p>[C][D]</p>", &config);
        assert_eq!(
            out,
            concat!(
                r#"<p><span style="color:red;font-weight:bold;font-size:16px">C</span>"#,
                r#"<span style="color:red;font-weight:bold;font-size:16px">D</span></p>"#
            )
        );
    }

    #[test]
    fn test_invalid_root_letter_passes_through() {
        let config = config_with_markers("[", Some("]"));
        let out = highlight_html("<p>[H]</p>", &config);
        assert_eq!(out, "<p>[H]</p>");
    }

    #[test]
    fn test_empty_marker_pair_passes_through() {
        let config = Config::default();
        let out = highlight_html("<p>[[]] nothing inside</p>", &config);
        assert_eq!(out, "<p>[[]] nothing inside</p>");
    }

    #[test]
    fn test_chord_qualities_and_extensions() {
        let config = Config::default();
        for chord in ["C", "F#", "Bb", "Am", "Cmaj7", "Ddim", "Gaug", "Emin9", "A7"] {
            let out = highlight_html(&format!("<p>[[{chord}]]</p>"), &config);
            assert!(
                out.contains(&format!(">{chord}</span>")),
                "expected {chord} to highlight, got: {out}"
            );
        }
    }

    #[test]
    fn test_nested_elements_are_scanned() {
        let config = Config::default();
        let out = highlight_html("<ul><li>First [[Em]]</li><li>Second</li></ul>", &config);
        assert!(out.contains(">Em</span>"));
        assert!(out.contains("<li>Second</li>"));
    }

    #[test]
    fn test_text_around_matches_preserved() {
        let config = Config::default();
        let out = highlight_html("<p>intro [[C]] middle [[G]] outro</p>", &config);
        let root = parse_fragment(&out).unwrap();
        assert_eq!(root.text_content(), "intro C middle G outro");
    }

    #[test]
    fn test_derived_close_marker_used() {
        // No explicit close marker: [[ derives ]]
        let config = config_with_markers("[[", None);
        let out = highlight_html("<p>[[C]]</p>", &config);
        assert!(out.contains(">C</span>"));
    }

    #[test]
    fn test_empty_open_marker_matches_bare_chords() {
        // Degenerate configuration: bare chord-shaped substrings highlight
        let config = config_with_markers("", Some(""));
        let out = highlight_html("<p>C</p>", &config);
        assert!(out.contains(">C</span>"));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let config = Config::default();
        let mut root = Node::Element(parse_fragment("<p>a [[C]] b</p>").unwrap());
        highlight_chords(&mut root, &config);
        let once = root.clone();
        highlight_chords(&mut root, &config);
        assert_eq!(root, once);
    }

    #[test]
    fn test_bare_text_root_skipped() {
        let config = Config::default();
        let mut root = Node::text("[[C]]");
        highlight_chords(&mut root, &config);
        assert_eq!(root, Node::text("[[C]]"));
    }
}
