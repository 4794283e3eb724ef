//! HTML entity to Unicode conversion.
//!
//! Rendered HTML may carry named entities the XML parser does not know.
//! These are converted to their Unicode equivalents before parsing;
//! standard XML entities (amp, lt, gt, quot, apos) are preserved as-is.

use std::sync::LazyLock;

use regex::Regex;

/// Regex pattern for matching named HTML entities.
static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z]+);").expect("invalid entity regex"));

/// Convert named HTML entities to Unicode characters.
///
/// Unknown entities are preserved unchanged.
pub fn convert_html_entities(html: &str) -> String {
    ENTITY_PATTERN
        .replace_all(html, |caps: &regex::Captures| {
            let entity_name = &caps[1];
            entity_to_unicode(entity_name)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned()
}

/// Map HTML entity name to Unicode character.
fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        // Common typography
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "middot" => "\u{00b7}",

        // Music notation that tends to appear in chord sheets
        "flat" => "\u{266d}",
        "natur" => "\u{266e}",
        "sharp" => "\u{266f}",

        // Legal symbols
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",

        // Misc
        "deg" => "\u{00b0}",
        "sect" => "\u{00a7}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "times" => "\u{00d7}",
        "plusmn" => "\u{00b1}",

        // Unknown entity - return None to preserve as-is
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_nbsp() {
        assert_eq!(
            convert_html_entities("Hello&nbsp;World"),
            "Hello\u{00a0}World"
        );
    }

    #[test]
    fn test_convert_sharp() {
        assert_eq!(convert_html_entities("C&sharp;m"), "C\u{266f}m");
    }

    #[test]
    fn test_preserve_xml_entities() {
        // Standard XML entities must survive for the XML parser
        assert_eq!(convert_html_entities("&amp;&lt;&gt;"), "&amp;&lt;&gt;");
    }

    #[test]
    fn test_preserve_unknown_entities() {
        assert_eq!(convert_html_entities("&unknown;"), "&unknown;");
    }

    #[test]
    fn test_no_entities() {
        assert_eq!(convert_html_entities("plain text"), "plain text");
    }
}
