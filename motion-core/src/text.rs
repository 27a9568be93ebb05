//! Description cleanup for plain-text display.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"));

/// Decoded in this order; no other entities are touched.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
];

/// Strip tags, decode the five common entities, trim.
pub fn sanitize_description(html: &str) -> String {
    let mut out = TAG_RE.replace_all(html, "").into_owned();
    for &(entity, replacement) in ENTITIES {
        out = out.replace(entity, replacement);
    }
    out.trim().to_string()
}

/// Cut to at most `max_chars` characters, appending "..." when shortened.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_decodes_nbsp() {
        assert_eq!(sanitize_description("<p>Hello&nbsp;<b>World</b></p>"), "Hello World");
    }

    #[test]
    fn decodes_in_literal_order() {
        // &amp;lt; becomes &lt; in the &amp; pass, then < in the &lt; pass.
        assert_eq!(sanitize_description("a &amp;lt; b"), "a < b");
        assert_eq!(sanitize_description("&quot;x&quot; &gt; y"), "\"x\" > y");
        assert_eq!(sanitize_description("caf&eacute;"), "caf&eacute;");
    }

    #[test]
    fn unclosed_tag_runs_to_next_bracket() {
        assert_eq!(sanitize_description("  <div class='x'>Plan<br/>  "), "Plan");
        assert_eq!(sanitize_description("before <b oops"), "before <b oops");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }
}
