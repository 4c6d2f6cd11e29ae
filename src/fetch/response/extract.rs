//! HTML snippet extraction.
//!
//! The snippet is a size-bounded piece of markup handed to the scoring engine
//! and the remote analysis. It is cut with regular expressions rather than a
//! DOM parser: the input is whatever the server sent, often not valid HTML,
//! and the goal is a representative sample, not a parse tree.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::config::{SNIPPET_BODY_CHARS, SNIPPET_FALLBACK_CHARS};

static HEAD_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<head\b[^>]*>.*?</head\s*>").expect("head pattern is valid")
});

static BODY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<body\b[^>]*>(.*?)</body\s*>").expect("body pattern is valid")
});

/// Extracts the analysis snippet from a raw response body.
///
/// 1. The first `<head>…</head>` block, tags included.
/// 2. Followed by up to `SNIPPET_BODY_CHARS` characters of the first
///    `<body …>…</body>` block's inner content.
/// 3. If neither block exists, the first `SNIPPET_FALLBACK_CHARS` characters
///    of the body verbatim.
///
/// # Returns
///
/// `None` for an empty body, the snippet otherwise.
pub fn extract_html_snippet(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    let head = HEAD_BLOCK.find(body).map(|m| m.as_str());
    let body_inner = BODY_BLOCK
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| take_chars(m.as_str(), SNIPPET_BODY_CHARS));

    if head.is_none() && body_inner.is_none() {
        debug!("No <head> or <body> block found, using raw prefix");
        return Some(take_chars(body, SNIPPET_FALLBACK_CHARS).to_string());
    }

    let mut snippet = String::with_capacity(
        head.map_or(0, str::len) + body_inner.map_or(0, str::len),
    );
    if let Some(head) = head {
        snippet.push_str(head);
    }
    if let Some(inner) = body_inner {
        snippet.push_str(inner);
    }
    Some(snippet)
}

/// Returns the first `max_chars` characters of `value` without splitting a
/// code point.
pub fn take_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_and_body_are_combined() {
        let html = "<html><head><title>Hi</title></head><body class=\"x\"><p>Hello</p></body></html>";
        let snippet = extract_html_snippet(html).expect("snippet");
        assert_eq!(snippet, "<head><title>Hi</title></head><p>Hello</p>");
    }

    #[test]
    fn test_head_match_is_case_insensitive_and_spans_lines() {
        let html = "<HTML>\n<HEAD>\n<meta charset=\"utf-8\">\n<TITLE>x</TITLE>\n</HEAD>\n<BODY>\nbody\n</BODY>";
        let snippet = extract_html_snippet(html).expect("snippet");
        assert!(snippet.starts_with("<HEAD>\n<meta charset=\"utf-8\">"));
        assert!(snippet.contains("</HEAD>"));
        assert!(snippet.ends_with("\nbody\n"));
    }

    #[test]
    fn test_head_match_is_non_greedy() {
        let html = "<head>a</head><body>b</body><head>c</head>";
        let snippet = extract_html_snippet(html).expect("snippet");
        assert_eq!(snippet, "<head>a</head>b");
    }

    #[test]
    fn test_header_element_is_not_a_head() {
        let html = "<header>nav</header> plain text";
        assert_eq!(extract_html_snippet(html).as_deref(), Some(html));
    }

    #[test]
    fn test_body_content_is_capped() {
        let inner = "a".repeat(SNIPPET_BODY_CHARS + 500);
        let html = format!("<head></head><body onload=\"init()\">{inner}</body>");
        let snippet = extract_html_snippet(&html).expect("snippet");
        assert_eq!(snippet.len(), "<head></head>".len() + SNIPPET_BODY_CHARS);
        assert!(snippet.starts_with("<head></head>"));
    }

    #[test]
    fn test_body_without_head() {
        let html = "<body><main>content</main></body>";
        assert_eq!(
            extract_html_snippet(html).as_deref(),
            Some("<main>content</main>")
        );
    }

    #[test]
    fn test_head_without_closed_body() {
        let html = "<head><title>t</title></head><body><p>never closed";
        assert_eq!(
            extract_html_snippet(html).as_deref(),
            Some("<head><title>t</title></head>")
        );
    }

    #[test]
    fn test_fallback_to_raw_prefix() {
        let body = "x".repeat(SNIPPET_FALLBACK_CHARS + 1000);
        let snippet = extract_html_snippet(&body).expect("snippet");
        assert_eq!(snippet, "x".repeat(SNIPPET_FALLBACK_CHARS));
    }

    #[test]
    fn test_short_unstructured_body_is_kept_verbatim() {
        assert_eq!(
            extract_html_snippet("{\"status\":\"ok\"}").as_deref(),
            Some("{\"status\":\"ok\"}")
        );
    }

    #[test]
    fn test_empty_body_has_no_snippet() {
        assert_eq!(extract_html_snippet(""), None);
    }

    #[test]
    fn test_limits_count_characters_not_bytes() {
        let inner = "é".repeat(SNIPPET_BODY_CHARS + 10);
        let html = format!("<body>{inner}</body>");
        let snippet = extract_html_snippet(&html).expect("snippet");
        assert_eq!(snippet.chars().count(), SNIPPET_BODY_CHARS);

        let raw = "ü".repeat(SNIPPET_FALLBACK_CHARS + 10);
        let snippet = extract_html_snippet(&raw).expect("snippet");
        assert_eq!(snippet.chars().count(), SNIPPET_FALLBACK_CHARS);
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("hello", 3), "hel");
        assert_eq!(take_chars("hi", 3), "hi");
        assert_eq!(take_chars("", 3), "");
        assert_eq!(take_chars("日本語", 2), "日本");
    }
}
