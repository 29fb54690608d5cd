//! Sanitising applied to route literals before they are compiled.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*(?:>|$)").unwrap());

/// Removes anything that looks like a markup tag, including an unterminated
/// trailing one.
pub fn strip_tags(input: &str) -> String {
    TAG_REGEX.replace_all(input, "").into_owned()
}

/// Escapes the five HTML special characters.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
