//! Placeholder tags and the regex fragments they expand to.
//!
//! `:segment` and `:hash` expand to the same fragment; `:hash` only marks
//! routes that take hashed ids.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

pub const PLACEHOLDERS: [(&str, &str); 6] = [
    ("any", ".*"),
    ("segment", "[^/]+"),
    ("alphanum", "[a-zA-Z0-9]+"),
    ("num", "[0-9]+"),
    ("alpha", "[a-zA-Z]+"),
    ("hash", "[^/]+"),
];

static TAG_REGEXES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    PLACEHOLDERS
        .iter()
        .map(|(tag, fragment)| {
            let tag = Regex::new(&format!("(?i):{}", regex::escape(tag))).unwrap();
            (tag, *fragment)
        })
        .collect()
});

/// Replaces every placeholder tag in `route`, in declaration order.
///
/// ```
/// use oriole_router::compile_placeholders;
///
/// assert_eq!(compile_placeholders("templates/edit/(:num)"), "templates/edit/([0-9]+)");
/// assert_eq!(compile_placeholders("files/(:ANY)"), "files/(.*)");
/// ```
pub fn compile_placeholders(route: &str) -> String {
    TAG_REGEXES
        .iter()
        .fold(route.to_string(), |acc, (tag, fragment)| {
            tag.replace_all(&acc, NoExpand(fragment)).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tags() {
        assert_eq!(
            compile_placeholders("(:any)/(:segment)/(:alphanum)/(:num)/(:alpha)/(:hash)"),
            "(.*)/([^/]+)/([a-zA-Z0-9]+)/([0-9]+)/([a-zA-Z]+)/([^/]+)"
        );
    }

    #[test]
    fn test_alphanum_is_not_eaten_by_alpha() {
        assert_eq!(compile_placeholders("(:alphanum)"), "([a-zA-Z0-9]+)");
    }

    #[test]
    fn test_literal_route_untouched() {
        assert_eq!(compile_placeholders("templates/delete-all"), "templates/delete-all");
    }
}
