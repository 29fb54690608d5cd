//! Reverse routing: rebuilding a concrete URL from a route literal or alias.
//!
//! Every registration records its compiled pattern under
//! `verb::domain::route` and, when the route has an alias, under
//! `verb::domain::alias`. Lookups try the exact domain first and fall back
//! to the wildcard domain, then repeat both for the wildcard verb.

use std::collections::HashMap;
use std::fmt::Display;
use std::ops::Range;

use regex::Regex;

use crate::error::ReverseRouteError;
use crate::verb::Verb;

/// Which half of the reverse index to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseKind {
    /// Keyed by the route literal as registered, e.g. `admin/templates/edit/(:num)`.
    ByRoute,
    /// Keyed by the `as` alias.
    ByAlias,
}

/// Verb and domain the lookup is performed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseOptions {
    pub verb: Verb,
    /// `None` searches the wildcard domain only.
    pub domain: Option<String>,
}

impl ReverseOptions {
    pub fn new() -> Self {
        Self {
            verb: Verb::Get,
            domain: None,
        }
    }

    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verb = verb;
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into().to_lowercase());
        self
    }
}

impl Default for ReverseOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    froms: HashMap<String, String>,
    aliases: HashMap<String, String>,
}

pub(crate) fn reverse_key(verb: Verb, domain: &str, key: &str) -> String {
    format!("{}::{}::{}", verb, domain, key)
}

impl ReverseIndex {
    pub(crate) fn insert_route(&mut self, verb: Verb, domain: &str, route: &str, compiled: &str) {
        self.froms
            .insert(reverse_key(verb, domain, route), compiled.to_string());
    }

    pub(crate) fn insert_alias(&mut self, verb: Verb, domain: &str, alias: &str, compiled: &str) {
        self.aliases
            .insert(reverse_key(verb, domain, alias), compiled.to_string());
    }

    pub fn contains_alias(&self, verb: Verb, domain: &str, alias: &str) -> bool {
        self.aliases.contains_key(&reverse_key(verb, domain, alias))
    }

    /// `verb::domain::route` → compiled pattern.
    pub fn froms(&self) -> &HashMap<String, String> {
        &self.froms
    }

    /// `verb::domain::alias` → compiled pattern.
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Finds the compiled template for `key` in the same order dispatch
    /// tries buckets: requested verb on the exact domain, then on `*`, then
    /// the wildcard verb on the exact domain and on `*`.
    pub fn lookup(&self, kind: ReverseKind, key: &str, options: &ReverseOptions) -> Option<&str> {
        let map = match kind {
            ReverseKind::ByRoute => &self.froms,
            ReverseKind::ByAlias => &self.aliases,
        };
        let domain = options.domain.as_deref().filter(|domain| *domain != "*");

        let mut verbs = vec![options.verb];
        if !options.verb.is_wildcard() {
            verbs.push(Verb::Any);
        }

        verbs
            .into_iter()
            .flat_map(|verb| domain.into_iter().chain(["*"]).map(move |domain| (verb, domain)))
            .find_map(|(verb, domain)| map.get(&reverse_key(verb, domain, key)))
            .map(String::as_str)
    }
}

/// Byte ranges of the top-level parenthesised groups of a pattern, ignoring
/// escaped parentheses and parentheses inside character classes.
pub(crate) fn top_level_groups(pattern: &str) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut escaped = false;
    let mut in_class = false;

    for (i, ch) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            ')' if !in_class && depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    groups.push(start..i + 1);
                }
            }
            _ => {}
        }
    }

    groups
}

/// Substitutes `params` for the groups of `template`, left to right.
///
/// Each parameter must fully match the group it replaces. Extra parameters
/// are ignored.
///
/// ```
/// use oriole_router::fill_template;
///
/// let url = fill_template("templates/edit/([0-9]+)", &[&42]).unwrap();
/// assert_eq!(url, "/templates/edit/42");
///
/// assert!(fill_template("templates/edit/([0-9]+)", &[&"abc"]).is_err());
/// ```
pub fn fill_template(template: &str, params: &[&dyn Display]) -> Result<String, ReverseRouteError> {
    let groups = top_level_groups(template);
    let mut url = String::with_capacity(template.len());
    let mut cursor = 0;

    for (index, range) in groups.iter().enumerate() {
        let value = params
            .get(index)
            .ok_or_else(|| ReverseRouteError::TooFewArguments {
                route: template.to_string(),
                expected: groups.len(),
                given: params.len(),
            })?
            .to_string();

        let group = &template[range.clone()];
        let validator = Regex::new(&format!("^(?:{})$", group)).map_err(|_| {
            ReverseRouteError::InvalidGroup {
                route: template.to_string(),
                pattern: group.to_string(),
            }
        })?;

        if !validator.is_match(&value) {
            return Err(ReverseRouteError::ParameterMismatch {
                route: template.to_string(),
                index,
                value,
                pattern: group.to_string(),
            });
        }

        url.push_str(&template[cursor..range.start]);
        url.push_str(&value);
        cursor = range.end;
    }

    url.push_str(&template[cursor..]);
    Ok(format!("/{}", url.trim_start_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_top_level_groups() {
        let pattern = "a/([0-9]+)/b/((x|y)[^/]+)/\\(c\\)/[()]";
        let groups: Vec<&str> = top_level_groups(pattern)
            .into_iter()
            .map(|range| &pattern[range])
            .collect();
        assert_eq!(groups, vec!["([0-9]+)", "((x|y)[^/]+)"]);
    }

    #[test]
    fn test_fill_multiple_groups() {
        let url = fill_template("resources/set-order/([0-9]+)/([0-9]+)", &[&3, &10]).unwrap();
        assert_eq!(url, "/resources/set-order/3/10");
    }

    #[test]
    fn test_fill_too_few() {
        let err = fill_template("resources/set-order/([0-9]+)/([0-9]+)", &[&3]).unwrap_err();
        assert_eq!(
            err,
            ReverseRouteError::TooFewArguments {
                route: "resources/set-order/([0-9]+)/([0-9]+)".to_string(),
                expected: 2,
                given: 1,
            }
        );
    }

    #[test]
    fn test_fill_mismatch_reports_index() {
        let err = fill_template("set/([0-9]+)/([a-zA-Z]+)", &[&1, &"2"]).unwrap_err();
        assert!(matches!(err, ReverseRouteError::ParameterMismatch { index: 1, .. }));
    }

    #[test]
    fn test_fill_root_and_static() {
        assert_eq!(fill_template("/", &[]).unwrap(), "/");
        assert_eq!(fill_template("admin/templates", &[]).unwrap(), "/admin/templates");
    }

    #[test]
    fn test_any_group_accepts_slashes() {
        let url = fill_template("get-assets/(.*)/([^/]+)", &[&"css/admin", &"main.css"]).unwrap();
        assert_eq!(url, "/get-assets/css/admin/main.css");
    }

    #[test]
    fn test_lookup_falls_back_to_wildcard_domain() {
        let mut index = ReverseIndex::default();
        index.insert_alias(Verb::Get, "*", "home", "home");
        index.insert_alias(Verb::Get, "admin.example.com", "home", "admin");

        let exact = ReverseOptions::new().with_domain("ADMIN.example.com");
        assert_eq!(index.lookup(ReverseKind::ByAlias, "home", &exact), Some("admin"));

        let other = ReverseOptions::new().with_domain("www.example.com");
        assert_eq!(index.lookup(ReverseKind::ByAlias, "home", &other), Some("home"));

        let post = ReverseOptions::new().with_verb(Verb::Post);
        assert_eq!(index.lookup(ReverseKind::ByAlias, "home", &post), None);
    }

    #[test]
    fn test_lookup_falls_back_to_wildcard_verb() {
        let mut index = ReverseIndex::default();
        index.insert_alias(Verb::Any, "*", "news", "news/([0-9]+)");
        index.insert_alias(Verb::Any, "www.example.com", "news", "www-news/([0-9]+)");
        index.insert_alias(Verb::Get, "*", "feed", "feed");

        let get = ReverseOptions::new();
        assert_eq!(index.lookup(ReverseKind::ByAlias, "news", &get), Some("news/([0-9]+)"));

        let www = ReverseOptions::new().with_domain("www.example.com");
        assert_eq!(index.lookup(ReverseKind::ByAlias, "news", &www), Some("www-news/([0-9]+)"));
        assert_eq!(index.lookup(ReverseKind::ByAlias, "feed", &www), Some("feed"));

        let any = ReverseOptions::new().with_verb(Verb::Any);
        assert_eq!(index.lookup(ReverseKind::ByAlias, "feed", &any), None);
    }
}
