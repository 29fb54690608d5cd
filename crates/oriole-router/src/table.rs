use std::collections::HashMap;
use std::fmt::{self, Display};

use regex::Regex;
use tracing::warn;

use crate::error::ReverseRouteError;
use crate::handler::{ArgToken, Handler};
use crate::reverse::{fill_template, ReverseIndex, ReverseKind, ReverseOptions};
use crate::verb::Verb;

/// One registered route with its resolved handler.
pub struct RouteEntry<C> {
    route: String,
    compiled: String,
    regex: Regex,
    handler: Handler<C>,
    args: Vec<ArgToken>,
    alias: Option<String>,
}

impl<C> RouteEntry<C> {
    pub(crate) fn new(
        route: String,
        compiled: String,
        regex: Regex,
        handler: Handler<C>,
        args: Vec<ArgToken>,
        alias: Option<String>,
    ) -> Self {
        Self {
            route,
            compiled,
            regex,
            handler,
            args,
            alias,
        }
    }

    /// The route literal before placeholder expansion.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// The route after placeholder expansion, without anchors.
    pub fn compiled(&self) -> &str {
        &self.compiled
    }

    pub fn handler(&self) -> &Handler<C> {
        &self.handler
    }

    pub fn args(&self) -> &[ArgToken] {
        &self.args
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Matches the whole of `path`, returning the captured groups with
    /// group 0 dropped. Groups that did not participate are empty strings.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        self.regex.captures(path).map(|caps| {
            caps.iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect()
        })
    }
}

impl<C> fmt::Debug for RouteEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("route", &self.route)
            .field("compiled", &self.compiled)
            .field("handler", &self.handler)
            .field("args", &self.args)
            .field("alias", &self.alias)
            .finish()
    }
}

/// The immutable route table produced by [`crate::Routes::build`].
pub struct RouteTable<C> {
    routes: HashMap<Verb, HashMap<String, Vec<RouteEntry<C>>>>,
    reverse: ReverseIndex,
}

impl<C> RouteTable<C> {
    pub(crate) fn new(
        routes: HashMap<Verb, HashMap<String, Vec<RouteEntry<C>>>>,
        reverse: ReverseIndex,
    ) -> Self {
        Self { routes, reverse }
    }

    /// Entries of one verb/domain bucket, in match order.
    pub fn bucket(&self, verb: Verb, domain: &str) -> Option<&[RouteEntry<C>]> {
        self.routes
            .get(&verb)
            .and_then(|domains| domains.get(domain))
            .map(Vec::as_slice)
    }

    /// Like [`RouteTable::bucket`], also returning the table's own copy of
    /// the domain key.
    pub(crate) fn bucket_with_domain(&self, verb: Verb, domain: &str) -> Option<(&str, &[RouteEntry<C>])> {
        self.routes
            .get(&verb)
            .and_then(|domains| domains.get_key_value(domain))
            .map(|(domain, entries)| (domain.as_str(), entries.as_slice()))
    }

    /// Every entry as `(verb, domain, entry)`, sorted by verb and domain;
    /// entries within a bucket keep match order.
    pub fn entries(&self) -> Vec<(Verb, &str, &RouteEntry<C>)> {
        let mut buckets: Vec<(Verb, &str, &Vec<RouteEntry<C>>)> = self
            .routes
            .iter()
            .flat_map(|(verb, domains)| {
                domains
                    .iter()
                    .map(move |(domain, entries)| (*verb, domain.as_str(), entries))
            })
            .collect();
        buckets.sort_by(|a, b| (a.0.as_str(), a.1).cmp(&(b.0.as_str(), b.1)));

        buckets
            .into_iter()
            .flat_map(|(verb, domain, entries)| entries.iter().map(move |entry| (verb, domain, entry)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.routes
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn reverse_index(&self) -> &ReverseIndex {
        &self.reverse
    }

    /// Rebuilds a URL from a route literal or alias.
    ///
    /// A key that is not registered for the verb (on the requested domain or
    /// the wildcard domain) yields an empty string. Parameter problems are
    /// errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use oriole_router::{Controllers, ReverseKind, ReverseOptions, RouteOptions, Routes};
    ///
    /// let mut routes: Routes<()> = Routes::new();
    /// routes
    ///     .get("templates/edit/(:num)", "Templates::edit/$0", RouteOptions::named("edit_template"))
    ///     .unwrap();
    ///
    /// let mut controllers = Controllers::new();
    /// controllers.controller("Templates").action("edit", |_, _| Ok(None));
    /// let table = routes.build(&controllers).unwrap();
    ///
    /// let options = ReverseOptions::new();
    /// let url = table
    ///     .reverse_route(ReverseKind::ByAlias, "edit_template", &[&7], &options)
    ///     .unwrap();
    /// assert_eq!(url, "/templates/edit/7");
    ///
    /// let missing = table
    ///     .reverse_route(ReverseKind::ByAlias, "nope", &[], &options)
    ///     .unwrap();
    /// assert_eq!(missing, "");
    /// ```
    pub fn reverse_route(
        &self,
        kind: ReverseKind,
        key: &str,
        params: &[&dyn Display],
        options: &ReverseOptions,
    ) -> Result<String, ReverseRouteError> {
        match self.reverse.lookup(kind, key, options) {
            Some(template) => fill_template(template, params),
            None => {
                warn!(
                    ?kind,
                    key,
                    verb = %options.verb,
                    domain = options.domain.as_deref().unwrap_or("*"),
                    "no reverse route registered"
                );
                Ok(String::new())
            }
        }
    }
}

impl<C> fmt::Debug for RouteTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.len())
            .field("reverse", &self.reverse)
            .finish()
    }
}
