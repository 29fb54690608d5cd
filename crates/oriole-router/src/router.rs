//! Request dispatch.
//!
//! Resolution is a single pass over at most four buckets, tried in this
//! order and stopping at the first match:
//!
//! 1. request verb, request host
//! 2. request verb, `*`
//! 3. `*`, request host
//! 4. `*`, `*`
//!
//! Within a bucket, entries are tried in registration order.

use tracing::{debug, trace};

use crate::error::RoutingError;
use crate::handler::{ArgToken, Handler, HandlerResult};
use crate::path::normalize_request_path;
use crate::table::{RouteEntry, RouteTable};
use crate::verb::Verb;

/// The three request inputs dispatch depends on, normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    /// `None` for methods no route can be registered for; such requests only
    /// reach the wildcard-verb tiers.
    pub verb: Option<Verb>,
    pub method: String,
    pub host: String,
    pub path: String,
}

impl RequestTarget {
    /// Lowercases the method and host and normalises the path.
    ///
    /// ```
    /// use oriole_router::{RequestTarget, Verb};
    ///
    /// let target = RequestTarget::new("GET", "Admin.Example.com", "/templates/edit/7?x=1");
    /// assert_eq!(target.verb, Some(Verb::Get));
    /// assert_eq!(target.host, "admin.example.com");
    /// assert_eq!(target.path, "templates/edit/7");
    /// ```
    pub fn new(method: &str, host: &str, uri: &str) -> Self {
        let method = method.trim().to_lowercase();
        let verb = method
            .parse::<Verb>()
            .ok()
            .filter(|verb| !verb.is_wildcard());

        Self {
            verb,
            method,
            host: host.trim().to_lowercase(),
            path: normalize_request_path(uri),
        }
    }
}

/// A successful resolution.
pub struct MatchResult<'a, C> {
    pub entry: &'a RouteEntry<C>,
    /// Bucket the entry was found in.
    pub verb: Verb,
    pub domain: &'a str,
    /// Captured groups, group 0 dropped.
    pub params: Vec<String>,
}

impl<C> std::fmt::Debug for MatchResult<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchResult")
            .field("entry", self.entry)
            .field("verb", &self.verb)
            .field("domain", &self.domain)
            .field("params", &self.params)
            .finish()
    }
}

impl<'a, C> MatchResult<'a, C> {
    pub fn handler(&self) -> &'a Handler<C> {
        self.entry.handler()
    }

    pub fn args(&self) -> &'a [ArgToken] {
        self.entry.args()
    }

    /// The argument list an action receives.
    pub fn resolved_args(&self) -> Vec<Option<String>> {
        self.entry
            .args()
            .iter()
            .map(|token| token.resolve(&self.params))
            .collect()
    }
}

/// Resolves requests against a [`RouteTable`] and runs the matched handler.
pub struct Router<'a, C> {
    table: &'a RouteTable<C>,
}

impl<'a, C> Router<'a, C> {
    pub fn new(table: &'a RouteTable<C>) -> Self {
        Self { table }
    }

    pub fn define_route(&self, target: &RequestTarget) -> Result<MatchResult<'a, C>, RoutingError> {
        let host = target.host.as_str();
        let tiers = [
            (target.verb, host),
            (target.verb, "*"),
            (Some(Verb::Any), host),
            (Some(Verb::Any), "*"),
        ];

        tiers
            .iter()
            .filter_map(|(verb, domain)| verb.map(|verb| (verb, *domain)))
            .find_map(|(verb, domain)| self.find_route(verb, domain, &target.path))
            .ok_or_else(|| RoutingError::NoRoute {
                method: target.method.clone(),
                host: target.host.clone(),
                path: target.path.trim_start_matches('/').to_string(),
            })
    }

    fn find_route(&self, verb: Verb, domain: &str, path: &str) -> Option<MatchResult<'a, C>> {
        let table = self.table;
        let (domain, bucket) = table
            .bucket_with_domain(verb, domain)
            .or_else(|| {
                trace!(%verb, domain, "no bucket");
                None
            })?;

        bucket.iter().find_map(|entry| {
            entry.captures(path).map(|params| {
                debug!(%verb, domain, route = entry.route(), ?params, "matched route");
                MatchResult {
                    entry,
                    verb,
                    domain,
                    params,
                }
            })
        })
    }

    /// Invokes the matched handler: inline closures get the captured groups,
    /// controller actions get the route's resolved argument tokens.
    pub fn run_handler(&self, matched: &MatchResult<'a, C>, ctx: &C) -> Result<Option<String>, RoutingError> {
        let result: HandlerResult = match matched.handler() {
            Handler::Inline(handler) => handler(ctx, &matched.params),
            Handler::Action { action, .. } => action(ctx, &matched.resolved_args()),
        };

        result.map_err(|source| RoutingError::HandlerFailed {
            handler: matched.handler().describe(),
            route: matched.entry.route().to_string(),
            source,
        })
    }

    /// [`Router::define_route`] followed by [`Router::run_handler`].
    pub fn dispatch(&self, target: &RequestTarget, ctx: &C) -> Result<Option<String>, RoutingError> {
        let matched = self.define_route(target)?;
        self.run_handler(&matched, ctx)
    }
}
