//! Route registration.
//!
//! [`Routes`] collects registrations into verb → domain → ordered buckets and
//! records the reverse index as it goes. Once every registration has run,
//! [`Routes::build`] resolves named handlers against a [`Controllers`]
//! registry and freezes the result into a [`RouteTable`].

use std::collections::HashMap;

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::error::{HandlerError, RouteError};
use crate::handler::{Controllers, Handler, HandlerRef, Target};
use crate::path::is_slash_or_space;
use crate::placeholder::compile_placeholders;
use crate::reverse::ReverseIndex;
use crate::sanitize::{escape_html, strip_tags};
use crate::table::{RouteEntry, RouteTable};
use crate::verb::Verb;

/// Per-route options: alias, controller namespace and domain allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    pub alias: Option<String>,
    pub namespace: Option<String>,
    pub domains: Option<Vec<String>>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for options carrying only an alias.
    pub fn named(alias: impl Into<String>) -> Self {
        Self::new().with_alias(alias)
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains
            .get_or_insert_with(Vec::new)
            .push(domain.into());
        self
    }

    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }
}

/// Options a group passes down to everything registered inside it. Unset
/// fields inherit from the enclosing group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOptions {
    pub namespace: Option<String>,
    pub domains: Option<Vec<String>>,
}

impl GroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains
            .get_or_insert_with(Vec::new)
            .push(domain.into());
        self
    }

    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }
}

/// A registration waiting for its handler to be resolved.
pub struct PendingRoute<C> {
    pub route: String,
    pub compiled: String,
    pub handler: HandlerRef<C>,
    pub alias: Option<String>,
    regex: Regex,
}

impl<C> std::fmt::Debug for PendingRoute<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRoute")
            .field("route", &self.route)
            .field("compiled", &self.compiled)
            .field("handler", &self.handler)
            .field("alias", &self.alias)
            .finish()
    }
}

type Bucket<C> = IndexMap<String, PendingRoute<C>>;

/// Route registration DSL.
///
/// # Examples
///
/// ```
/// use oriole_router::{Controllers, GroupOptions, RouteOptions, Routes, Verb};
///
/// let mut routes: Routes<()> = Routes::new();
/// routes
///     .group_with("admin", GroupOptions::new().with_namespace("App"), |routes| {
///         routes.get("", "Home::index", RouteOptions::named("admin_home"))?;
///         routes.group("templates", |routes| {
///             routes.match_verbs(&[Verb::Get, Verb::Post], "edit/(:num)", "Templates::edit/$0", None)?;
///             Ok(())
///         })?;
///         Ok(())
///     })
///     .unwrap();
///
/// let mut controllers: Controllers<()> = Controllers::new();
/// controllers.controller("App\\Home").action("index", |_, _| Ok(None));
/// controllers.controller("App\\Templates").action("edit", |_, args| Ok(args[0].clone()));
///
/// let table = routes.build(&controllers).unwrap();
/// assert_eq!(table.len(), 3);
/// ```
pub struct Routes<C> {
    routes: HashMap<Verb, HashMap<String, Bucket<C>>>,
    reverse: ReverseIndex,
    group: String,
    group_options: Option<GroupOptions>,
}

impl<C> Routes<C> {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            reverse: ReverseIndex::default(),
            group: String::new(),
            group_options: None,
        }
    }

    /// Current group prefix, e.g. `/admin/templates`. Empty at top level.
    pub fn current_group(&self) -> &str {
        &self.group
    }

    pub fn current_group_options(&self) -> Option<&GroupOptions> {
        self.group_options.as_ref()
    }

    /// Registers everything `callback` adds under `prefix`.
    pub fn group<F>(&mut self, prefix: &str, callback: F) -> Result<&mut Self, RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        self.group_with(prefix, None, callback)
    }

    /// Like [`Routes::group`], additionally overriding the namespace and/or
    /// domains for the group.
    ///
    /// The previous prefix and options are restored when `callback` returns,
    /// whether it succeeded, failed, or panicked.
    pub fn group_with<F>(
        &mut self,
        prefix: &str,
        options: impl Into<Option<GroupOptions>>,
        callback: F,
    ) -> Result<&mut Self, RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        let old_group = self.group.clone();
        let old_options = self.group_options.clone();

        let name = prefix.to_lowercase();
        let name = name.trim_matches(is_slash_or_space);
        if !name.is_empty() {
            self.group = format!("{}/{}", old_group, name);
        }

        if let Some(options) = options.into() {
            let inherited = old_options.clone().unwrap_or_default();
            self.group_options = Some(GroupOptions {
                namespace: options.namespace.or(inherited.namespace),
                domains: options.domains.or(inherited.domains),
            });
        }

        let result = {
            let mut scope = scopeguard::guard(&mut *self, move |routes| {
                routes.group = old_group;
                routes.group_options = old_options;
            });
            callback(&mut **scope)
        };

        result.map(|()| self)
    }

    /// Registers a route for GET.
    pub fn get(
        &mut self,
        from: &str,
        to: impl Into<Target<C>>,
        options: impl Into<Option<RouteOptions>>,
    ) -> Result<&mut Self, RouteError> {
        self.create(Verb::Get, from, to, options)
    }

    /// Registers a route for POST.
    pub fn post(
        &mut self,
        from: &str,
        to: impl Into<Target<C>>,
        options: impl Into<Option<RouteOptions>>,
    ) -> Result<&mut Self, RouteError> {
        self.create(Verb::Post, from, to, options)
    }

    /// Registers the same route for several verbs.
    pub fn match_verbs(
        &mut self,
        verbs: &[Verb],
        from: &str,
        to: impl Into<Target<C>>,
        options: impl Into<Option<RouteOptions>>,
    ) -> Result<&mut Self, RouteError> {
        let to = to.into();
        let options = options.into();
        for verb in verbs {
            self.create(*verb, from, to.clone(), options.clone())?;
        }
        Ok(self)
    }

    /// Registers a route in the wildcard-verb bucket.
    pub fn add(
        &mut self,
        from: &str,
        to: impl Into<Target<C>>,
        options: impl Into<Option<RouteOptions>>,
    ) -> Result<&mut Self, RouteError> {
        self.create(Verb::Any, from, to, options)
    }

    /// Registers one route for one verb.
    ///
    /// The route literal is the current group prefix joined with `from`,
    /// sanitised, trimmed of slashes and lowercased. Registering a literal
    /// that already exists in a bucket replaces that entry in place.
    pub fn create(
        &mut self,
        verb: Verb,
        from: &str,
        to: impl Into<Target<C>>,
        options: impl Into<Option<RouteOptions>>,
    ) -> Result<&mut Self, RouteError> {
        let options = options.into().unwrap_or_default();
        let route = self.route_literal(from);
        let compiled = compile_placeholders(&route);
        let regex = Regex::new(&format!("^(?:{})$", compiled)).map_err(|source| {
            RouteError::InvalidPattern {
                route: route.clone(),
                source,
            }
        })?;

        let alias = options.alias.filter(|alias| !alias.is_empty());
        let inherited = self.group_options.clone().unwrap_or_default();
        let namespace = options.namespace.or(inherited.namespace);
        let domains = resolve_domains(options.domains.or(inherited.domains));

        if let Some(alias) = &alias {
            if let Some(domain) = domains
                .iter()
                .find(|domain| self.reverse.contains_alias(verb, domain, alias))
            {
                return Err(RouteError::DuplicateAlias {
                    alias: alias.clone(),
                    verb,
                    domain: domain.clone(),
                });
            }
        }

        let handler = HandlerRef::from_target(to.into(), namespace.as_deref());

        for domain in &domains {
            debug!(%verb, domain = %domain, route = %route, pattern = %compiled, "registered route");

            self.routes
                .entry(verb)
                .or_default()
                .entry(domain.clone())
                .or_default()
                .insert(
                    route.clone(),
                    PendingRoute {
                        route: route.clone(),
                        compiled: compiled.clone(),
                        handler: handler.clone(),
                        alias: alias.clone(),
                        regex: regex.clone(),
                    },
                );

            self.reverse.insert_route(verb, domain, &route, &compiled);
            if let Some(alias) = &alias {
                self.reverse.insert_alias(verb, domain, alias, &compiled);
            }
        }

        Ok(self)
    }

    fn route_literal(&self, from: &str) -> String {
        let from = if from == "/" {
            from
        } else {
            from.trim_matches(is_slash_or_space)
        };

        let joined = format!("{}/{}", self.group, from);
        let sanitized = escape_html(&strip_tags(&joined));
        let trimmed = sanitized.trim_matches(is_slash_or_space).to_lowercase();

        if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed
        }
    }

    /// Pending routes of one bucket, in match order.
    pub fn bucket(&self, verb: Verb, domain: &str) -> Option<impl Iterator<Item = &PendingRoute<C>>> {
        self.routes
            .get(&verb)
            .and_then(|domains| domains.get(domain))
            .map(|bucket| bucket.values())
    }

    pub fn reverse_index(&self) -> &ReverseIndex {
        &self.reverse
    }

    /// Resolves every named handler and freezes the table.
    pub fn build(self, controllers: &Controllers<C>) -> Result<RouteTable<C>, HandlerError> {
        let mut routes = HashMap::with_capacity(self.routes.len());

        for (verb, domains) in self.routes {
            let mut resolved_domains = HashMap::with_capacity(domains.len());

            for (domain, bucket) in domains {
                let entries = bucket
                    .into_values()
                    .map(|pending| -> Result<RouteEntry<C>, HandlerError> {
                        let (handler, args) = match pending.handler {
                            HandlerRef::Named { name, args } => {
                                let action = controllers.resolve(&name, &pending.route)?;
                                (Handler::Action { name, action }, args)
                            }
                            HandlerRef::Inline(handler) => (Handler::Inline(handler), Vec::new()),
                        };

                        Ok(RouteEntry::new(
                            pending.route,
                            pending.compiled,
                            pending.regex,
                            handler,
                            args,
                            pending.alias,
                        ))
                    })
                    .collect::<Result<Vec<_>, HandlerError>>()?;

                resolved_domains.insert(domain, entries);
            }

            routes.insert(verb, resolved_domains);
        }

        Ok(RouteTable::new(routes, self.reverse))
    }
}

impl<C> Default for Routes<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_domains(domains: Option<Vec<String>>) -> Vec<String> {
    let domains: Vec<String> = domains
        .unwrap_or_default()
        .into_iter()
        .map(|domain| domain.trim().to_lowercase())
        .filter(|domain| !domain.is_empty())
        .collect();

    if domains.is_empty() {
        vec!["*".to_string()]
    } else {
        domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn literals(routes: &Routes<()>, verb: Verb, domain: &str) -> Vec<String> {
        routes
            .bucket(verb, domain)
            .map(|bucket| bucket.map(|pending| pending.route.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_route_literal_normalisation() {
        let mut routes: Routes<()> = Routes::new();
        routes.get("/Templates/Edit/(:NUM)/", "T::edit/$0", None).unwrap();
        routes.get("/", "Home::index", None).unwrap();
        routes.get("", "Home::index", None).unwrap();

        assert_eq!(
            literals(&routes, Verb::Get, "*"),
            vec!["templates/edit/(:num)".to_string(), "/".to_string()]
        );

        let pending = routes.bucket(Verb::Get, "*").unwrap().next().unwrap();
        assert_eq!(pending.compiled, "templates/edit/([0-9]+)");
    }

    #[test]
    fn test_group_prefix_and_restore() {
        let mut routes: Routes<()> = Routes::new();
        routes
            .group(" /Admin/ ", |routes| {
                routes.get("", "Home::index", None)?;
                routes.group("templates", |routes| {
                    assert_eq!(routes.current_group(), "/admin/templates");
                    routes.get("add", "T::add", None)?;
                    Ok(())
                })?;
                assert_eq!(routes.current_group(), "/admin");
                Ok(())
            })
            .unwrap();
        routes.get("about", "Page::about", None).unwrap();

        assert_eq!(routes.current_group(), "");
        assert_eq!(
            literals(&routes, Verb::Get, "*"),
            vec!["admin", "admin/templates/add", "about"]
        );
    }

    #[test]
    fn test_group_options_inherit_and_override() {
        let mut routes: Routes<()> = Routes::new();
        routes
            .group_with(
                "admin",
                GroupOptions::new()
                    .with_namespace("App\\Admin")
                    .with_domain("Admin.Example.com"),
                |routes| {
                    routes.group_with("api", GroupOptions::new().with_namespace("App\\Api"), |routes| {
                        let options = routes.current_group_options().unwrap();
                        assert_eq!(options.namespace.as_deref(), Some("App\\Api"));
                        assert_eq!(
                            options.domains,
                            Some(vec!["Admin.Example.com".to_string()])
                        );
                        routes.get("ping", "Ping::index", None)?;
                        Ok(())
                    })?;
                    Ok(())
                },
            )
            .unwrap();

        assert!(routes.current_group_options().is_none());
        let pending = routes
            .bucket(Verb::Get, "admin.example.com")
            .unwrap()
            .next()
            .unwrap();
        match &pending.handler {
            HandlerRef::Named { name, .. } => assert_eq!(name.controller, "App\\Api\\Ping"),
            HandlerRef::Inline(_) => panic!("expected a named handler"),
        }
    }

    #[test]
    fn test_route_domains_override_group() {
        let mut routes: Routes<()> = Routes::new();
        routes
            .group_with("", GroupOptions::new().with_domain("a.test"), |routes| {
                routes.get(
                    "x",
                    "X::index",
                    RouteOptions::new().with_domains(["b.test", "c.test"]),
                )?;
                Ok(())
            })
            .unwrap();

        assert!(routes.bucket(Verb::Get, "a.test").is_none());
        assert_eq!(literals(&routes, Verb::Get, "b.test"), vec!["x"]);
        assert_eq!(literals(&routes, Verb::Get, "c.test"), vec!["x"]);
    }

    #[test]
    fn test_empty_domain_means_any() {
        let mut routes: Routes<()> = Routes::new();
        routes
            .get("x", "X::index", RouteOptions::new().with_domain(""))
            .unwrap();
        assert_eq!(literals(&routes, Verb::Get, "*"), vec!["x"]);
    }

    #[test]
    fn test_reregistering_keeps_position() {
        let mut routes: Routes<()> = Routes::new();
        routes.get("a", "A::one", None).unwrap();
        routes.get("b", "B::one", None).unwrap();
        routes.get("a", "A::two", None).unwrap();

        let handlers: Vec<String> = routes
            .bucket(Verb::Get, "*")
            .unwrap()
            .map(|pending| match &pending.handler {
                HandlerRef::Named { name, .. } => name.to_string(),
                HandlerRef::Inline(_) => "<inline>".to_string(),
            })
            .collect();
        assert_eq!(handlers, vec!["A::two", "B::one"]);
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let mut routes: Routes<()> = Routes::new();
        let err = routes.get("broken/([0-9]+", "X::index", None).err().unwrap();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_add_uses_wildcard_verb() {
        let mut routes: Routes<()> = Routes::new();
        routes.add("anything", "X::index", None).unwrap();
        assert_eq!(literals(&routes, Verb::Any, "*"), vec!["anything"]);
        assert!(routes.bucket(Verb::Get, "*").is_none());
    }
}
