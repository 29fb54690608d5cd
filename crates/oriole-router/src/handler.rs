//! Handler references, argument tokens and the controller registry.
//!
//! Routes name their handler either with a `Controller::method/$0/literal`
//! string or with an inline closure. Named handlers are looked up in a
//! [`Controllers`] registry when the route table is built, so a typo in a
//! route target fails the build instead of a request.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::HandlerError;

/// What every handler returns: a rendered body, or `None` when the handler
/// already wrote its response through the context.
pub type HandlerResult = anyhow::Result<Option<String>>;

/// Inline handler: receives the captured groups positionally.
pub type InlineFn<C> = Arc<dyn Fn(&C, &[String]) -> HandlerResult + Send + Sync>;

/// Controller action: receives the route's resolved argument tokens.
pub type ActionFn<C> = Arc<dyn Fn(&C, &[Option<String>]) -> HandlerResult + Send + Sync>;

static CAPTURE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$(\d*)$").unwrap());

/// One argument declared after the method in a handler string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgToken {
    Literal(String),
    /// `$n`: the n-th captured group, 0-indexed. A bare `$` is `$0`.
    Capture(usize),
}

impl ArgToken {
    pub fn parse(raw: &str) -> Self {
        CAPTURE_TOKEN
            .captures(raw)
            .and_then(|caps| {
                let digits = caps.get(1).map_or("", |m| m.as_str());
                if digits.is_empty() {
                    Some(0)
                } else {
                    digits.parse().ok()
                }
            })
            .map(ArgToken::Capture)
            .unwrap_or_else(|| ArgToken::Literal(raw.to_string()))
    }

    /// Out-of-range captures resolve to `None`, never to an error.
    pub fn resolve(&self, params: &[String]) -> Option<String> {
        match self {
            ArgToken::Literal(value) => Some(value.clone()),
            ArgToken::Capture(index) => params.get(*index).cloned(),
        }
    }
}

/// `Controller::method` split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerName {
    pub controller: String,
    pub method: String,
}

impl HandlerName {
    /// A target without `::` yields an empty method, which fails when the
    /// handler is resolved.
    pub fn parse(target: &str) -> Self {
        let (controller, method) = target.split_once("::").unwrap_or((target, ""));
        Self {
            controller: normalize_controller(controller),
            method: method.trim().to_string(),
        }
    }
}

impl fmt::Display for HandlerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller, self.method)
    }
}

fn normalize_controller(name: &str) -> String {
    name.trim().trim_matches('\\').to_string()
}

/// The `to` side of a route registration.
pub enum Target<C> {
    Named(String),
    Inline(InlineFn<C>),
}

impl<C> Target<C> {
    pub fn inline<F>(handler: F) -> Self
    where
        F: Fn(&C, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        Target::Inline(Arc::new(handler))
    }
}

impl<C> Clone for Target<C> {
    fn clone(&self) -> Self {
        match self {
            Target::Named(target) => Target::Named(target.clone()),
            Target::Inline(handler) => Target::Inline(Arc::clone(handler)),
        }
    }
}

impl<C> From<&str> for Target<C> {
    fn from(target: &str) -> Self {
        Target::Named(target.to_string())
    }
}

impl<C> From<String> for Target<C> {
    fn from(target: String) -> Self {
        Target::Named(target)
    }
}

/// A handler as registered, before it is resolved against [`Controllers`].
pub enum HandlerRef<C> {
    Named {
        name: HandlerName,
        args: Vec<ArgToken>,
    },
    Inline(InlineFn<C>),
}

impl<C> HandlerRef<C> {
    /// Parses `Controller::method/arg/...`, prefixing the controller with
    /// `namespace` when one is set.
    pub fn parse(target: &str, namespace: Option<&str>) -> Self {
        let target = target.trim_matches(' ');
        let qualified = match namespace.filter(|ns| !ns.is_empty()) {
            Some(ns) => format!(
                "\\{}\\{}",
                ns.trim_matches(|c| c == '\\' || c == ' '),
                target.trim_matches('\\')
            ),
            None => target.to_string(),
        };

        let mut parts = qualified.split('/');
        let name = HandlerName::parse(parts.next().unwrap_or_default());
        let args = parts.map(ArgToken::parse).collect();

        HandlerRef::Named { name, args }
    }

    pub fn from_target(target: Target<C>, namespace: Option<&str>) -> Self {
        match target {
            Target::Named(target) => HandlerRef::parse(&target, namespace),
            Target::Inline(handler) => HandlerRef::Inline(handler),
        }
    }
}

impl<C> Clone for HandlerRef<C> {
    fn clone(&self) -> Self {
        match self {
            HandlerRef::Named { name, args } => HandlerRef::Named {
                name: name.clone(),
                args: args.clone(),
            },
            HandlerRef::Inline(handler) => HandlerRef::Inline(Arc::clone(handler)),
        }
    }
}

impl<C> fmt::Debug for HandlerRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Named { name, args } => f
                .debug_struct("Named")
                .field("name", name)
                .field("args", args)
                .finish(),
            HandlerRef::Inline(_) => f.write_str("Inline(<closure>)"),
        }
    }
}

/// A handler after resolution: ready to be invoked.
pub enum Handler<C> {
    Action { name: HandlerName, action: ActionFn<C> },
    Inline(InlineFn<C>),
}

impl<C> Handler<C> {
    /// `Controller::method` for actions, `<inline>` for closures.
    pub fn describe(&self) -> String {
        match self {
            Handler::Action { name, .. } => name.to_string(),
            Handler::Inline(_) => "<inline>".to_string(),
        }
    }

    pub fn name(&self) -> Option<&HandlerName> {
        match self {
            Handler::Action { name, .. } => Some(name),
            Handler::Inline(_) => None,
        }
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Action { name, .. } => f.debug_tuple("Action").field(name).finish(),
            Handler::Inline(_) => f.write_str("Inline(<closure>)"),
        }
    }
}

/// A controller: a named set of actions.
pub struct Controller<C> {
    name: String,
    actions: HashMap<String, ActionFn<C>>,
}

impl<C> Controller<C> {
    fn new(name: String) -> Self {
        Self {
            name,
            actions: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers (or replaces) an action.
    pub fn action<F>(&mut self, method: impl Into<String>, action: F) -> &mut Self
    where
        F: Fn(&C, &[Option<String>]) -> HandlerResult + Send + Sync + 'static,
    {
        self.actions.insert(method.into(), Arc::new(action));
        self
    }

    pub fn has_action(&self, method: &str) -> bool {
        self.actions.contains_key(method)
    }
}

/// Registry of controllers, keyed by their fully qualified name
/// (`Oriole\Controllers\TemplatesController`). Leading and trailing
/// backslashes are ignored.
pub struct Controllers<C> {
    controllers: HashMap<String, Controller<C>>,
}

impl<C> Controllers<C> {
    pub fn new() -> Self {
        Self {
            controllers: HashMap::new(),
        }
    }

    /// Returns the controller registered under `name`, creating it if needed.
    ///
    /// ```
    /// use oriole_router::Controllers;
    ///
    /// let mut controllers: Controllers<()> = Controllers::new();
    /// controllers
    ///     .controller("App\\Pages")
    ///     .action("about", |_ctx, _args| Ok(Some("about".to_string())));
    ///
    /// assert!(controllers.get("\\App\\Pages").is_some());
    /// ```
    pub fn controller(&mut self, name: impl AsRef<str>) -> &mut Controller<C> {
        let name = normalize_controller(name.as_ref());
        self.controllers
            .entry(name.clone())
            .or_insert_with(|| Controller::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&Controller<C>> {
        self.controllers.get(&normalize_controller(name))
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Resolves a named handler, telling a missing controller apart from a
    /// missing method.
    pub fn resolve(&self, name: &HandlerName, route: &str) -> Result<ActionFn<C>, HandlerError> {
        let controller = self
            .get(&name.controller)
            .ok_or_else(|| HandlerError::ControllerNotFound {
                controller: name.controller.clone(),
                route: route.to_string(),
            })?;

        controller
            .actions
            .get(&name.method)
            .cloned()
            .ok_or_else(|| HandlerError::MethodNotFound {
                controller: name.controller.clone(),
                method: name.method.clone(),
                route: route.to_string(),
            })
    }
}

impl<C> Default for Controllers<C> {
    fn default() -> Self {
        Self::new()
    }
}
