//! Error kinds raised while building, dispatching and reversing routes.

use thiserror::Error;

use crate::verb::Verb;

/// Configuration errors raised while the route table is being built.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("alias \"{alias}\" is already in use for {verb} on domain \"{domain}\"")]
    DuplicateAlias {
        alias: String,
        verb: Verb,
        domain: String,
    },

    #[error("route \"{route}\" compiles to an invalid pattern")]
    InvalidPattern {
        route: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// A named handler that does not resolve against the controller registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("controller \"{controller}\" does not exist (route \"{route}\")")]
    ControllerNotFound { controller: String, route: String },

    #[error("method \"{method}\" does not exist in the controller \"{controller}\" (route \"{route}\")")]
    MethodNotFound {
        controller: String,
        method: String,
        route: String,
    },
}

/// Dispatch-time failures.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Nothing matched in any of the four precedence tiers.
    #[error("no route matches {method} {host} /{path}")]
    NoRoute {
        method: String,
        host: String,
        path: String,
    },

    #[error("handler {handler} for route \"{route}\" failed")]
    HandlerFailed {
        handler: String,
        route: String,
        #[source]
        source: anyhow::Error,
    },
}

impl RoutingError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RoutingError::NoRoute { .. })
    }
}

/// Hard failures while filling a route template. A missing key is not an
/// error: lookups resolve to an empty string instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReverseRouteError {
    #[error("too few arguments for route \"{route}\": expected {expected}, got {given}")]
    TooFewArguments {
        route: String,
        expected: usize,
        given: usize,
    },

    #[error("parameter {index} (\"{value}\") does not match expected type \"{pattern}\" in route \"{route}\"")]
    ParameterMismatch {
        route: String,
        index: usize,
        value: String,
        pattern: String,
    },

    #[error("group \"{pattern}\" of route \"{route}\" is not a valid pattern")]
    InvalidGroup { route: String, pattern: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown HTTP verb \"{0}\"")]
pub struct UnknownVerb(pub String);
