// File: src/context.rs
// Purpose: Per-request state handed to every route handler

use once_cell::sync::Lazy;
use oriole_router::{ReverseKind, ReverseOptions, ReverseRouteError, RouteTable};
use regex::Regex;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt::{self, Display};
use std::sync::Arc;
use tracing::warn;

use crate::config::{AppConfig, Config, CookieConfig};
use crate::request::Request;
use crate::response::Response;

/// Name of the cookie carrying a one-shot message across a redirect.
const FLASH_COOKIE: &str = "message";

static GLOB_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\*").unwrap());

/// Routes as seen by framework handlers.
pub type AppRoutes = RouteTable<RequestContext>;

/// What a handler sees: the request, the configuration, the route table
/// for link generation and the response under construction.
pub struct RequestContext {
    request: Request,
    config: Arc<Config>,
    routes: Arc<AppRoutes>,
    response: RefCell<Response>,
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("method", &self.request.method)
            .field("uri", &self.request.uri)
            .finish()
    }
}

impl RequestContext {
    pub fn new(request: Request, config: Arc<Config>, routes: Arc<AppRoutes>) -> Self {
        Self {
            request,
            config,
            routes,
            response: RefCell::new(Response::new()),
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.config.app
    }

    pub fn cookie_config(&self) -> &CookieConfig {
        &self.config.cookie
    }

    pub fn routes(&self) -> &AppRoutes {
        &self.routes
    }

    pub fn response(&self) -> Ref<'_, Response> {
        self.response.borrow()
    }

    pub fn response_mut(&self) -> RefMut<'_, Response> {
        self.response.borrow_mut()
    }

    pub fn into_response(self) -> Response {
        self.response.into_inner()
    }

    /// Lowercased request host, used as the default reverse-routing domain.
    fn host(&self) -> String {
        self.request.host().to_lowercase()
    }

    /// Reverse routing with hard errors. Without options the lookup is for
    /// GET on the current host.
    pub fn reverse_route(
        &self,
        kind: ReverseKind,
        key: &str,
        params: &[&dyn Display],
        options: Option<ReverseOptions>,
    ) -> Result<String, ReverseRouteError> {
        let options = options.unwrap_or_else(|| ReverseOptions::new().with_domain(self.host()));
        self.routes.reverse_route(kind, key, params, &options)
    }

    /// URL of the GET route registered under `alias`, or an empty string
    /// when it cannot be built.
    pub fn route_by_alias(&self, alias: &str, params: &[&dyn Display]) -> String {
        self.soft_reverse(ReverseKind::ByAlias, alias, params)
    }

    /// URL of the GET route registered under the literal `route`, or an
    /// empty string when it cannot be built.
    pub fn route_by_route(&self, route: &str, params: &[&dyn Display]) -> String {
        self.soft_reverse(ReverseKind::ByRoute, route, params)
    }

    fn soft_reverse(&self, kind: ReverseKind, key: &str, params: &[&dyn Display]) -> String {
        self.reverse_route(kind, key, params, None)
            .unwrap_or_else(|err| {
                warn!(?kind, key, error = %err, "could not build link");
                String::new()
            })
    }

    /// Whether the current path matches `pattern`, where `*` matches any run
    /// of characters. Leading slashes on both sides are ignored.
    pub fn url_is(&self, pattern: &str) -> bool {
        let path = self.request.uri.split(['?', '#']).next().unwrap_or_default();
        let path = oriole_router::path::url_decode(path);

        glob_matches(pattern.trim_start_matches('/'), path.trim_start_matches('/'))
    }

    /// Queues a message for the next page the user lands on.
    pub fn flash(&self, message: &str) {
        self.response_mut()
            .set_cookie(FLASH_COOKIE, message, &self.config.cookie);
    }

    /// Reads the pending flash message and clears it on the client.
    pub fn take_flash(&self) -> Option<String> {
        let message = self
            .request
            .cookie(FLASH_COOKIE, &self.config.cookie)
            .filter(|message| !message.is_empty())
            .map(str::to_string)?;

        self.response_mut()
            .delete_cookie(FLASH_COOKIE, &self.config.cookie);
        Some(message)
    }

    /// Sends the client to the GET route registered under `alias`.
    pub fn redirect_to_alias(&self, alias: &str, params: &[&dyn Display]) {
        let location = self.route_by_alias(alias, params);
        let location = if location.is_empty() { "/".to_string() } else { location };
        self.response_mut().redirect(&location);
    }
}

fn glob_matches(pattern: &str, path: &str) -> bool {
    let escaped = regex::escape(pattern);
    let translated = GLOB_STAR.replace_all(&escaped, ".*");

    Regex::new(&format!("^{}$", translated))
        .map(|re| re.is_match(path))
        .unwrap_or(false)
}
