// File: src/app.rs
// Purpose: Application bootstrap and request handling

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response as AxumResponse};
use oriole_router::{
    Controllers, HandlerError, RouteError, Router, Routes, RoutingError,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::admin;
use crate::config::{AppConfig, Config};
use crate::context::{AppRoutes, RequestContext};
use crate::request::Request;
use crate::response::Response;

/// A source of route registrations.
///
/// The framework's admin routes are one implementation; applications add
/// their own through [`OrioleBuilder::with_routes`].
pub trait RoutesConfig {
    fn set_routes(
        &self,
        routes: &mut Routes<RequestContext>,
        app: &AppConfig,
    ) -> Result<(), RouteError>;
}

/// Everything that can stop the framework from producing a response.
#[derive(Debug, Error)]
pub enum OrioleError {
    #[error("route configuration failed")]
    Route(#[from] RouteError),

    #[error("route handler resolution failed")]
    Handler(#[from] HandlerError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

impl OrioleError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrioleError::Routing(err) if err.is_not_found())
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for OrioleError {
    fn into_response(self) -> AxumResponse {
        let status = self.status_code();
        let title = status.canonical_reason().unwrap_or("Error");

        let markup = maud::html! {
            (maud::DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (status.as_u16()) " " (title) }
                }
                body {
                    h1 { (status.as_u16()) " " (title) }
                    @if self.is_not_found() {
                        p { (self.to_string()) }
                    }
                }
            }
        };

        let mut response = Response::html(markup.into_string());
        response.set_status(status);
        response.into_response()
    }
}

/// Collects route configs and controllers, then freezes them into an
/// [`Oriole`] application.
pub struct OrioleBuilder {
    config: Config,
    routes: Vec<Box<dyn RoutesConfig>>,
    controllers: Controllers<RequestContext>,
}

impl OrioleBuilder {
    fn new(config: Config) -> Self {
        let mut controllers = Controllers::new();
        admin::register_controllers(&mut controllers);

        Self {
            config,
            routes: vec![Box::new(admin::AdminRoutes)],
            controllers,
        }
    }

    /// Adds a route config. Configs run in the order they were added, after
    /// the admin routes.
    pub fn with_routes(mut self, routes: impl RoutesConfig + 'static) -> Self {
        self.routes.push(Box::new(routes));
        self
    }

    /// Registers application controllers next to the admin ones.
    pub fn with_controllers<F>(mut self, register: F) -> Self
    where
        F: FnOnce(&mut Controllers<RequestContext>),
    {
        register(&mut self.controllers);
        self
    }

    /// Runs every route config and resolves every named handler.
    pub fn build(self) -> Result<Oriole, OrioleError> {
        let mut routes = Routes::new();
        for config in &self.routes {
            config.set_routes(&mut routes, &self.config.app)?;
        }

        let table = routes.build(&self.controllers)?;
        info!(
            routes = table.len(),
            controllers = self.controllers.len(),
            "routes loaded"
        );
        for (verb, domain, entry) in table.entries() {
            debug!(%verb, domain, route = entry.route(), handler = %entry.handler().describe(), "route");
        }

        Ok(Oriole {
            config: Arc::new(self.config),
            routes: Arc::new(table),
        })
    }
}

/// A built application: configuration plus a frozen route table.
#[derive(Debug, Clone)]
pub struct Oriole {
    config: Arc<Config>,
    routes: Arc<AppRoutes>,
}

impl Oriole {
    pub fn builder(config: Config) -> OrioleBuilder {
        OrioleBuilder::new(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn routes(&self) -> &AppRoutes {
        &self.routes
    }

    /// Dispatches `request` and returns the response the handler produced.
    ///
    /// A body returned by the handler replaces the response body unless the
    /// handler turned the response into a redirect.
    pub fn handle(&self, request: Request) -> Result<Response, OrioleError> {
        let target = request.target();
        let ctx = RequestContext::new(request, Arc::clone(&self.config), Arc::clone(&self.routes));

        let body = Router::new(&self.routes).dispatch(&target, &ctx)?;

        let mut response = ctx.into_response();
        if let Some(body) = body {
            if !response.is_redirect() {
                response.set_body(body);
            }
        }
        Ok(response)
    }
}
