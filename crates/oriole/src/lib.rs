// Oriole - small web framework with an admin panel
// Routing, link generation and dispatch come from oriole-router

pub mod admin;
pub mod app;
pub mod config;
pub mod context;
pub mod request;
pub mod response;

// Re-export framework types
pub use app::{Oriole, OrioleBuilder, OrioleError, RoutesConfig};
pub use config::{AppConfig, Config, CookieConfig, ServerConfig};
pub use context::{AppRoutes, RequestContext};
pub use request::{Params, Request};
pub use response::Response;

// Re-export the router and Maud for applications
pub use maud::{html as maud, Markup, PreEscaped, DOCTYPE};
pub use oriole_router as router;
pub use oriole_router::{
    Controllers, GroupOptions, HandlerResult, ReverseKind, ReverseOptions, RouteError,
    RouteOptions, Routes, Target, Verb,
};

// Re-export commonly used types from dependencies
pub use axum;
pub use axum::http::StatusCode;
