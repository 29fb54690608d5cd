//! # Oriole Router
//!
//! Verb- and domain-aware regex routing with reverse routing:
//! - Declarative registration (`get`, `post`, `match_verbs`, `add`) with
//!   nested groups that prefix paths and pass down namespace/domain options
//! - Placeholder tags (`:any`, `:segment`, `:alphanum`, `:num`, `:alpha`,
//!   `:hash`) compiled to anchored regular expressions
//! - Four-tier dispatch precedence: exact verb + host, exact verb + any host,
//!   any verb + host, any verb + any host
//! - Handlers resolved against a typed controller registry when the table is
//!   built, so unknown handlers fail at startup
//! - URL generation from route literals or aliases, validating each
//!   parameter against the group it fills
//!
//! ## Example
//!
//! ```
//! use oriole_router::{
//!     Controllers, RequestTarget, ReverseKind, ReverseOptions, RouteOptions, Router, Routes,
//! };
//!
//! let mut routes: Routes<()> = Routes::new();
//! routes
//!     .get(
//!         "templates/edit/(:num)",
//!         "TemplatesController::edit/$0",
//!         RouteOptions::named("edit_template"),
//!     )
//!     .unwrap();
//!
//! let mut controllers = Controllers::new();
//! controllers
//!     .controller("TemplatesController")
//!     .action("edit", |_ctx, args| Ok(args[0].clone()));
//!
//! let table = routes.build(&controllers).unwrap();
//! let router = Router::new(&table);
//!
//! let body = router
//!     .dispatch(&RequestTarget::new("GET", "localhost", "/templates/edit/7"), &())
//!     .unwrap();
//! assert_eq!(body.as_deref(), Some("7"));
//!
//! let url = table
//!     .reverse_route(ReverseKind::ByAlias, "edit_template", &[&7], &ReverseOptions::new())
//!     .unwrap();
//! assert_eq!(url, "/templates/edit/7");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod handler;
pub mod path;
mod placeholder;
mod reverse;
mod router;
mod routes;
pub mod sanitize;
mod table;
mod verb;

pub use error::{HandlerError, ReverseRouteError, RouteError, RoutingError, UnknownVerb};
pub use handler::{
    ActionFn, ArgToken, Controller, Controllers, Handler, HandlerName, HandlerRef, HandlerResult,
    InlineFn, Target,
};
pub use placeholder::{compile_placeholders, PLACEHOLDERS};
pub use reverse::{fill_template, ReverseIndex, ReverseKind, ReverseOptions};
pub use router::{MatchResult, RequestTarget, Router};
pub use routes::{GroupOptions, PendingRoute, RouteOptions, Routes};
pub use table::{RouteEntry, RouteTable};
pub use verb::Verb;
