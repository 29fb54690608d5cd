//! Integration tests for registration, dispatch and reverse routing.

use std::panic::{catch_unwind, AssertUnwindSafe};

use oriole_router::{
    Controllers, GroupOptions, HandlerError, RequestTarget, ReverseKind, ReverseOptions,
    ReverseRouteError, RouteError, RouteOptions, Router, RouteTable, Routes, RoutingError, Target,
    Verb,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ============================================================================
// Fixtures
// ============================================================================

/// Handlers echo `controller::method(args)` so tests can see what ran.
fn echo_controllers() -> Controllers<()> {
    let mut controllers = Controllers::new();
    controllers
        .controller("TemplatesController")
        .action("list", |_, args| Ok(Some(format!("TemplatesController::list{:?}", args))))
        .action("edit", |_, args| Ok(Some(format!("TemplatesController::edit{:?}", args))));
    controllers
        .controller("HomeController")
        .action("index", |_, args| Ok(Some(format!("HomeController::index{:?}", args))));
    controllers
        .controller("AdminHomeController")
        .action("index", |_, args| Ok(Some(format!("AdminHomeController::index{:?}", args))));
    controllers
}

fn admin_table() -> RouteTable<()> {
    let mut routes: Routes<()> = Routes::new();
    routes
        .group("admin", |routes| {
            routes.group("templates", |routes| {
                routes.get("", "TemplatesController::list", RouteOptions::named("templates"))?;
                routes.get(
                    "edit/(:num)",
                    "TemplatesController::edit/$0",
                    RouteOptions::named("edit_template"),
                )?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
    routes.get("templates/edit/(:num)", "TemplatesController::edit/$0", None).unwrap();
    routes.get("/", "HomeController::index", RouteOptions::named("home")).unwrap();
    routes
        .get(
            "/",
            "AdminHomeController::index",
            RouteOptions::named("home").with_domain("admin.example.com"),
        )
        .unwrap();

    routes.build(&echo_controllers()).unwrap()
}

fn get(path: &str) -> RequestTarget {
    RequestTarget::new("GET", "localhost", path)
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_end_to_end_edit_template() {
    let table = admin_table();
    let router = Router::new(&table);

    let body = router.dispatch(&get("/admin/templates/edit/7"), &()).unwrap();
    assert_eq!(body.as_deref(), Some("TemplatesController::edit[Some(\"7\")]"));

    let url = table
        .reverse_route(ReverseKind::ByAlias, "edit_template", &[&7], &ReverseOptions::new())
        .unwrap();
    assert_eq!(url, "/admin/templates/edit/7");
}

#[test]
fn test_unmatched_path_is_not_found() {
    let table = admin_table();
    let err = Router::new(&table).dispatch(&get("/nonexistent/path"), &()).unwrap_err();
    assert!(matches!(err, RoutingError::NoRoute { ref path, .. } if path == "nonexistent/path"));
}

#[rstest]
#[case("/templates/edit/42", true)]
#[case("/templates/edit/42/extra", false)]
#[case("/prefix/templates/edit/42", false)]
#[case("/templates/edit/abc", false)]
#[case("/TEMPLATES/EDIT/42", false)]
#[case("/templates/edit/42?tab=vars", true)]
fn test_patterns_are_fully_anchored(#[case] path: &str, #[case] matches: bool) {
    let table = admin_table();
    let router = Router::new(&table);
    let matched = router.define_route(&get(path));
    assert_eq!(matched.is_ok(), matches, "path {}", path);
}

#[test]
fn test_segment_captures_decoded_unicode() {
    let mut routes: Routes<()> = Routes::new();
    routes
        .get("page/(:segment)", Target::inline(|_: &(), params: &[String]| Ok(Some(params.join(",")))), None)
        .unwrap();
    let table = routes.build(&Controllers::new()).unwrap();
    let router = Router::new(&table);

    let body = router.dispatch(&get("/page/caf%C3%A9"), &()).unwrap();
    assert_eq!(body.as_deref(), Some("café"));

    let body = router.dispatch(&get("/page/日本"), &()).unwrap();
    assert_eq!(body.as_deref(), Some("日本"));
}

#[test]
fn test_exact_host_beats_wildcard_host() {
    let table = admin_table();
    let router = Router::new(&table);

    let admin = router
        .dispatch(&RequestTarget::new("GET", "Admin.Example.com", "/"), &())
        .unwrap();
    assert_eq!(admin.as_deref(), Some("AdminHomeController::index[]"));

    let public = router
        .dispatch(&RequestTarget::new("GET", "www.example.com", "/"), &())
        .unwrap();
    assert_eq!(public.as_deref(), Some("HomeController::index[]"));
}

#[test]
fn test_precedence_tiers_in_order() {
    let mut routes: Routes<()> = Routes::new();
    let tag = |name: &'static str| Target::inline(move |_: &(), _: &[String]| Ok(Some(name.to_string())));
    routes.add("page", tag("any-any"), None).unwrap();
    routes.add("page", tag("any-host"), RouteOptions::new().with_domain("h.test")).unwrap();
    routes.get("page", tag("verb-any"), None).unwrap();
    routes.get("page", tag("verb-host"), RouteOptions::new().with_domain("h.test")).unwrap();
    let table = routes.build(&Controllers::new()).unwrap();
    let router = Router::new(&table);

    let run = |method: &str, host: &str| {
        router
            .dispatch(&RequestTarget::new(method, host, "/page"), &())
            .unwrap()
            .unwrap()
    };

    assert_eq!(run("GET", "h.test"), "verb-host");
    assert_eq!(run("GET", "other.test"), "verb-any");
    assert_eq!(run("POST", "h.test"), "any-host");
    assert_eq!(run("POST", "other.test"), "any-any");
}

#[test]
fn test_first_registered_match_wins_within_bucket() {
    let mut routes: Routes<()> = Routes::new();
    routes
        .get("items/(:any)", Target::inline(|_: &(), _: &[String]| Ok(Some("any".into()))), None)
        .unwrap();
    routes
        .get("items/(:num)", Target::inline(|_: &(), _: &[String]| Ok(Some("num".into()))), None)
        .unwrap();
    let table = routes.build(&Controllers::new()).unwrap();

    let body = Router::new(&table).dispatch(&get("/items/5"), &()).unwrap();
    assert_eq!(body.as_deref(), Some("any"));
}

#[test]
fn test_inline_handler_receives_captures() {
    let mut routes: Routes<()> = Routes::new();
    routes
        .get(
            "resources/set-order/(:num)/(:num)",
            Target::inline(|_: &(), params: &[String]| Ok(Some(params.join(",")))),
            None,
        )
        .unwrap();
    let table = routes.build(&Controllers::new()).unwrap();

    let body = Router::new(&table)
        .dispatch(&get("/resources/set-order/3/10"), &())
        .unwrap();
    assert_eq!(body.as_deref(), Some("3,10"));
}

#[test]
fn test_handler_failure_is_wrapped() {
    let mut routes: Routes<()> = Routes::new();
    routes
        .get("boom", Target::inline(|_: &(), _: &[String]| Err(anyhow::anyhow!("kaput"))), None)
        .unwrap();
    let table = routes.build(&Controllers::new()).unwrap();

    let err = Router::new(&table).dispatch(&get("/boom"), &()).unwrap_err();
    assert!(!err.is_not_found());
    assert!(matches!(err, RoutingError::HandlerFailed { ref route, .. } if route == "boom"));
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_duplicate_alias_is_rejected() {
    let mut routes: Routes<()> = Routes::new();
    routes.get("a", "A::index", RouteOptions::named("dup")).unwrap();

    let err = routes.get("b", "B::index", RouteOptions::named("dup")).err().unwrap();
    assert!(matches!(
        err,
        RouteError::DuplicateAlias { ref alias, verb: Verb::Get, ref domain } if alias == "dup" && domain == "*"
    ));

    // Same alias on another verb or domain is fine.
    routes.post("a", "A::store", RouteOptions::named("dup")).unwrap();
    routes
        .get("c", "C::index", RouteOptions::named("dup").with_domain("admin.test"))
        .unwrap();
}

#[test]
fn test_group_restored_after_error() {
    let mut routes: Routes<()> = Routes::new();
    routes.get("x", "X::index", RouteOptions::named("taken")).unwrap();

    let result = routes.group_with(
        "admin",
        GroupOptions::new().with_namespace("App"),
        |routes| {
            routes.get("y", "Y::index", RouteOptions::named("taken"))?;
            Ok(())
        },
    );
    assert!(result.is_err());
    assert_eq!(routes.current_group(), "");
    assert!(routes.current_group_options().is_none());
}

#[test]
fn test_group_restored_after_panic() {
    let mut routes: Routes<()> = Routes::new();
    routes
        .group("outer", |routes| {
            let panicked = catch_unwind(AssertUnwindSafe(|| {
                let _ = routes.group("inner", |_| panic!("boom"));
            }));
            assert!(panicked.is_err());
            assert_eq!(routes.current_group(), "/outer");
            Ok(())
        })
        .unwrap();
    assert_eq!(routes.current_group(), "");
}

#[test]
fn test_match_verbs_registers_each_verb() {
    let mut routes: Routes<()> = Routes::new();
    routes
        .match_verbs(&[Verb::Get, Verb::Post], "form", "TemplatesController::list", None)
        .unwrap();
    let table = routes.build(&echo_controllers()).unwrap();
    let router = Router::new(&table);

    assert!(router.define_route(&RequestTarget::new("GET", "h", "/form")).is_ok());
    assert!(router.define_route(&RequestTarget::new("POST", "h", "/form")).is_ok());
    assert!(router.define_route(&RequestTarget::new("PUT", "h", "/form")).is_err());
}

// ============================================================================
// Handler resolution
// ============================================================================

#[test]
fn test_missing_controller_fails_build() {
    let mut routes: Routes<()> = Routes::new();
    routes.get("x", "MissingController::index", None).unwrap();

    let err = routes.build(&echo_controllers()).unwrap_err();
    assert_eq!(
        err,
        HandlerError::ControllerNotFound {
            controller: "MissingController".to_string(),
            route: "x".to_string(),
        }
    );
}

#[test]
fn test_missing_method_fails_build() {
    let mut routes: Routes<()> = Routes::new();
    routes.get("x", "TemplatesController::destroy", None).unwrap();

    let err = routes.build(&echo_controllers()).unwrap_err();
    assert!(matches!(err, HandlerError::MethodNotFound { ref method, .. } if method == "destroy"));
}

#[test]
fn test_literal_arguments_pass_through() {
    let mut routes: Routes<()> = Routes::new();
    routes
        .get("templates/(:num)/(:any)", "TemplatesController::edit/$1/fixed/$0", None)
        .unwrap();
    let table = routes.build(&echo_controllers()).unwrap();

    let body = Router::new(&table).dispatch(&get("/templates/9/main"), &()).unwrap();
    assert_eq!(
        body.as_deref(),
        Some("TemplatesController::edit[Some(\"main\"), Some(\"fixed\"), Some(\"9\")]")
    );
}

// ============================================================================
// Reverse routing
// ============================================================================

#[test]
fn test_reverse_by_route_literal() {
    let table = admin_table();
    let url = table
        .reverse_route(ReverseKind::ByRoute, "templates/edit/(:num)", &[&42], &ReverseOptions::new())
        .unwrap();
    assert_eq!(url, "/templates/edit/42");
}

#[test]
fn test_reverse_rejects_mismatched_parameter() {
    let table = admin_table();
    let err = table
        .reverse_route(ReverseKind::ByRoute, "templates/edit/(:num)", &[&"abc"], &ReverseOptions::new())
        .unwrap_err();
    assert!(matches!(err, ReverseRouteError::ParameterMismatch { index: 0, .. }));
}

#[test]
fn test_reverse_too_few_arguments() {
    let table = admin_table();
    let err = table
        .reverse_route(ReverseKind::ByAlias, "edit_template", &[], &ReverseOptions::new())
        .unwrap_err();
    assert!(matches!(err, ReverseRouteError::TooFewArguments { expected: 1, given: 0, .. }));
}

#[test]
fn test_reverse_missing_key_is_empty() {
    let table = admin_table();
    let options = ReverseOptions::new();
    assert_eq!(table.reverse_route(ReverseKind::ByAlias, "nope", &[], &options).unwrap(), "");

    let post = ReverseOptions::new().with_verb(Verb::Post);
    assert_eq!(
        table.reverse_route(ReverseKind::ByAlias, "edit_template", &[&1], &post).unwrap(),
        ""
    );
}

#[test]
fn test_reverse_domain_fallback() {
    let table = admin_table();

    let admin = ReverseOptions::new().with_domain("admin.example.com");
    assert_eq!(
        table.reverse_route(ReverseKind::ByAlias, "templates", &[], &admin).unwrap(),
        "/admin/templates"
    );
    assert_eq!(table.reverse_route(ReverseKind::ByAlias, "home", &[], &admin).unwrap(), "/");
}

#[test]
fn test_reverse_alias_on_any_verb_route() {
    let mut routes: Routes<()> = Routes::new();
    routes
        .add(
            "news/(:num)",
            Target::inline(|_: &(), params: &[String]| Ok(Some(params.join(",")))),
            RouteOptions::named("news"),
        )
        .unwrap();
    let table = routes.build(&Controllers::new()).unwrap();

    let body = Router::new(&table).dispatch(&get("/news/3"), &()).unwrap();
    assert_eq!(body.as_deref(), Some("3"));

    let url = table
        .reverse_route(ReverseKind::ByAlias, "news", &[&3], &ReverseOptions::new())
        .unwrap();
    assert_eq!(url, "/news/3");

    let on_host = ReverseOptions::new().with_verb(Verb::Post).with_domain("localhost");
    assert_eq!(
        table.reverse_route(ReverseKind::ByRoute, "news/(:num)", &[&4], &on_host).unwrap(),
        "/news/4"
    );
}
