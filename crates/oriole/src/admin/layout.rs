// File: src/admin/layout.rs
// Purpose: Shared maud layout and header menu of the admin pages

use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde_json::Value as JsonValue;

use crate::context::RequestContext;

/// One entry of the header menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub link: String,
    pub active: bool,
}

/// Templates, Variables and Languages, each active on its own list page
/// and every page below it.
pub fn header_menu(ctx: &RequestContext) -> Vec<MenuItem> {
    [
        ("Templates", "templates_list"),
        ("Variables", "variables_list"),
        ("Languages", "languages_list"),
    ]
    .into_iter()
    .map(|(title, alias)| {
        let link = ctx.route_by_alias(alias, &[]);
        let active = !link.is_empty() && ctx.url_is(&format!("{}*", link));
        MenuItem { title, link, active }
    })
    .collect()
}

/// Script-safe JSON for the client-side config globals.
fn script_json(value: &JsonValue) -> PreEscaped<String> {
    PreEscaped(value.to_string().replace("</", "<\\/"))
}

fn client_config(ctx: &RequestContext) -> (JsonValue, JsonValue) {
    let mut app = serde_json::to_value(ctx.app_config()).unwrap_or(JsonValue::Null);
    if let JsonValue::Object(map) = &mut app {
        map.insert(
            "current_base_url".to_string(),
            JsonValue::String(ctx.request().current_base_url()),
        );
    }
    let cookie = serde_json::to_value(ctx.cookie_config()).unwrap_or(JsonValue::Null);
    (app, cookie)
}

fn header(ctx: &RequestContext) -> Markup {
    html! {
        header class="header" {
            nav class="navbar navbar-expand-lg navbar-light bg-light" {
                div class="container-fluid" {
                    a class="navbar-brand" href=(ctx.route_by_alias("admin_home", &[])) {
                        img src=(ctx.route_by_alias("get_assets", &[&"assets/img", &"favicon", &"svg"]))
                            alt="Oriole" width="24" height="24";
                    }
                    ul class="navbar-nav me-auto" id="header-menu" {
                        @for item in header_menu(ctx) {
                            li class="nav-item" {
                                a class=(if item.active { "nav-link active" } else { "nav-link" }) href=(item.link) {
                                    (item.title)
                                }
                            }
                        }
                    }
                    a class="navbar-brand" href=(ctx.request().public_base_url(ctx.app_config())) target="_blank" {
                        "Front"
                    }
                }
            }
        }
    }
}

/// Wraps `content` in the admin page chrome. A pending flash message is
/// shown above the content.
pub fn page(ctx: &RequestContext, title: &str, content: Markup) -> Markup {
    let (app_config, cookie_config) = client_config(ctx);
    let message = ctx.take_flash();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link href=(ctx.route_by_alias("get_assets", &[&"assets/img", &"favicon", &"svg"]))
                    rel="shortcut icon" type="image/svg+xml";
                link href=(ctx.route_by_alias("get_assets", &[&"assets/css", &"styles", &"css"]))
                    rel="stylesheet" type="text/css";
                script {
                    "window.app_config = " (script_json(&app_config)) ";"
                    "window.cookie_config = " (script_json(&cookie_config)) ";"
                }
            }
            body {
                (header(ctx))
                main class="main" {
                    div class="container-fluid" {
                        h1 { (title) }
                        @if let Some(message) = message {
                            div class="alert alert-success" role="alert" { (message) }
                        }
                        (content)
                    }
                }
                script src=(ctx.route_by_alias("get_assets", &[&"assets/js", &"app", &"js"])) {}
            }
        }
    }
}

/// Validation messages above a form.
pub fn form_errors(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            div class="alert alert-danger" role="alert" {
                "Validation errors:"
                ul {
                    @for error in errors {
                        li { (error) }
                    }
                }
            }
        }
    }
}
