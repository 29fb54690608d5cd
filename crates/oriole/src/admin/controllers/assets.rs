// File: src/admin/controllers/assets.rs
// Purpose: Static assets of the admin pages, embedded at compile time

use axum::http::StatusCode;
use oriole_router::{Controller, HandlerResult};
use tracing::debug;

use crate::context::RequestContext;

/// `(path, contents)` of every embedded asset.
static ASSETS: &[(&str, &str)] = &[
    ("assets/css/styles.css", include_str!("../../../assets/css/styles.css")),
    ("assets/js/app.js", include_str!("../../../assets/js/app.js")),
    ("assets/img/favicon.svg", include_str!("../../../assets/img/favicon.svg")),
];

pub(crate) fn content_type(extension: &str) -> Option<&'static str> {
    let content_type = match extension {
        "css" => "text/css; charset=UTF-8",
        "csv" => "text/csv; charset=UTF-8",
        "html" => "text/html; charset=UTF-8",
        "js" => "text/javascript; charset=UTF-8",
        "txt" => "text/plain; charset=UTF-8",
        "xml" => "text/xml; charset=UTF-8",
        "svg" => "image/svg+xml; charset=UTF-8",
        "json" => "application/json; charset=UTF-8",
        _ => return None,
    };
    Some(content_type)
}

/// `$0` directory (may contain slashes), `$1` file name, `$2` extension.
fn get(ctx: &RequestContext, args: &[Option<String>]) -> HandlerResult {
    let arg = |index: usize| args.get(index).cloned().flatten().unwrap_or_default();
    let (dir, name, extension) = (arg(0), arg(1), arg(2));

    let dir = dir.trim_matches(|c| c == '/' || c == ' ');
    let path = if dir.is_empty() {
        format!("{}.{}", name, extension)
    } else {
        format!("{}/{}.{}", dir, name, extension)
    };

    let asset = content_type(&extension).and_then(|content_type| {
        ASSETS
            .iter()
            .find(|(asset, _)| *asset == path)
            .map(|(_, contents)| (content_type, *contents))
    });

    let mut response = ctx.response_mut();
    match asset {
        Some((content_type, contents)) => {
            response.set_header("content-type", content_type);
            Ok(Some(contents.to_string()))
        }
        None => {
            debug!(path = %path, "asset not found");
            response.set_status(StatusCode::NOT_FOUND);
            response.set_header("content-type", "text/plain; charset=UTF-8");
            Ok(Some(String::new()))
        }
    }
}

pub(super) fn register(controller: &mut Controller<RequestContext>) {
    controller.action("get", get);
}
