use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use oriole::{Config, Oriole, Request};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    app: Arc<Oriole>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let addr = config.server.address();

    let app = Oriole::builder(config)
        .build()
        .context("Failed to build the route table")?;

    let router = router(Arc::new(app));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}

/// `ORIOLE_CONFIG` names the config file; `oriole.toml` otherwise.
fn load_config() -> Result<Config> {
    match std::env::var("ORIOLE_CONFIG") {
        Ok(path) => Config::load(&path),
        Err(_) => Config::load_default(),
    }
}

/// Every request goes through the Oriole route table.
fn router(app: Arc<Oriole>) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(AppState { app })
        .layer(TraceLayer::new_for_http())
}

async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = Request::new(method, uri.to_string(), headers).with_body(&body);

    match state.app.handle(request) {
        Ok(response) => response.into_response(),
        Err(err) => {
            if err.is_not_found() {
                warn!(uri = %uri, "{}", err);
            } else {
                error!(uri = %uri, error = ?err, "Request failed");
            }
            err.into_response()
        }
    }
}
