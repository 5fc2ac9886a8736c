//! Web front end for the medireg patient registry.
//!
//! Serves the form page at `/`, the JSON form endpoints under `/api`, and a
//! `/health` probe. Each browser session gets its own record store unless the
//! configuration selects a shared one.

#![warn(missing_docs)]

/// JSON endpoints.
pub mod api;
/// `medireg.toml` loading.
pub mod config;
/// Session cookies and per-session stores.
pub mod session;
/// The HTML page.
pub mod ui;

use std::sync::Arc;

use axum::{
    http::Method,
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::session::SessionRegistry;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record stores keyed by session.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Empty state for the given configuration.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new(
                config.scope,
                config.session_cookie.clone(),
            )),
        }
    }
}

/// The whole application: page, health probe and `/api`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(ui::index))
        .route("/health", get(health))
        .nest("/api", api::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::session_layer,
        ))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
