//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`  - Allocate a short code
//! - `GET  /urls`     - List every mapping, newest first
//! - `GET  /health`   - Health check: DB, cache, visit queue
//! - `GET  /{code}`   - Short code redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    health_handler, list_urls_handler, redirect_handler, shorten_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Static routes take precedence over the `/{code}` capture, so `urls` and
/// `health` never reach the resolver.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_urls_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
