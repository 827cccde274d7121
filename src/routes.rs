//! Top-level router configuration.
//!
//! # Route Structure
//!
//! All routes live under the configured `FORWARDED_PREFIX`:
//!
//! - `GET  /health`   - Liveness check (public)
//! - `GET  /{short}`  - Short link redirect (public)
//! - `/api/*`         - Owner-scoped management API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes with state and tracing applied, mounted under the
/// configured prefix.
pub fn app_routes(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health_handler))
        .route("/{short}", get(redirect_handler))
        .nest("/api", api::routes::owner_routes());

    let prefix = state.config.forwarded_prefix.trim_end_matches('/').to_string();
    let routes = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(&prefix, routes)
    };

    routes.with_state(state).layer(tracing::layer())
}

/// Constructs the application router with trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_routes(state))
}
