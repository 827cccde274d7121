//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports that the service is up.
///
/// # Endpoint
///
/// `GET /health`
///
/// ```json
/// { "status": "ok", "version": "0.1.0", "storage": "postgres" }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.config.storage_backend.as_str().to_string(),
    })
}
