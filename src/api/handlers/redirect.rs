//! Handler for public short URL resolution.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{short}`
///
/// Resolution is not owner-scoped; anyone holding the code may follow it.
/// Malformed codes are rejected before storage is queried.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed code.
/// Returns 404 Not Found if the code is unknown.
pub async fn redirect_handler(
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !state.shortener.is_valid_short(&short) {
        return Err(AppError::bad_request(
            "Malformed short code",
            json!({ "short": short }),
        ));
    }

    let url = state.shortener.expand_short_url(&short).await?;
    debug!(short = %short, "redirecting");

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [
            (header::LOCATION, url),
            (header::CACHE_CONTROL, "private, max-age=90".to_string()),
            (header::REFERRER_POLICY, "unsafe-url".to_string()),
        ],
    )
        .into_response())
}
