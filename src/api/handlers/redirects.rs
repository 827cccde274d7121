//! Handlers for owner-scoped redirect management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::redirect::{RedirectListResponse, RedirectResponse, ShortenRequest};
use crate::api::middleware::{AppJson, CurrentOwner};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the current owner's redirects.
///
/// # Endpoint
///
/// `GET /api/redirects`
pub async fn list_redirects_handler(
    owner: CurrentOwner,
    State(state): State<AppState>,
) -> Result<Json<RedirectListResponse>, AppError> {
    let items: Vec<RedirectResponse> = state
        .shortener
        .list(owner.id())
        .await?
        .into_iter()
        .map(|r| RedirectResponse::from_redirect(r, &state.config))
        .collect();

    Ok(Json(RedirectListResponse {
        total: items.len(),
        items,
    }))
}

/// Shortens a URL for the current owner.
///
/// # Endpoint
///
/// `POST /api/redirects`
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// Shortening a URL the owner already shortened returns the existing
/// redirect.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not a JSON object with a valid URL.
/// Returns 409 Conflict if the derived code collides with another redirect.
pub async fn create_redirect_handler(
    owner: CurrentOwner,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ShortenRequest>,
) -> Result<(StatusCode, Json<RedirectResponse>), AppError> {
    payload.validate()?;

    let redirect = state
        .shortener
        .shorten_url(&payload.url, owner.id())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RedirectResponse::from_redirect(redirect, &state.config)),
    ))
}

/// Fetches one of the current owner's redirects.
///
/// # Endpoint
///
/// `GET /api/redirects/{short}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or owned by someone else.
pub async fn get_redirect_handler(
    owner: CurrentOwner,
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RedirectResponse>, AppError> {
    let redirect = state
        .shortener
        .get_redirect_by_short(&short, owner.id())
        .await?;

    Ok(Json(RedirectResponse::from_redirect(
        redirect,
        &state.config,
    )))
}

/// Deletes one of the current owner's redirects.
///
/// # Endpoint
///
/// `DELETE /api/redirects/{short}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or owned by someone else.
pub async fn delete_redirect_handler(
    owner: CurrentOwner,
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state
        .shortener
        .delete_short_url(&short, owner.id())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
