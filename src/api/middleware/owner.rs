//! Resolution of the calling owner for management endpoints.
//!
//! Authentication happens upstream. A trusted authenticating proxy forwards
//! the federated identity in [`FORWARDED_USER_HEADER`] and
//! [`FORWARDED_EMAIL_HEADER`]; the identity is resolved through the
//! configured [`crate::domain::user_directory::UserDirectory`]. In
//! single-tenant mode the headers are not required.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde_json::json;

use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

pub const FORWARDED_USER_HEADER: &str = "x-forwarded-user";
pub const FORWARDED_EMAIL_HEADER: &str = "x-forwarded-email";

/// The user on whose behalf the request runs.
#[derive(Debug, Clone)]
pub struct CurrentOwner(pub User);

impl CurrentOwner {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FromRequestParts<AppState> for CurrentOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ref owner_id) = state.config.single_tenant_user {
            return Ok(CurrentOwner(state.users.get(owner_id).await?));
        }

        let Some(provider_id) = header_value(parts, FORWARDED_USER_HEADER) else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Missing forwarded identity" }),
            ));
        };
        let email = header_value(parts, FORWARDED_EMAIL_HEADER).unwrap_or_default();

        let user = state.users.get_or_create(&provider_id, &email).await?;
        tracing::debug!(user_id = %user.id, "resolved owner");

        Ok(CurrentOwner(user))
    }
}
