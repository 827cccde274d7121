//! DTOs for redirect management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::Config;
use crate::domain::entities::Redirect;

/// Request to shorten a URL for the current owner.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination URL (must be an absolute URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// A redirect as returned to its owner.
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub short: String,
    pub url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl RedirectResponse {
    pub fn from_redirect(redirect: Redirect, config: &Config) -> Self {
        Self {
            short_url: config.short_url(&redirect.short),
            short: redirect.short,
            url: redirect.url,
            created_at: redirect.created_at,
        }
    }
}

/// All redirects of the current owner.
#[derive(Debug, Serialize)]
pub struct RedirectListResponse {
    pub total: usize,
    pub items: Vec<RedirectResponse>,
}
