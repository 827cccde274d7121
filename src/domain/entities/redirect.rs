//! Redirect entity representing a persisted short-code mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored mapping from a short code to its destination URL.
///
/// The short code is unique across all owners. Once created, the record is
/// never modified; it only disappears through an owner-scoped delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Redirect {
    pub short: String,
    pub url: String,
    #[sqlx(rename = "user_id")]
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl Redirect {
    /// Creates a new Redirect instance.
    pub fn new(
        short: impl Into<String>,
        url: impl Into<String>,
        owner_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short: short.into(),
            url: url.into(),
            owner_id: owner_id.into(),
            created_at,
        }
    }

    /// Returns true if `owner_id` owns this redirect.
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    /// Returns true if this record maps the same owner to the same URL.
    pub fn same_target(&self, other: &Redirect) -> bool {
        self.owner_id == other.owner_id && self.url == other.url
    }
}
