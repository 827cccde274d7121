//! Identity resolution capability consumed by the outer adapters.
//!
//! The shortening core never resolves identities itself; it only receives an
//! already-resolved `owner_id`. Adapters use a [`UserDirectory`] to turn an
//! external identity into that id.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Resolves external identities to durable users.
///
/// # Implementations
///
/// - [`crate::application::services::UserService`] - Repository-backed, creates users lazily
/// - [`crate::application::services::StaticUserDirectory`] - Single-tenant mode
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetches a user by internal id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is unknown.
    async fn get(&self, id: &str) -> Result<User, AppError>;

    /// Returns the user for a provider identity, creating it on first sight.
    async fn get_or_create(&self, provider_id: &str, email: &str) -> Result<User, AppError>;
}
