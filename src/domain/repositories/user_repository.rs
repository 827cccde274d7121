//! Repository trait for user records.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for durable user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetches a user by internal id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no such user exists.
    async fn get(&self, id: &str) -> Result<User, AppError>;

    /// Fetches a user by the identity issued by the login provider.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` if found
    /// - `Ok(None)` if not found
    async fn get_by_provider_id(&self, provider_id: &str) -> Result<Option<User>, AppError>;

    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id or provider id is already taken.
    async fn save(&self, user: &User) -> Result<(), AppError>;
}
