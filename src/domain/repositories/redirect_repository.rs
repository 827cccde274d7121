//! Repository trait for redirect data access.

use crate::domain::entities::Redirect;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for persisting and resolving redirects.
///
/// Every management operation is scoped to an owner: a redirect that exists
/// but belongs to someone else is reported exactly like one that does not
/// exist. Only [`RedirectRepository::expand`] and
/// [`RedirectRepository::find_by_short`] are global, since public
/// resolution must work for anonymous visitors.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRedirectRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryRedirectRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectRepository: Send + Sync {
    /// Lists every redirect owned by `owner_id`.
    ///
    /// Returns an empty vector, not an error, when the owner has none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on backend failures.
    async fn list(&self, owner_id: &str) -> Result<Vec<Redirect>, AppError>;

    /// Fetches a redirect by short code, restricted to `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist or is owned
    /// by a different user.
    async fn get_redirect_by_short(
        &self,
        short: &str,
        owner_id: &str,
    ) -> Result<Redirect, AppError>;

    /// Inserts a redirect, doing nothing if the short code is already taken.
    ///
    /// Returns `Ok(true)` if the record was written and `Ok(false)` if an
    /// existing record kept the code. Existing records are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on backend failures.
    async fn save(&self, redirect: &Redirect) -> Result<bool, AppError>;

    /// Looks up the stored record for a short code regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on backend failures.
    async fn find_by_short(&self, short: &str) -> Result<Option<Redirect>, AppError>;

    /// Resolves a short code to its destination URL regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    async fn expand(&self, short: &str) -> Result<String, AppError>;

    /// Deletes a redirect if it exists and is owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing matching was deleted.
    async fn delete(&self, short: &str, owner_id: &str) -> Result<(), AppError>;
}
