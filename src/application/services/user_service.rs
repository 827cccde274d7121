//! User directory implementations.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::domain::user_directory::UserDirectory;
use crate::error::AppError;

/// Repository-backed directory that creates users on first login.
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Stores a new user with a freshly generated internal id.
    async fn create(&self, provider_id: &str, email: &str) -> Result<User, AppError> {
        let user = User::new(Uuid::new_v4().to_string(), provider_id, email);
        self.repository.save(&user).await?;

        info!(user_id = %user.id, "user created");
        Ok(user)
    }
}

#[async_trait]
impl<R: UserRepository + ?Sized> UserDirectory for UserService<R> {
    async fn get(&self, id: &str) -> Result<User, AppError> {
        self.repository.get(id).await
    }

    async fn get_or_create(&self, provider_id: &str, email: &str) -> Result<User, AppError> {
        if provider_id.is_empty() {
            return Err(AppError::bad_request(
                "Provider identity must not be empty",
                json!({ "field": "provider_id" }),
            ));
        }

        if let Some(user) = self.repository.get_by_provider_id(provider_id).await? {
            return Ok(user);
        }

        match self.create(provider_id, email).await {
            Ok(user) => Ok(user),
            // Lost a race with a concurrent first login.
            Err(AppError::Conflict { .. }) => self
                .repository
                .get_by_provider_id(provider_id)
                .await?
                .ok_or_else(|| {
                    AppError::internal(
                        "User vanished after conflicting insert",
                        json!({ "provider_id": provider_id }),
                    )
                }),
            Err(e) => Err(e),
        }
    }
}

/// Single-tenant directory: every identity resolves to one configured user.
#[derive(Debug, Clone)]
pub struct StaticUserDirectory {
    user: User,
}

impl StaticUserDirectory {
    /// Creates a directory that always answers with the user `id`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            user: User::new(id.clone(), id, ""),
        }
    }

    /// The single owner of this deployment.
    pub fn user(&self) -> &User {
        &self.user
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn get(&self, id: &str) -> Result<User, AppError> {
        if id == self.user.id {
            Ok(self.user.clone())
        } else {
            Err(AppError::not_found("User not found", json!({ "id": id })))
        }
    }

    async fn get_or_create(&self, _provider_id: &str, _email: &str) -> Result<User, AppError> {
        Ok(self.user.clone())
    }
}
