//! In-memory implementation of the user repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Process-local user store keyed by internal id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &str) -> Result<User, AppError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    async fn get_by_provider_id(&self, provider_id: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.provider_id == provider_id)
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) || users.values().any(|u| u.provider_id == user.provider_id)
        {
            return Err(AppError::conflict(
                "User already exists",
                json!({ "id": user.id, "provider_id": user.provider_id }),
            ));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}
