//! In-memory implementation of the redirect repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::Redirect;
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Store {
    by_short: HashMap<String, Redirect>,
    /// Short codes per owner, in insertion order.
    by_owner: HashMap<String, Vec<String>>,
}

/// Process-local redirect store for tests and single-process deployments.
///
/// Both indexes live behind one lock so a save or delete is observed
/// atomically by concurrent readers.
#[derive(Debug, Default)]
pub struct InMemoryRedirectRepository {
    store: RwLock<Store>,
}

impl InMemoryRedirectRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored redirects across all owners.
    pub async fn len(&self) -> usize {
        self.store.read().await.by_short.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn not_found(short: &str) -> AppError {
    AppError::not_found("Redirect not found", json!({ "short": short }))
}

#[async_trait]
impl RedirectRepository for InMemoryRedirectRepository {
    async fn list(&self, owner_id: &str) -> Result<Vec<Redirect>, AppError> {
        let store = self.store.read().await;

        let redirects: Vec<Redirect> = store
            .by_owner
            .get(owner_id)
            .map(|shorts| {
                shorts
                    .iter()
                    .filter_map(|short| store.by_short.get(short).cloned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(redirects)
    }

    async fn get_redirect_by_short(
        &self,
        short: &str,
        owner_id: &str,
    ) -> Result<Redirect, AppError> {
        let store = self.store.read().await;

        store
            .by_short
            .get(short)
            .filter(|r| r.is_owned_by(owner_id))
            .cloned()
            .ok_or_else(|| not_found(short))
    }

    async fn save(&self, redirect: &Redirect) -> Result<bool, AppError> {
        let mut store = self.store.write().await;

        if store.by_short.contains_key(&redirect.short) {
            return Ok(false);
        }

        store
            .by_short
            .insert(redirect.short.clone(), redirect.clone());
        store
            .by_owner
            .entry(redirect.owner_id.clone())
            .or_default()
            .push(redirect.short.clone());

        Ok(true)
    }

    async fn find_by_short(&self, short: &str) -> Result<Option<Redirect>, AppError> {
        Ok(self.store.read().await.by_short.get(short).cloned())
    }

    async fn expand(&self, short: &str) -> Result<String, AppError> {
        self.store
            .read()
            .await
            .by_short
            .get(short)
            .map(|r| r.url.clone())
            .ok_or_else(|| not_found(short))
    }

    async fn delete(&self, short: &str, owner_id: &str) -> Result<(), AppError> {
        let mut store = self.store.write().await;

        let owned = store
            .by_short
            .get(short)
            .is_some_and(|r| r.is_owned_by(owner_id));
        if !owned {
            return Err(not_found(short));
        }

        store.by_short.remove(short);
        if let Some(shorts) = store.by_owner.get_mut(owner_id) {
            shorts.retain(|s| s != short);
            if shorts.is_empty() {
                store.by_owner.remove(owner_id);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn redirect(short: &str, url: &str, owner: &str) -> Redirect {
        Redirect::new(short, url, owner, Utc::now())
    }

    #[tokio::test]
    async fn test_list_empty_owner_is_ok() {
        let repo = InMemoryRedirectRepository::new();

        let list = repo.list("nobody").await.unwrap();

        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped_and_ordered() {
        let repo = InMemoryRedirectRepository::new();
        repo.save(&redirect("aaaaaa", "https://a.com", "u1"))
            .await
            .unwrap();
        repo.save(&redirect("bbbbbb", "https://b.com", "u2"))
            .await
            .unwrap();
        repo.save(&redirect("cccccc", "https://c.com", "u1"))
            .await
            .unwrap();

        let list = repo.list("u1").await.unwrap();

        let shorts: Vec<&str> = list.iter().map(|r| r.short.as_str()).collect();
        assert_eq!(shorts, vec!["aaaaaa", "cccccc"]);
    }

    #[tokio::test]
    async fn test_save_conflict_does_not_overwrite() {
        let repo = InMemoryRedirectRepository::new();
        let original = redirect("abc123", "https://first.com", "u1");

        assert!(repo.save(&original).await.unwrap());
        assert!(
            !repo
                .save(&redirect("abc123", "https://second.com", "u2"))
                .await
                .unwrap()
        );

        assert_eq!(repo.expand("abc123").await.unwrap(), "https://first.com");
        assert!(repo.list("u2").await.unwrap().is_empty());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_redirect_by_short_enforces_owner() {
        let repo = InMemoryRedirectRepository::new();
        repo.save(&redirect("abc123", "https://example.com", "u1"))
            .await
            .unwrap();

        let found = repo.get_redirect_by_short("abc123", "u1").await.unwrap();
        assert_eq!(found.url, "https://example.com");

        let foreign = repo.get_redirect_by_short("abc123", "u2").await;
        assert!(matches!(foreign, Err(AppError::NotFound { .. })));

        let missing = repo.get_redirect_by_short("zzzzzz", "u1").await;
        assert!(matches!(missing, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_find_by_short_is_global() {
        let repo = InMemoryRedirectRepository::new();
        repo.save(&redirect("abc123", "https://example.com", "u1"))
            .await
            .unwrap();

        let found = repo.find_by_short("abc123").await.unwrap();
        assert_eq!(found.map(|r| r.owner_id), Some("u1".to_string()));
        assert!(repo.find_by_short("zzzzzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expand_missing_is_not_found() {
        let repo = InMemoryRedirectRepository::new();

        let result = repo.expand("abc123").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_foreign_is_not_found_and_keeps_record() {
        let repo = InMemoryRedirectRepository::new();
        repo.save(&redirect("abc123", "https://example.com", "u1"))
            .await
            .unwrap();

        let result = repo.delete("abc123", "u2").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert_eq!(repo.expand("abc123").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_delete_is_terminal() {
        let repo = InMemoryRedirectRepository::new();
        repo.save(&redirect("abc123", "https://example.com", "u1"))
            .await
            .unwrap();

        repo.delete("abc123", "u1").await.unwrap();

        assert!(repo.expand("abc123").await.unwrap_err().is_not_found());
        assert!(repo.delete("abc123", "u1").await.unwrap_err().is_not_found());
        assert!(repo.list("u1").await.unwrap().is_empty());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_saves_keep_indexes_consistent() {
        let repo = Arc::new(InMemoryRedirectRepository::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    let owner = format!("u{}", i % 4);
                    let short = format!("c{i:05}");
                    repo.save(&redirect(&short, "https://example.com", &owner))
                        .await
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(repo.len().await, 64);
        for owner in 0..4 {
            assert_eq!(repo.list(&format!("u{owner}")).await.unwrap().len(), 16);
        }
    }
}
