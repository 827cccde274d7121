//! User entity resolved from an external federated identity.

use serde::Serialize;

/// A durable user record.
///
/// `id` is the internal identifier used as `owner_id` on redirects.
/// `provider_id` is the identity issued by the federated login provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub provider_id: String,
    pub email: String,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: impl Into<String>,
        provider_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            provider_id: provider_id.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("id-1", "google-42", "someone@example.com");

        assert_eq!(user.id, "id-1");
        assert_eq!(user.provider_id, "google-42");
        assert_eq!(user.email, "someone@example.com");
    }
}
