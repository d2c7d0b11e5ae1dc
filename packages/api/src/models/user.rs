//! # User model for authenticated principals
//!
//! Defines the two representations of a user:
//!
//! ## [`User`]
//!
//! The complete row from the `users` table. It derives [`sqlx::FromRow`] so it can be
//! loaded directly from queries:
//!
//! - `id` — primary key (`UUID v4`), generated by the store.
//! - `email` / `password_hash` — present together for local (email + password) accounts.
//!   The hash is an Argon2 PHC string, never the raw password.
//! - `federated_id` — the subject identifier issued by the OAuth provider, present for
//!   federated accounts.
//! - `created_at` — audit timestamp.
//!
//! A row always carries either the local pair or a federated id; the table enforces
//! this with a `CHECK` constraint and both `email` and `federated_id` are `UNIQUE`.
//!
//! ## [`UserInfo`]
//!
//! A projection that is safe to render or serialize: it omits the password hash and
//! turns the `Uuid` into a `String`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user record from the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub federated_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this account can sign in with a password.
    pub fn is_local(&self) -> bool {
        self.email.is_some() && self.password_hash.is_some()
    }

    /// Whether this account was provisioned by an OAuth callback.
    pub fn is_federated(&self) -> bool {
        self.federated_id.is_some()
    }

    /// Convert to UserInfo for rendering.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            federated: self.is_federated(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: Option<String>,
    pub federated: bool,
}

impl UserInfo {
    /// Get display name, falling back to the id for federated-only accounts.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn federated_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: None,
            password_hash: None,
            federated_id: Some("10769150350006150715113082367".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_federated_user_kind() {
        let user = federated_user();
        assert!(user.is_federated());
        assert!(!user.is_local());
    }

    #[test]
    fn test_info_omits_hash_and_falls_back_to_id() {
        let user = federated_user();
        let info = user.to_info();
        assert_eq!(info.id, user.id.to_string());
        assert_eq!(info.display_name(), user.id.to_string());
        assert!(info.federated);
    }

    #[test]
    fn test_info_display_name_uses_email() {
        let user = User {
            email: Some("ana@example.com".to_string()),
            password_hash: Some("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string()),
            federated_id: None,
            ..federated_user()
        };
        assert!(user.is_local());
        assert_eq!(user.to_info().display_name(), "ana@example.com");
    }
}
