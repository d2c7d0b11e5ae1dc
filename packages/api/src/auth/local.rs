//! Local (email + password) authentication.

use tracing::{debug, instrument};

use super::{AuthError, AuthOutcome, PasswordHasher, Rejection};
use crate::db::UserStore;

/// Verifies a username/password pair against the stored Argon2 hash.
///
/// The username is the account email, matched exactly (case-sensitive, untrimmed).
pub struct LocalStrategy<'a> {
    store: &'a dyn UserStore,
    hasher: &'a PasswordHasher,
}

impl<'a> LocalStrategy<'a> {
    pub fn new(store: &'a dyn UserStore, hasher: &'a PasswordHasher) -> Self {
        Self { store, hasher }
    }

    #[instrument(skip_all)]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let Some(user) = self.store.find_by_email(username).await? else {
            debug!("no user with that email");
            return Ok(AuthOutcome::Rejected(Rejection::IncorrectUsername));
        };

        // Federated-only accounts have nothing to verify against.
        let Some(hash) = user.password_hash.as_deref() else {
            debug!(user_id = %user.id, "account has no password");
            return Ok(AuthOutcome::Rejected(Rejection::IncorrectPassword));
        };

        if !self.hasher.verify(password, hash).await? {
            debug!(user_id = %user.id, "password mismatch");
            return Ok(AuthOutcome::Rejected(Rejection::IncorrectPassword));
        }

        Ok(AuthOutcome::Success(user))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::auth::test_support::{cheap_hasher, FailingStore};
    use crate::db::{MemoryUserStore, StoreError};
    use crate::models::User;

    async fn store_with_user(hasher: &PasswordHasher) -> MemoryUserStore {
        let store = MemoryUserStore::new();
        let hash = hasher.hash("s3cret").await.unwrap();
        store.insert_local("ana@example.com", &hash).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_correct_credentials_succeed() {
        let hasher = cheap_hasher();
        let store = store_with_user(&hasher).await;

        let outcome = LocalStrategy::new(&store, &hasher)
            .authenticate("ana@example.com", "s3cret")
            .await
            .unwrap();

        assert_eq!(
            outcome.user().and_then(|u| u.email.as_deref()),
            Some("ana@example.com")
        );
    }

    #[tokio::test]
    async fn test_unknown_email_rejected() {
        let hasher = cheap_hasher();
        let store = store_with_user(&hasher).await;

        let outcome = LocalStrategy::new(&store, &hasher)
            .authenticate("bob@example.com", "s3cret")
            .await
            .unwrap();

        assert_eq!(outcome, AuthOutcome::Rejected(Rejection::IncorrectUsername));
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let hasher = cheap_hasher();
        let store = store_with_user(&hasher).await;

        let outcome = LocalStrategy::new(&store, &hasher)
            .authenticate("ANA@example.com", "s3cret")
            .await
            .unwrap();

        assert_eq!(outcome, AuthOutcome::Rejected(Rejection::IncorrectUsername));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let hasher = cheap_hasher();
        let store = store_with_user(&hasher).await;

        let outcome = LocalStrategy::new(&store, &hasher)
            .authenticate("ana@example.com", "guess")
            .await
            .unwrap();

        assert_eq!(outcome, AuthOutcome::Rejected(Rejection::IncorrectPassword));
    }

    #[tokio::test]
    async fn test_account_without_password_rejected() {
        // A row with an email but no hash cannot come from registration, but the
        // strategy must still refuse it rather than fail.
        let hasher = cheap_hasher();
        let user = User {
            id: Uuid::new_v4(),
            email: Some("fed@example.com".to_string()),
            password_hash: None,
            federated_id: Some("sub-1".to_string()),
            created_at: Utc::now(),
        };
        let stub = SingleUserStore(user);

        let outcome = LocalStrategy::new(&stub, &hasher)
            .authenticate("fed@example.com", "anything")
            .await
            .unwrap();

        assert_eq!(outcome, AuthOutcome::Rejected(Rejection::IncorrectPassword));
    }

    #[tokio::test]
    async fn test_store_failure_is_error() {
        let hasher = cheap_hasher();
        let err = LocalStrategy::new(&FailingStore, &hasher)
            .authenticate("ana@example.com", "s3cret")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Store(StoreError::Database(_))));
    }

    struct SingleUserStore(User);

    #[async_trait::async_trait]
    impl UserStore for SingleUserStore {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
            Ok(Some(self.0.clone()).filter(|u| u.id == id))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            Ok(Some(self.0.clone()).filter(|u| u.email.as_deref() == Some(email)))
        }

        async fn find_by_federated_id(&self, federated_id: &str) -> Result<Option<User>, StoreError> {
            Ok(Some(self.0.clone()).filter(|u| u.federated_id.as_deref() == Some(federated_id)))
        }

        async fn insert_local(&self, _: &str, _: &str) -> Result<User, StoreError> {
            unimplemented!()
        }

        async fn insert_federated(&self, _: &str) -> Result<User, StoreError> {
            unimplemented!()
        }
    }
}
