//! Federated (OAuth) authentication: map a provider subject to a local user,
//! provisioning the user on first sight.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{AuthError, AuthOutcome};
use crate::db::{StoreError, UserStore};

/// Profile returned by the provider's userinfo endpoint.
///
/// Only `subject` is used for account linking. OIDC providers call it `sub`; Google's
/// v2 userinfo endpoint calls it `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedProfile {
    #[serde(rename = "sub", alias = "id")]
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl FederatedProfile {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: None,
            name: None,
        }
    }
}

/// Links a verified provider profile to a local user.
pub struct FederatedStrategy<'a> {
    store: &'a dyn UserStore,
}

impl<'a> FederatedStrategy<'a> {
    pub fn new(store: &'a dyn UserStore) -> Self {
        Self { store }
    }

    /// Find the user for `profile.subject`, creating a federated-only user if none exists.
    ///
    /// Two first-time callbacks for the same subject can race; the loser's insert hits
    /// `UNIQUE (federated_id)` and re-reads the winner's row.
    #[instrument(skip_all, fields(subject = %profile.subject))]
    pub async fn complete_callback(&self, profile: &FederatedProfile) -> Result<AuthOutcome, AuthError> {
        let subject = profile.subject.as_str();
        if subject.is_empty() {
            return Err(AuthError::InvalidProfile("missing subject identifier".to_string()));
        }

        if let Some(user) = self.store.find_by_federated_id(subject).await? {
            debug!(user_id = %user.id, "federated user found");
            return Ok(AuthOutcome::Success(user));
        }

        match self.store.insert_federated(subject).await {
            Ok(user) => {
                info!(user_id = %user.id, "provisioned federated user");
                Ok(AuthOutcome::Success(user))
            }
            Err(StoreError::Conflict { constraint }) => {
                debug!(%constraint, "concurrent provisioning, re-fetching");
                let user = self
                    .store
                    .find_by_federated_id(subject)
                    .await?
                    .ok_or(StoreError::Conflict { constraint })?;
                Ok(AuthOutcome::Success(user))
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::test_support::FailingStore;
    use crate::db::MemoryUserStore;

    #[tokio::test]
    async fn test_first_callback_provisions_user() {
        let store = MemoryUserStore::new();
        let outcome = FederatedStrategy::new(&store)
            .complete_callback(&FederatedProfile::new("sub-42"))
            .await
            .unwrap();

        let user = outcome.user().unwrap();
        assert_eq!(user.federated_id.as_deref(), Some("sub-42"));
        assert!(user.email.is_none());
        assert!(user.password_hash.is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_repeat_callback_returns_same_user() {
        let store = MemoryUserStore::new();
        let strategy = FederatedStrategy::new(&store);
        let profile = FederatedProfile::new("sub-42");

        let first = strategy.complete_callback(&profile).await.unwrap();
        let second = strategy.complete_callback(&profile).await.unwrap();

        assert_eq!(first.user().unwrap().id, second.user().unwrap().id);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_callbacks_create_one_user() {
        let store = Arc::new(MemoryUserStore::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    FederatedStrategy::new(store.as_ref())
                        .complete_callback(&FederatedProfile::new("racy-subject"))
                        .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            let outcome = handle.await.unwrap().unwrap();
            ids.push(outcome.user().unwrap().id);
        }

        assert_eq!(store.len(), 1);
        assert!(ids.iter().all(|id| *id == ids[0]));
    }

    #[tokio::test]
    async fn test_empty_subject_is_error() {
        let store = MemoryUserStore::new();
        let err = FederatedStrategy::new(&store)
            .complete_callback(&FederatedProfile::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidProfile(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let err = FederatedStrategy::new(&FailingStore)
            .complete_callback(&FederatedProfile::new("sub"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Store(StoreError::Database(_))));
    }

    #[test]
    fn test_profile_accepts_sub_or_id() {
        let oidc: FederatedProfile =
            serde_json::from_str(r#"{"sub":"111","email":"a@example.com"}"#).unwrap();
        assert_eq!(oidc.subject, "111");
        assert_eq!(oidc.email.as_deref(), Some("a@example.com"));

        let v2: FederatedProfile = serde_json::from_str(r#"{"id":"222","name":"Ana"}"#).unwrap();
        assert_eq!(v2.subject, "222");
        assert_eq!(v2.name.as_deref(), Some("Ana"));
    }
}
