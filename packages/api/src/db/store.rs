use async_trait::async_trait;
use uuid::Uuid;

use crate::models::User;

/// Failure while talking to the credential store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A `UNIQUE` constraint rejected the write (duplicate email or federated id).
    #[error("unique constraint violated: {constraint}")]
    Conflict { constraint: String },

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return Self::Conflict {
                    constraint: db_err.constraint().unwrap_or_default().to_string(),
                };
            }
        }
        Self::Database(err)
    }
}

/// Lookups and inserts issued by the authentication core.
///
/// "Not found" is `Ok(None)`; `Err` is reserved for store failures. Inserts return
/// [`StoreError::Conflict`] when a uniqueness constraint fires so callers can turn
/// it into a rejection or a re-fetch.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Exact, case-sensitive match on `email`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_federated_id(&self, federated_id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a local account. `password_hash` must already be hashed.
    async fn insert_local(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Insert a federated-only account (no email, no password).
    async fn insert_federated(&self, federated_id: &str) -> Result<User, StoreError>;
}
