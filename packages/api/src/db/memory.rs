use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::store::{StoreError, UserStore};
use crate::models::User;

/// In-memory [`UserStore`] for tests and local experiments.
///
/// Enforces the same `UNIQUE (email)` and `UNIQUE (federated_id)` rules as the table,
/// reporting violations with the constraint names PostgreSQL would use.
#[derive(Clone, Debug, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.lock().iter().find(|u| predicate(u)).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.find(|u| u.id == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.find(|u| u.email.as_deref() == Some(email)))
    }

    async fn find_by_federated_id(&self, federated_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.find(|u| u.federated_id.as_deref() == Some(federated_id)))
    }

    async fn insert_local(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.lock();
        if users.iter().any(|u| u.email.as_deref() == Some(email)) {
            return Err(StoreError::Conflict {
                constraint: "users_email_key".to_string(),
            });
        }

        let user = User {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            password_hash: Some(password_hash.to_string()),
            federated_id: None,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn insert_federated(&self, federated_id: &str) -> Result<User, StoreError> {
        let mut users = self.lock();
        if users
            .iter()
            .any(|u| u.federated_id.as_deref() == Some(federated_id))
        {
            return Err(StoreError::Conflict {
                constraint: "users_federated_id_key".to_string(),
            });
        }

        let user = User {
            id: Uuid::new_v4(),
            email: None,
            password_hash: None,
            federated_id: Some(federated_id.to_string()),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
