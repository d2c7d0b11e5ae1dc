//! Shared fixtures for the auth tests.

use std::sync::Arc;

use async_trait::async_trait;
use tower_sessions::{MemoryStore, Session};
use uuid::Uuid;

use super::PasswordHasher;
use crate::db::{StoreError, UserStore};
use crate::models::User;

/// Minimum Argon2 cost so tests stay fast.
pub fn cheap_hasher() -> PasswordHasher {
    PasswordHasher::with_cost(8, 1, 1).unwrap()
}

/// A fresh, unsaved session backed by an in-memory store.
pub fn memory_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

/// A store whose every call fails as if the database were unreachable.
pub struct FailingStore;

fn unreachable_db() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl UserStore for FailingStore {
    async fn find_by_id(&self, _: Uuid) -> Result<Option<User>, StoreError> {
        Err(unreachable_db())
    }

    async fn find_by_email(&self, _: &str) -> Result<Option<User>, StoreError> {
        Err(unreachable_db())
    }

    async fn find_by_federated_id(&self, _: &str) -> Result<Option<User>, StoreError> {
        Err(unreachable_db())
    }

    async fn insert_local(&self, _: &str, _: &str) -> Result<User, StoreError> {
        Err(unreachable_db())
    }

    async fn insert_federated(&self, _: &str) -> Result<User, StoreError> {
        Err(unreachable_db())
    }
}
