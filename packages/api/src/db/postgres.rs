//! PostgreSQL-backed [`UserStore`].

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{StoreError, UserStore};
use crate::models::User;

const USER_COLUMNS: &str = "id, email, password_hash, federated_id, created_at";

/// [`UserStore`] over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_federated_id(&self, federated_id: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE federated_id = $1"
        ))
        .bind(federated_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_local(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as(&format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_federated(&self, federated_id: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as(&format!(
            "INSERT INTO users (federated_id) VALUES ($1) RETURNING {USER_COLUMNS}"
        ))
        .bind(federated_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_duplicate_email_is_conflict(pool: PgPool) {
        let store = PgUserStore::new(pool);

        let user = store.insert_local("ana@example.com", "hash").await.unwrap();
        let err = store
            .insert_local("ana@example.com", "other")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Conflict { ref constraint } if constraint == "users_email_key"
        ));
        assert_eq!(
            store.find_by_email("ana@example.com").await.unwrap(),
            Some(user)
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_duplicate_federated_id_is_conflict(pool: PgPool) {
        let store = PgUserStore::new(pool);

        store.insert_federated("sub-1").await.unwrap();
        let err = store.insert_federated("sub-1").await.unwrap_err();

        assert!(err.is_conflict());
        assert!(store.find_by_email("sub-1").await.unwrap().is_none());
    }
}
