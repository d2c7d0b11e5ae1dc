//! # Database module — credential store adapter
//!
//! Everything the authentication core needs from persistence goes through the
//! [`UserStore`] trait, so strategies and the session manager can run against
//! PostgreSQL in production and an in-memory double in tests.
//!
//! ## Implementations
//!
//! | Type | Backend |
//! |------|---------|
//! | [`PgUserStore`] | `users` table via SQLx; every statement uses bound parameters. |
//! | [`MemoryUserStore`] | `Vec<User>` behind a mutex, enforcing the same uniqueness rules. |
//!
//! ## Pool
//!
//! [`connect`] opens the shared [`sqlx::PgPool`] and [`migrate`] applies the embedded
//! migrations from `packages/api/migrations`. The pool is constructed once at startup
//! and handed to [`PgUserStore::new`]; it is safe to share across concurrent requests.

mod memory;
mod pool;
mod postgres;
mod store;

pub use memory::MemoryUserStore;
pub use pool::{connect, migrate};
pub use postgres::PgUserStore;
pub use store::{StoreError, UserStore};
