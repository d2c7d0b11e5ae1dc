//! # API crate — authentication core for the Secrets app
//!
//! This crate holds everything with logic in it: credential verification, session
//! lifecycle, and federated-identity account linking. The `web` crate is a thin
//! axum layer on top.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2 password hashing, local and federated strategies, OAuth client, session manager, [`AuthContext`](auth::AuthContext) |
//! | [`db`] | [`UserStore`](db::UserStore) trait with PostgreSQL and in-memory implementations, pool setup and migrations |
//! | [`models`] | The `User` row and its render-safe projection (`UserInfo`) |
//!
//! ## Outcomes
//!
//! Every strategy returns `Result<AuthOutcome, AuthError>`: `Ok(Success(user))`,
//! `Ok(Rejected(reason))` for wrong credentials or a taken email, and `Err` only for
//! failures such as an unreachable database.

pub mod auth;
pub mod db;
pub mod models;

pub use auth::{AuthContext, AuthError, AuthOutcome, Credentials, Rejection};
pub use models::{User, UserInfo};
