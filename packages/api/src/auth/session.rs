//! # Session manager
//!
//! Sessions hold only the principal's id ([`SessionPayload`]); every request re-reads
//! the user from the store, so a session never serves stale account data. The same
//! payload is written for local and federated logins.
//!
//! Anything short of "payload decodes and the id resolves to a user" counts as not
//! authenticated: a missing key, a tampered value, a session backend failure, or a
//! store failure all yield `None` and are logged.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;
use uuid::Uuid;

use super::oauth::PendingAuthorization;
use super::AuthError;
use crate::db::UserStore;
use crate::models::User;

/// Key for storing the principal in the session.
pub const SESSION_USER_KEY: &str = "user";

/// Key for the in-flight OAuth authorization.
pub const OAUTH_PENDING_KEY: &str = "oauth_pending";

/// Serialized principal stored in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub user_id: Uuid,
}

pub fn serialize(user: &User) -> SessionPayload {
    SessionPayload { user_id: user.id }
}

/// Resolve a payload back to its user.
pub async fn deserialize(store: &dyn UserStore, payload: &SessionPayload) -> Option<User> {
    match store.find_by_id(payload.user_id).await {
        Ok(user) => user,
        Err(e) => {
            warn!(user_id = %payload.user_id, "failed to load session user: {}", e);
            None
        }
    }
}

/// Establish `user` as the session principal.
///
/// The session id is cycled first so an id planted before login cannot be reused.
pub async fn login(session: &Session, user: &User) -> Result<(), AuthError> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, serialize(user)).await?;
    Ok(())
}

/// The user this session belongs to, if it is authenticated.
pub async fn current_user(session: &Session, store: &dyn UserStore) -> Option<User> {
    let payload = match session.get::<SessionPayload>(SESSION_USER_KEY).await {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(e) => {
            warn!("discarding unreadable session payload: {}", e);
            return None;
        }
    };

    deserialize(store, &payload).await
}

pub async fn is_authenticated(session: &Session, store: &dyn UserStore) -> bool {
    current_user(session, store).await.is_some()
}

/// Destroy the session and its record.
pub async fn logout(session: &Session) -> Result<(), AuthError> {
    session.flush().await?;
    Ok(())
}

pub async fn store_pending_authorization(
    session: &Session,
    pending: &PendingAuthorization,
) -> Result<(), AuthError> {
    session.insert(OAUTH_PENDING_KEY, pending).await?;
    Ok(())
}

/// Remove and return the in-flight authorization, so a callback can run only once.
pub async fn take_pending_authorization(
    session: &Session,
) -> Result<Option<PendingAuthorization>, AuthError> {
    Ok(session.remove(OAUTH_PENDING_KEY).await?)
}
