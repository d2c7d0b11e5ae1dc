use std::sync::Arc;

use tower_sessions::Session;
use tracing::{info, instrument};

use super::{
    session, AuthError, AuthOutcome, FederatedProfile, FederatedStrategy, LocalStrategy,
    PasswordHasher, Rejection,
};
use crate::db::{StoreError, UserStore};
use crate::models::User;

/// Credentials presented to [`AuthContext::authenticate`], one variant per strategy.
#[derive(Debug, Clone)]
pub enum Credentials {
    Local { username: String, password: String },
    Federated(FederatedProfile),
}

/// Everything a request handler needs to authenticate: the user store and the hasher.
///
/// Built once at startup and cloned into handlers; tests build it over
/// [`MemoryUserStore`](crate::db::MemoryUserStore).
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl AuthContext {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    pub fn local(&self) -> LocalStrategy<'_> {
        LocalStrategy::new(self.store(), &self.hasher)
    }

    pub fn federated(&self) -> FederatedStrategy<'_> {
        FederatedStrategy::new(self.store())
    }

    /// Dispatch to the strategy matching `credentials`.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        match credentials {
            Credentials::Local { username, password } => {
                self.local().authenticate(username, password).await
            }
            Credentials::Federated(profile) => self.federated().complete_callback(profile).await,
        }
    }

    /// Create a local account. A taken email is a rejection, not an error.
    #[instrument(skip_all)]
    pub async fn register(&self, username: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let password_hash = self.hasher.hash(password).await?;

        match self.store.insert_local(username, &password_hash).await {
            Ok(user) => {
                info!(user_id = %user.id, "registered local user");
                Ok(AuthOutcome::Success(user))
            }
            Err(StoreError::Conflict { .. }) => {
                Ok(AuthOutcome::Rejected(Rejection::EmailAlreadyExists))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn current_user(&self, session: &Session) -> Option<User> {
        session::current_user(session, self.store()).await
    }

    pub async fn is_authenticated(&self, session: &Session) -> bool {
        session::is_authenticated(session, self.store()).await
    }
}
