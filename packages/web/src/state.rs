use std::sync::Arc;

use api::auth::OAuthClient;
use api::AuthContext;
use axum::extract::FromRef;

/// Shared handler state, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthContext,
    pub oauth: Arc<OAuthClient>,
}

impl AppState {
    pub fn new(auth: AuthContext, oauth: OAuthClient) -> Self {
        Self {
            auth,
            oauth: Arc::new(oauth),
        }
    }
}

impl FromRef<AppState> for AuthContext {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<OAuthClient> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.oauth)
    }
}
