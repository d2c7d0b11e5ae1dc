//! Google sign-in: redirect out to the provider, then complete the callback.

use std::sync::Arc;

use api::auth::{session, OAuthClient};
use api::{AuthContext, AuthError, AuthOutcome};
use axum::extract::{Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{error, info, warn};

use crate::error::AppError;

#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn login_error(code: &str) -> Redirect {
    Redirect::to(&format!("/login?error={code}"))
}

pub async fn start(
    State(oauth): State<Arc<OAuthClient>>,
    session: Session,
) -> Result<Redirect, AppError> {
    let (url, pending) = oauth.authorize_url();
    session::store_pending_authorization(&session, &pending).await?;
    Ok(Redirect::to(url.as_str()))
}

pub async fn callback(
    State(oauth): State<Arc<OAuthClient>>,
    State(auth): State<AuthContext>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AppError> {
    let pending = session::take_pending_authorization(&session).await?;

    if let Some(reason) = params.error {
        warn!("Google callback returned error: {}", reason);
        return Ok(login_error("oauth_denied"));
    }

    let Some(pending) = pending else {
        warn!("Google callback without a pending authorization");
        return Ok(login_error("oauth_state"));
    };
    if !params.state.as_deref().is_some_and(|s| pending.matches(s)) {
        warn!("Google callback state mismatch");
        return Ok(login_error("oauth_state"));
    }
    let Some(code) = params.code else {
        error!("Google callback missing code");
        return Ok(login_error("missing_code"));
    };

    let profile = match oauth.exchange_code(&code, &pending.pkce_verifier).await {
        Ok(profile) => profile,
        Err(e) => {
            error!("Google OAuth exchange error: {}", e);
            return Ok(login_error("oauth_error"));
        }
    };

    match auth.federated().complete_callback(&profile).await {
        Ok(AuthOutcome::Success(user)) => {
            session::login(&session, &user).await?;
            info!(user_id = %user.id, "federated login");
            Ok(Redirect::to("/secrets"))
        }
        Ok(AuthOutcome::Rejected(reason)) => {
            warn!(%reason, "federated login rejected");
            Ok(login_error("oauth_error"))
        }
        Err(AuthError::InvalidProfile(e)) => {
            error!("unusable Google profile: {}", e);
            Ok(login_error("oauth_error"))
        }
        Err(e) => Err(e.into()),
    }
}
