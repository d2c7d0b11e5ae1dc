//! Email + password login, registration, and logout.

use api::auth::session;
use api::{AuthContext, AuthOutcome, Credentials, Rejection};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, info};

use crate::error::AppError;
use crate::views;

pub const INVALID_CREDENTIALS: &str = "Please enter a valid email and password.";
pub const EMAIL_TAKEN: &str = "Email already exists.";

#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// Message for an `?error=` code set by the OAuth callback.
fn login_error_message(code: &str) -> &'static str {
    match code {
        "oauth_state" => "Your sign-in link expired. Please try again.",
        "oauth_denied" => "Google sign-in was cancelled.",
        _ => "Could not sign in with Google.",
    }
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> Response {
    views::login(query.error.as_deref().map(login_error_message))
}

pub async fn register_page() -> Response {
    views::register(None)
}

pub async fn login(
    State(auth): State<AuthContext>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let credentials = Credentials::Local {
        username: form.username,
        password: form.password,
    };

    match auth.authenticate(&credentials).await? {
        AuthOutcome::Success(user) => {
            session::login(&session, &user).await?;
            info!(user_id = %user.id, "local login");
            Ok(Redirect::to("/secrets").into_response())
        }
        AuthOutcome::Rejected(reason) => {
            debug!(%reason, "local login rejected");
            Ok(views::login(Some(INVALID_CREDENTIALS)))
        }
    }
}

pub async fn register(
    State(auth): State<AuthContext>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    match auth.register(&form.username, &form.password).await? {
        AuthOutcome::Success(user) => {
            session::login(&session, &user).await?;
            Ok(Redirect::to("/secrets").into_response())
        }
        AuthOutcome::Rejected(Rejection::EmailAlreadyExists) => {
            Ok(views::register(Some(EMAIL_TAKEN)))
        }
        AuthOutcome::Rejected(reason) => {
            debug!(%reason, "registration rejected");
            Ok(views::register(Some(INVALID_CREDENTIALS)))
        }
    }
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session::logout(&session).await?;
    Ok(Redirect::to("/"))
}
