//! Access guard for protected routes.

use api::{AuthContext, User};
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;
use tower_sessions::Session;

pub const LOGIN_PATH: &str = "/login";

/// The authenticated user behind the request.
///
/// Taking `CurrentUser` as a handler argument gates the handler: requests without a
/// session that resolves to a user are redirected to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthContext: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await else {
            return Err(Redirect::to(LOGIN_PATH));
        };

        AuthContext::from_ref(state)
            .current_user(&session)
            .await
            .map(CurrentUser)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}
