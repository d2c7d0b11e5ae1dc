//! HTTP routes.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | [`pages::home`] |
//! | GET, POST | `/login` | [`local::login_page`], [`local::login`] |
//! | GET, POST | `/register` | [`local::register_page`], [`local::register`] |
//! | GET | `/logout` | [`local::logout`] |
//! | GET | `/auth/google` | [`oauth::start`] |
//! | GET | `/auth/google/callback` | [`oauth::callback`] |
//! | GET | `/secrets` | [`pages::secrets`] (guarded) |

pub mod local;
pub mod oauth;
pub mod pages;


use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::settings::SessionSettings;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(local::login_page).post(local::login))
        .route("/register", get(local::register_page).post(local::register))
        .route("/logout", get(local::logout))
        .route("/auth/google", get(oauth::start))
        .route("/auth/google/callback", get(oauth::callback))
        .route("/secrets", get(pages::secrets))
        .with_state(state)
}

/// Wrap `router` with signed session cookies backed by `store`, plus request tracing.
pub fn with_sessions<S>(router: Router, store: S, settings: &SessionSettings, key: Key) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(store)
        .with_secure(settings.secure_cookie)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(settings.inactivity_days)))
        .with_signed(key);

    router.layer(session_layer).layer(TraceLayer::new_for_http())
}
