//! # Web crate — axum front end for the Secrets app
//!
//! Wires the authentication core from `api` into an HTTP router: settings, shared
//! state, the session layer, the access guard, and the route handlers.

pub mod error;
pub mod guard;
pub mod handlers;
pub mod settings;
pub mod state;
pub mod views;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use api::auth::{OAuthClient, PasswordHasher};
use api::db::PgUserStore;
use api::AuthContext;
use tokio::task::JoinHandle;
use tower_sessions::{session_store, ExpiredDeletion};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::{error, info};

use crate::settings::Settings;
use crate::state::AppState;

/// How often expired rows are purged from the session table.
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Connect, migrate, and serve until Ctrl-C.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let pool = api::db::connect(&settings.database.url, settings.database.max_connections)
        .await
        .context("failed to connect to database")?;

    api::db::migrate(&pool)
        .await
        .context("failed to run migrations")?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("failed to migrate session store")?;

    let deletion_task = spawn_session_cleanup(session_store.clone(), SESSION_CLEANUP_INTERVAL);

    let hasher = PasswordHasher::with_cost(
        settings.hasher.memory_kib,
        settings.hasher.iterations,
        settings.hasher.parallelism,
    )?;
    let auth = AuthContext::new(Arc::new(PgUserStore::new(pool)), hasher);
    let oauth = OAuthClient::new(settings.oauth.to_config()?)?;
    let key = settings.session.signing_key()?;

    let app = handlers::with_sessions(
        handlers::router(AppState::new(auth, oauth)),
        session_store,
        &settings.session,
        key,
    );

    let addr = settings.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    let served = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    deletion_task.abort();
    served?;

    info!("Server stopped");
    Ok(())
}

/// Purge expired sessions from `store` every `period` until the task is aborted.
pub fn spawn_session_cleanup<S>(store: S, period: Duration) -> JoinHandle<session_store::Result<()>>
where
    S: ExpiredDeletion + Clone,
{
    tokio::task::spawn(store.continuously_delete_expired(period))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
    }
}
