//! Application settings: defaults, then an optional `config.toml`, then `SECRETS__*`
//! environment variables (e.g. `SECRETS__DATABASE__URL`). A `.env` file is loaded
//! first when present.
//!
//! Required values have no default, so a missing one fails at startup rather than on
//! the first request that needs it.

use api::auth::OAuthConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tower_sessions::cookie::Key;

/// Minimum length of `session.secret`; the cookie signing key needs 64 bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    pub secret: String,
    pub inactivity_days: i64,
    pub secure_cookie: bool,
}

impl SessionSettings {
    /// Key used to sign the session id cookie.
    pub fn signing_key(&self) -> Result<Key, ConfigError> {
        if self.secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "session.secret must be at least {MIN_SESSION_SECRET_LEN} bytes"
            )));
        }
        Key::try_from(self.secret.as_bytes())
            .map_err(|e| ConfigError::Message(format!("invalid session.secret: {e}")))
    }
}

#[derive(Debug, Deserialize)]
pub struct OAuth {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl OAuth {
    pub fn to_config(&self) -> Result<OAuthConfig, ConfigError> {
        OAuthConfig::google(&self.client_id, &self.client_secret, &self.redirect_url)
            .and_then(|c| c.with_endpoints(&self.auth_url, &self.token_url, &self.userinfo_url))
            .map_err(|e| ConfigError::Message(format!("invalid oauth url: {e}")))
    }
}

/// Argon2 cost.
#[derive(Debug, Deserialize)]
pub struct Hasher {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
    pub session: SessionSettings,
    pub oauth: OAuth,
    pub hasher: Hasher,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_builder(
            Config::builder()
                .add_source(
                    File::with_name("config.toml")
                        .format(FileFormat::Toml)
                        .required(false),
                )
                .add_source(
                    Environment::with_prefix("SECRETS")
                        .prefix_separator("__")
                        .separator("__"),
                ),
        )
    }

    /// Apply defaults to `builder`, deserialize, and validate.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 5)?
            .set_default("session.inactivity_days", 7)?
            .set_default("session.secure_cookie", false)?
            .set_default("oauth.auth_url", api::auth::GOOGLE_AUTH_URL)?
            .set_default("oauth.token_url", api::auth::GOOGLE_TOKEN_URL)?
            .set_default("oauth.userinfo_url", api::auth::GOOGLE_USERINFO_URL)?
            .set_default("hasher.memory_kib", 19456)?
            .set_default("hasher.iterations", 2)?
            .set_default("hasher.parallelism", 1)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.session.signing_key()?;
        self.oauth.to_config()?;
        if self.session.inactivity_days <= 0 {
            return Err(ConfigError::Message(
                "session.inactivity_days must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
