//! Authentication: password hashing, the local and federated strategies, the OAuth
//! client, and the session manager.

mod config;
mod context;
mod federated;
mod local;
mod oauth;
mod outcome;
mod password;
pub mod session;

#[cfg(test)]
mod test_support;

pub use config::{OAuthConfig, GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL, GOOGLE_USERINFO_URL};
pub use context::{AuthContext, Credentials};
pub use federated::{FederatedProfile, FederatedStrategy};
pub use local::LocalStrategy;
pub use oauth::{OAuthClient, PendingAuthorization};
pub use outcome::{AuthError, AuthOutcome, Rejection};
pub use password::PasswordHasher;
pub use session::{SessionPayload, SESSION_USER_KEY};
