use std::fmt;

use crate::db::StoreError;
use crate::models::User;

/// Result of running a strategy: a verified user or an expected rejection.
///
/// Unexpected failures travel separately as [`AuthError`], so the full outcome of an
/// attempt is `Result<AuthOutcome, AuthError>`.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Success(User),
    Rejected(Rejection),
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Success(user) => Some(user),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Success(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Why an attempt was refused.
///
/// `IncorrectUsername` and `IncorrectPassword` are distinguishable, which lets a
/// caller enumerate registered emails if it surfaces them verbatim. The HTTP layer
/// renders a single generic message instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    IncorrectUsername,
    IncorrectPassword,
    EmailAlreadyExists,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Self::IncorrectUsername => "Incorrect username",
            Self::IncorrectPassword => "Incorrect password",
            Self::EmailAlreadyExists => "Email already exists",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Unexpected failure while authenticating.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("blocking task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),

    #[error("oauth exchange failed: {0}")]
    OAuth(String),

    #[error("invalid federated profile: {0}")]
    InvalidProfile(String),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}
