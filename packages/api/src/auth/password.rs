//! # Password hashing and verification — Argon2id
//!
//! [`PasswordHasher`] is used by the local (email + password) authentication path and
//! by registration:
//!
//! - [`hash`](PasswordHasher::hash) — generates a random salt via [`OsRng`], hashes the
//!   plaintext with Argon2id and the configured cost, and returns a PHC-format string
//!   (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`). Salt and cost travel inside the
//!   string, which is what the `password_hash` column stores.
//!
//! - [`verify`](PasswordHasher::verify) — parses a PHC-format hash and checks whether
//!   the plaintext matches, using the parameters embedded in the hash. Returns
//!   `Ok(true)` on success, `Ok(false)` on mismatch, or `Err` if the stored hash is
//!   malformed.
//!
//! Argon2 is memory-hard and deliberately slow, so the async methods move the work
//! onto tokio's blocking pool instead of stalling the reactor. The `*_blocking`
//! variants are the synchronous core.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use super::AuthError;

/// Argon2id hasher with a fixed cost.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasswordHasher {
    /// Build a hasher with explicit cost: memory in KiB, iterations, and lanes.
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password. Returns a PHC-format string.
    pub fn hash_blocking(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHash(format!("failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a PHC-format hash string.
    pub fn verify_blocking(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswordHash(format!("invalid password hash: {e}")))?;
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash on the blocking pool.
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password)).await?
    }

    /// Verify on the blocking pool.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let hasher = self.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &hash)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_support::cheap_hasher;

    #[test]
    fn test_hash_verifies() {
        let hasher = cheap_hasher();
        for password in ["hunter2", "", "pässwörd with spaces"] {
            let hash = hasher.hash_blocking(password).unwrap();
            assert!(hash.starts_with("$argon2id$"));
            assert!(hasher.verify_blocking(password, &hash).unwrap());
        }
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hasher = cheap_hasher();
        let hash = hasher.hash_blocking("correct horse").unwrap();
        assert!(!hasher.verify_blocking("battery staple", &hash).unwrap());
        assert!(!hasher.verify_blocking("correct horse ", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = cheap_hasher();
        let first = hasher.hash_blocking("same").unwrap();
        let second = hasher.hash_blocking("same").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify_blocking("same", &first).unwrap());
        assert!(hasher.verify_blocking("same", &second).unwrap());
    }

    #[test]
    fn test_verify_uses_embedded_params() {
        let hash = cheap_hasher().hash_blocking("secret").unwrap();
        assert!(PasswordHasher::default()
            .verify_blocking("secret", &hash)
            .unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let err = cheap_hasher()
            .verify_blocking("secret", "not-a-phc-string")
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordHash(_)));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(PasswordHasher::with_cost(8, 0, 1).is_err());
    }

    #[tokio::test]
    async fn test_async_roundtrip() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("async secret").await.unwrap();
        assert!(hasher.verify("async secret", &hash).await.unwrap());
        assert!(!hasher.verify("other", &hash).await.unwrap());
    }
}
