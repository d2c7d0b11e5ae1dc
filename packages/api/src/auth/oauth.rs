//! # OAuth 2.0 authorization-code client
//!
//! Implements the Authorization Code flow with PKCE against a single provider (Google
//! by default, see [`OAuthConfig::google`]). It produces the [`FederatedProfile`] that
//! [`FederatedStrategy`](super::FederatedStrategy) turns into a local user.
//!
//! ## Types
//!
//! - [`ConfiguredClient`] — a fully-typed `oauth2::Client` alias with auth and token
//!   endpoints set.
//! - [`PendingAuthorization`] — CSRF state + PKCE verifier, kept in the session between
//!   the redirect to the provider and the callback.
//! - [`OAuthClient`] — the public handler that wraps an [`OAuthConfig`].
//!
//! ## Flow
//!
//! 1. **[`authorize_url`](OAuthClient::authorize_url)** — builds an authorization URL
//!    with the configured scopes, a random CSRF state and a PKCE S256 challenge.
//!
//! 2. **[`exchange_code`](OAuthClient::exchange_code)** — called by the callback route
//!    once the state has been checked. It exchanges the code + PKCE verifier for an
//!    access token and fetches the profile from the userinfo endpoint.

use oauth2::basic::BasicClient;
use oauth2::url::Url;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, TokenResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::config::OAuthConfig;
use super::federated::FederatedProfile;
use super::AuthError;

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// State carried across the provider redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAuthorization {
    pub csrf_state: String,
    pub pkce_verifier: String,
}

impl PendingAuthorization {
    /// Whether the `state` returned by the provider matches the one we issued.
    pub fn matches(&self, state: &str) -> bool {
        self.csrf_state == state
    }
}

/// OAuth handler for one provider.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl OAuthClient {
    pub fn new(config: OAuthConfig) -> Result<Self, AuthError> {
        // The token endpoint must not follow redirects.
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::OAuth(e.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Generate authorization URL with PKCE.
    pub fn authorize_url(&self) -> (Url, PendingAuthorization) {
        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.config.scopes.iter().cloned())
            .set_pkce_challenge(pkce_challenge)
            .url();

        let pending = PendingAuthorization {
            csrf_state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        };

        (auth_url, pending)
    }

    /// Exchange authorization code for tokens and fetch the provider profile.
    #[instrument(skip_all)]
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: &str,
    ) -> Result<FederatedProfile, AuthError> {
        let client = self.create_client();

        let token_result = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::OAuth(format!("token exchange failed: {e}")))?;

        let access_token = token_result.access_token().secret();

        let profile: FederatedProfile = self
            .http
            .get(self.config.userinfo_url.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AuthError::OAuth(format!("userinfo request failed: {e}")))?
            .json()
            .await
            .map_err(|e| AuthError::InvalidProfile(e.to_string()))?;

        debug!(subject = %profile.subject, "fetched federated profile");

        Ok(profile)
    }
}
