//! OAuth provider configuration.

use oauth2::url::{ParseError, Url};
use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, Scope, TokenUrl};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub userinfo_url: Url,
    pub redirect_url: RedirectUrl,
    pub scopes: Vec<Scope>,
}

impl OAuthConfig {
    /// Google endpoints with the `openid`, `email` and `profile` scopes.
    pub fn google(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: &str,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            client_id: ClientId::new(client_id.into()),
            client_secret: ClientSecret::new(client_secret.into()),
            auth_url: AuthUrl::new(GOOGLE_AUTH_URL.to_string())?,
            token_url: TokenUrl::new(GOOGLE_TOKEN_URL.to_string())?,
            userinfo_url: Url::parse(GOOGLE_USERINFO_URL)?,
            redirect_url: RedirectUrl::new(redirect_url.to_string())?,
            scopes: ["openid", "email", "profile"]
                .into_iter()
                .map(|s| Scope::new(s.to_string()))
                .collect(),
        })
    }

    /// Point the client at another provider's endpoints.
    pub fn with_endpoints(
        mut self,
        auth_url: &str,
        token_url: &str,
        userinfo_url: &str,
    ) -> Result<Self, ParseError> {
        self.auth_url = AuthUrl::new(auth_url.to_string())?;
        self.token_url = TokenUrl::new(token_url.to_string())?;
        self.userinfo_url = Url::parse(userinfo_url)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_defaults() {
        let config =
            OAuthConfig::google("id", "secret", "http://localhost:3000/auth/google/callback")
                .unwrap();
        assert_eq!(config.client_id.as_str(), "id");
        assert_eq!(config.auth_url.as_str(), GOOGLE_AUTH_URL);
        assert_eq!(config.scopes.len(), 3);
    }

    #[test]
    fn test_invalid_redirect_url() {
        assert!(OAuthConfig::google("id", "secret", "not a url").is_err());
    }

    #[test]
    fn test_custom_endpoints() {
        let config = OAuthConfig::google("id", "secret", "http://localhost/cb")
            .unwrap()
            .with_endpoints(
                "https://idp.example/authorize",
                "https://idp.example/token",
                "https://idp.example/userinfo",
            )
            .unwrap();
        assert_eq!(config.token_url.as_str(), "https://idp.example/token");
        assert_eq!(config.userinfo_url.as_str(), "https://idp.example/userinfo");
    }
}
