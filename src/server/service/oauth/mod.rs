//! OAuth2 sign-in with Google and Apple.
//!
//! Both providers use the authorization code flow: `login_url` builds the provider
//! redirect with a random CSRF state, and after the callback `exchange` trades the
//! code for tokens. Each provider module turns its token response into an
//! `OAuthIdentity`, which `UserService::oauth_sign_in` maps onto an account.

use oauth2::{AuthorizationCode, CsrfToken, Scope};
use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    state::{OAuth2Client, OAuth2TokenResponse},
};

pub mod apple;
pub mod google;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Apple,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Apple => "apple",
        }
    }

    fn scopes(&self) -> &'static [&'static str] {
        match self {
            Self::Google => &["openid", "email", "profile"],
            Self::Apple => &["name", "email"],
        }
    }

    /// Builds the stored OAuth id for a provider subject.
    pub fn oauth_id(&self, subject: &str) -> String {
        format!("{}:{}", self.as_str(), subject)
    }
}

pub struct OAuthService<'a> {
    pub provider: OAuthProvider,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
}

impl<'a> OAuthService<'a> {
    pub fn new(
        provider: OAuthProvider,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
    ) -> Self {
        Self {
            provider,
            http_client,
            oauth_client,
        }
    }

    /// Builds the provider authorization URL and the CSRF state to remember.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let mut request = self.oauth_client.authorize_url(CsrfToken::new_random);
        for scope in self.provider.scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }

        // Apple only returns name and email when the callback is a form post.
        if self.provider == OAuthProvider::Apple {
            request = request.add_extra_param("response_mode", "form_post");
        }

        request.url()
    }

    /// Exchanges an authorization code for the provider's token response.
    ///
    /// # Returns
    /// - `Ok(OAuth2TokenResponse)` - Access token and, when issued, an id token
    /// - `Err(AuthError::OAuthExchange)` - The provider rejected the code
    pub async fn exchange(&self, code: String) -> Result<OAuth2TokenResponse, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(self.http_client)
            .await
            .map_err(|e| {
                AuthError::OAuthExchange(format!("{} code exchange: {}", self.provider.as_str(), e))
            })?;

        Ok(token)
    }
}
