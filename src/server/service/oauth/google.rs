use oauth2::TokenResponse;
use serde::Deserialize;

use crate::server::{
    config::GOOGLE_USERINFO_URL,
    error::{auth::AuthError, AppError},
    model::user::OAuthIdentity,
    service::oauth::OAuthService,
    state::OAuth2TokenResponse,
};

/// OpenID Connect userinfo response.
#[derive(Deserialize, Debug)]
struct GoogleUserInfo {
    sub: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

impl<'a> OAuthService<'a> {
    /// Fetches the signed-in Google account from the userinfo endpoint.
    ///
    /// # Returns
    /// - `Ok(OAuthIdentity)` - Account with a verified email
    /// - `Err(AuthError::OAuthExchange)` - No verified email on the account
    /// - `Err(AppError::ReqwestErr)` - The userinfo request failed
    pub async fn google_identity(
        &self,
        token: &OAuth2TokenResponse,
    ) -> Result<OAuthIdentity, AppError> {
        let info = self
            .http_client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<GoogleUserInfo>()
            .await?;

        let email = match info.email {
            Some(email) if info.email_verified => email,
            _ => {
                return Err(AuthError::OAuthExchange(format!(
                    "google account {} has no verified email",
                    info.sub
                ))
                .into())
            }
        };

        Ok(OAuthIdentity {
            oauth_id: self.provider.oauth_id(&info.sub),
            email,
            first_name: info.given_name,
            last_name: info.family_name,
            profile_picture_url: info.picture,
        })
    }
}
