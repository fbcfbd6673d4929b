//! Type-safe session management wrappers.
//!
//! Sessions only carry OAuth CSRF state between the provider redirect and the
//! callback. API authentication uses bearer tokens and never touches the session.

use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    service::oauth::OAuthProvider,
};

/// CSRF protection session management.
///
/// Tokens are stored per provider during login initiation and validated during the
/// OAuth callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
    provider: OAuthProvider,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session, provider: OAuthProvider) -> Self {
        Self { session, provider }
    }

    fn key(&self) -> String {
        format!("oauth:{}:csrf_token", self.provider.as_str())
    }

    /// Stores a CSRF token for the provider.
    ///
    /// # Returns
    /// - `Ok(())` - Token successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(&self.key(), token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token, so each token can only be used once.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(&self.key()).await?;
        Ok(token)
    }

    /// Consumes the stored token and checks it against the callback state.
    ///
    /// # Returns
    /// - `Ok(())` - The state matches the stored token
    /// - `Err(AuthError::CsrfValidationFailed)` - No stored token or a mismatch
    pub async fn validate(&self, state: &str) -> Result<(), AppError> {
        match self.take_token().await? {
            Some(stored) if stored == state => Ok(()),
            _ => Err(AuthError::CsrfValidationFailed.into()),
        }
    }
}
