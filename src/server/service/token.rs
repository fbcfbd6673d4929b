//! JWT issuing and verification.
//!
//! Tokens are HS256-signed and carry `{userId, tokenType, iat, exp}`. Access and
//! refresh tokens share a key and are told apart by `tokenType`, so a refresh token
//! is never accepted as a bearer token and vice versa.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::server::{
    error::{auth::AuthError, internal::InternalError},
    model::user::TokenPair,
};

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL: Duration = Duration::hours(24);
/// Lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL: Duration = Duration::days(30);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i32,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenService<'a> {
    secret: &'a str,
}

impl<'a> TokenService<'a> {
    pub fn new(secret: &'a str) -> Self {
        Self { secret }
    }

    /// Signs a token of the given type issued at `now`.
    ///
    /// # Returns
    /// - `Ok(String)` - Encoded JWT
    /// - `Err(InternalError::TokenEncode)` - Signing failed
    pub fn issue(
        &self,
        user_id: i32,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, InternalError> {
        let ttl = match token_type {
            TokenType::Access => ACCESS_TOKEN_TTL,
            TokenType::Refresh => REFRESH_TOKEN_TTL,
        };

        let claims = Claims {
            user_id,
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(InternalError::TokenEncode)
    }

    /// Signs a fresh access and refresh token for the user.
    pub fn issue_pair(&self, user_id: i32) -> Result<TokenPair, InternalError> {
        let now = Utc::now();

        Ok(TokenPair {
            access: self.issue(user_id, TokenType::Access, now)?,
            refresh: self.issue(user_id, TokenType::Refresh, now)?,
        })
    }

    /// Verifies signature, expiry and token type.
    ///
    /// # Arguments
    /// - `token` - Encoded JWT
    /// - `expected` - Type the caller accepts
    ///
    /// # Returns
    /// - `Ok(Claims)` - Valid token of the expected type
    /// - `Err(AuthError::InvalidToken)` - Access token expected but check failed
    /// - `Err(AuthError::InvalidRefreshToken)` - Refresh token expected but check failed
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let reject = |reason: String| match expected {
            TokenType::Access => AuthError::InvalidToken(reason),
            TokenType::Refresh => AuthError::InvalidRefreshToken(reason),
        };

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| reject(e.to_string()))?;

        if data.claims.token_type != expected {
            return Err(reject(format!(
                "expected {:?} token, got {:?}",
                expected, data.claims.token_type
            )));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn verifies_issued_access_token() {
        let tokens = TokenService::new(SECRET);
        let token = tokens.issue(7, TokenType::Access, Utc::now()).unwrap();

        let claims = tokens.verify(&token, TokenType::Access).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL.num_seconds());
    }

    #[test]
    fn refresh_token_outlives_access_token() {
        let tokens = TokenService::new(SECRET);
        let pair = tokens.issue_pair(3).unwrap();

        let access = tokens.verify(&pair.access, TokenType::Access).unwrap();
        let refresh = tokens.verify(&pair.refresh, TokenType::Refresh).unwrap();

        assert_eq!(refresh.exp - refresh.iat, REFRESH_TOKEN_TTL.num_seconds());
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn rejects_wrong_token_type() {
        let tokens = TokenService::new(SECRET);
        let pair = tokens.issue_pair(3).unwrap();

        assert!(matches!(
            tokens.verify(&pair.refresh, TokenType::Access),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(matches!(
            tokens.verify(&pair.access, TokenType::Refresh),
            Err(AuthError::InvalidRefreshToken(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let tokens = TokenService::new(SECRET);
        let issued = Utc::now() - Duration::days(2);
        let token = tokens.issue(1, TokenType::Access, issued).unwrap();

        assert!(tokens.verify(&token, TokenType::Access).is_err());
    }

    #[test]
    fn rejects_foreign_signature() {
        let token = TokenService::new("other-secret")
            .issue(1, TokenType::Access, Utc::now())
            .unwrap();

        assert!(TokenService::new(SECRET)
            .verify(&token, TokenType::Access)
            .is_err());
        assert!(TokenService::new(SECRET)
            .verify("not-a-jwt", TokenType::Access)
            .is_err());
    }
}
