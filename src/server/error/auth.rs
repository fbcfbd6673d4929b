use axum::{http::StatusCode, response::IntoResponse, response::Response};
use thiserror::Error;

use crate::{model::api::ErrorCode, server::error::error_response};

#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token on a route that requires one.
    #[error("Missing bearer token")]
    MissingToken,

    /// Bearer token is malformed, expired or signed with another key.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    /// Token is valid but the user it names no longer exists.
    #[error("User {0} not found in database")]
    UserNotInDatabase(i32),

    /// Refresh token is malformed, expired or is an access token.
    #[error("Invalid refresh token: {0}")]
    InvalidRefreshToken(String),

    /// Unknown email or wrong password on sign-in.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// User lacks the permission required by the route.
    ///
    /// # Fields
    /// - User id
    /// - Description of the attempted action, logged only
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback does not match the token stored
    /// in the session. Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// OAuth provider rejected the code exchange or returned an unusable identity.
    #[error("OAuth exchange failed: {0}")]
    OAuthExchange(String),
}

/// Converts authentication errors into HTTP responses.
///
/// All errors are logged at debug level for diagnostics while keeping client-facing
/// messages generic to avoid information leakage.
///
/// # Returns
/// - 400 Bad Request - For CSRF failures
/// - 401 Unauthorized - For missing, invalid or refused credentials
/// - 403 Forbidden - For permission failures
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Authentication required",
                )
            }
            Self::InvalidRefreshToken(_) => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::InvalidToken,
                "Invalid or expired refresh token",
            ),
            Self::InvalidCredentials => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::InvalidCredentials,
                "Invalid email or password",
            ),
            Self::AccessDenied(_, _) => error_response(
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "You do not have permission to perform this action",
            ),
            Self::CsrfValidationFailed => error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidRequest,
                "There was an issue logging you in, please try again.",
            ),
            Self::OAuthExchange(_) => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "There was an issue logging you in, please try again.",
            ),
        }
    }
}
