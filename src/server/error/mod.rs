//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into the uniform JSON envelope. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints. Every failure
//! response carries `success: false`, a human-readable message and a fixed
//! `errorCode`.

pub mod auth;
pub mod config;
pub mod internal;
pub mod storage;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::{
    model::api::{ErrorCode, ErrorDto},
    server::error::{
        auth::AuthError, config::ConfigError, internal::InternalError, storage::StorageError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain-specific errors like `AuthError` handle
/// their own response mapping, while generic variants provide standard status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for custom status code mapping
    /// (401 Unauthorized, 403 Forbidden, etc.).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    ///
    /// `RecordNotFound` results in 404 `NO_DATA`, unique constraint violations in
    /// 409 `DUPLICATE_VALUE`, everything else in 500 `DATABASE_FAIL` with the details
    /// logged server-side only.
    #[error(transparent)]
    DbErr(#[from] DbErr),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Object store failure.
    #[error(transparent)]
    StorageErr(#[from] StorageError),

    /// Unexpected state inside the application itself.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Socket or filesystem error during startup.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Unique value already taken.
    ///
    /// Results in 409 Conflict with `DUPLICATE_VALUE`.
    #[error("{0}")]
    Conflict(String),

    /// Sign-up attempted for an email or username that is already registered.
    ///
    /// Results in 202 Accepted with `ACCOUNT_EXISTS`.
    #[error("{0}")]
    AccountExists(String),
}

/// Builds a failure envelope with the given status, code and message.
pub(crate) fn error_response(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            success: false,
            message: message.into(),
            error_code: code,
        }),
    )
        .into_response()
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 202 Accepted - For `AccountExists`
/// - 400 Bad Request - For `BadRequest` and request rejections
/// - 404 Not Found - For `NotFound` and `DbErr::RecordNotFound`
/// - 409 Conflict - For `Conflict` and unique constraint violations
/// - 500 Internal Server Error - For all other error types (DbErr, SessionErr, etc.)
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound, msg),
            Self::BadRequest(msg) => {
                error_response(StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest, msg)
            }
            Self::Conflict(msg) => {
                error_response(StatusCode::CONFLICT, ErrorCode::DuplicateValue, msg)
            }
            Self::AccountExists(msg) => {
                error_response(StatusCode::ACCEPTED, ErrorCode::AccountExists, msg)
            }
            Self::DbErr(err) => database_error_response(err),
            err => InternalServerError(err).into_response(),
        }
    }
}

fn database_error_response(err: DbErr) -> Response {
    if let DbErr::RecordNotFound(msg) = &err {
        return error_response(StatusCode::NOT_FOUND, ErrorCode::NoData, msg.clone());
    }

    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        tracing::debug!("Unique constraint violation: {}", detail);
        return error_response(
            StatusCode::CONFLICT,
            ErrorCode::DuplicateValue,
            "A record with the same value already exists",
        );
    }

    tracing::error!("Database error: {}", err);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::DatabaseFail,
        "Database operation failed",
    )
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError,
            "Internal server error",
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}
