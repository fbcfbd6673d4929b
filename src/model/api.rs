use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed error codes attached to every failure envelope.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidRequest,
    Unauthorized,
    InvalidToken,
    NotFound,
    NoData,
    DatabaseFail,
    InternalError,
    AccountExists,
    InvalidCredentials,
    Forbidden,
    DuplicateValue,
}

/// Failure envelope: `{success: false, message, errorCode}`.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDto {
    pub success: bool,
    pub message: String,
    pub error_code: ErrorCode,
}

/// Success envelope: `{success: true, message, payload?}`.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload),
        }
    }
}

impl ApiResponse<()> {
    /// Acknowledgement without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: None,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub total_items: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PaginatedDto<T> {
    pub items: Vec<T>,
    pub pagination: PaginationDto,
}

/// Plain `?page=&pageSize=` query.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}
