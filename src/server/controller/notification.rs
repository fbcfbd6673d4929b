use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PaginatedDto},
        notification::{
            CreateNotificationDto, NotificationDto, NotificationListQuery, UnreadCountDto,
            UpdatedCountDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            notification::{CreateNotificationParams, Notification},
            page::PageRequest,
        },
        service::notification::NotificationService,
        state::AppState,
        util::extract::{AppJson, AppPath, AppQuery},
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notification";

/// List the caller's notifications, newest first.
///
/// # Returns
/// - `200 OK` - Paginated notifications
/// - `400 Bad Request` - Page or page size out of range
#[utoipa::path(
    get,
    path = "/notifications",
    tag = NOTIFICATION_TAG,
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page, 1 to 100"),
        ("unreadOnly" = Option<bool>, Query, description = "Only return unread notifications")
    ),
    responses(
        (status = 200, description = "Paginated notifications", body = ApiResponse<PaginatedDto<NotificationDto>>),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppQuery(query): AppQuery<NotificationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.page_size)?;

    let page = NotificationService::new(&state.db)
        .list(auth_user.user_id, query.unread_only, request)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Notifications retrieved",
        page.into_dto(Notification::into_dto),
    )))
}

#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Unread notification count", body = ApiResponse<UnreadCountDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn unread_count(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let count = NotificationService::new(&state.db)
        .unread_count(auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Unread count retrieved",
        UnreadCountDto { count },
    )))
}

/// Mark one of the caller's notifications read.
///
/// # Returns
/// - `200 OK` - Marked read, or it already was
/// - `404 Not Found` - No such notification for this user
#[utoipa::path(
    put,
    path = "/notifications/{notification_id}/read",
    tag = NOTIFICATION_TAG,
    params(("notification_id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked read"),
        (status = 404, description = "Notification not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn mark_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(notification_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    NotificationService::new(&state.db)
        .mark_read(auth_user.user_id, notification_id)
        .await?;

    Ok(Json(ApiResponse::message("Notification marked read")))
}

#[utoipa::path(
    put,
    path = "/notifications/read-all",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Number of notifications changed", body = ApiResponse<UpdatedCountDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let updated = NotificationService::new(&state.db)
        .mark_all_read(auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Notifications marked read",
        UpdatedCountDto { updated },
    )))
}

#[utoipa::path(
    delete,
    path = "/notifications/{notification_id}",
    tag = NOTIFICATION_TAG,
    params(("notification_id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification deleted"),
        (status = 404, description = "Notification not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(notification_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    NotificationService::new(&state.db)
        .delete(auth_user.user_id, notification_id)
        .await?;

    Ok(Json(ApiResponse::message("Notification deleted")))
}

/// Send a notification to a user.
///
/// # Access Control
/// - `Admin` - Only admins can send notifications
#[utoipa::path(
    post,
    path = "/notifications",
    tag = NOTIFICATION_TAG,
    request_body = CreateNotificationDto,
    responses(
        (status = 200, description = "Notification sent", body = ApiResponse<NotificationDto>),
        (status = 400, description = "Invalid notification data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<CreateNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let notification = NotificationService::new(&state.db)
        .create(CreateNotificationParams::from(payload))
        .await?;

    Ok(Json(ApiResponse::ok("Notification sent", notification.into_dto())))
}
