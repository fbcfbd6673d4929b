use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        storage::{CountQuery, DeleteObjectDto, ObjectCountDto, PresignRequestDto, PresignedUploadDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        service::storage::StorageService,
        state::AppState,
        util::extract::{AppJson, AppQuery},
    },
};

/// Tag for grouping storage endpoints in OpenAPI documentation
pub static STORAGE_TAG: &str = "storage";

/// Presign a direct upload.
///
/// The client PUTs the file to the returned URL with the same `Content-Type`
/// before `expiresAt`, then stores the returned key or URL on the resource.
#[utoipa::path(
    post,
    path = "/storage/presign",
    tag = STORAGE_TAG,
    request_body = PresignRequestDto,
    responses(
        (status = 200, description = "Presigned upload", body = ApiResponse<PresignedUploadDto>),
        (status = 400, description = "Invalid upload request", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Object store unavailable", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn presign_upload(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    AppJson(payload): AppJson<PresignRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let upload = StorageService::new(state.storage.as_ref())
        .presign_upload(payload.folder, &payload.filename, &payload.content_type)
        .await?;

    Ok(Json(ApiResponse::ok("Upload presigned", upload.into_dto())))
}

/// Delete an object by key.
///
/// # Access Control
/// - `Admin` - Only admins can delete stored objects
#[utoipa::path(
    delete,
    path = "/storage/objects",
    tag = STORAGE_TAG,
    request_body = DeleteObjectDto,
    responses(
        (status = 200, description = "Object deleted"),
        (status = 400, description = "Invalid key", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_object(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<DeleteObjectDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    StorageService::new(state.storage.as_ref())
        .delete(&payload.key)
        .await?;

    Ok(Json(ApiResponse::message("Object deleted")))
}

/// Count stored objects under a prefix.
///
/// # Access Control
/// - `Admin` - Only admins can inspect the store
#[utoipa::path(
    get,
    path = "/storage/count",
    tag = STORAGE_TAG,
    params(("prefix" = Option<String>, Query, description = "Key prefix, empty for all objects")),
    responses(
        (status = 200, description = "Object count", body = ApiResponse<ObjectCountDto>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn count_objects(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppQuery(query): AppQuery<CountQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;

    let count = StorageService::new(state.storage.as_ref())
        .count(&query.prefix)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Objects counted",
        ObjectCountDto {
            prefix: query.prefix,
            count,
        },
    )))
}
