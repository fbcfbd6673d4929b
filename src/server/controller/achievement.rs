use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        achievement::{
            AchievementDto, CreateAchievementDto, UpdateAchievementDto, UserAchievementDto,
        },
        api::{ApiResponse, ErrorDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::achievement::{
            Achievement, CreateAchievementParams, EarnedAchievement, UpdateAchievementParams,
        },
        service::achievement::AchievementService,
        state::AppState,
        util::extract::{AppJson, AppPath},
    },
};

/// Tag for grouping achievement endpoints in OpenAPI documentation
pub static ACHIEVEMENT_TAG: &str = "achievement";

#[utoipa::path(
    get,
    path = "/achievements",
    tag = ACHIEVEMENT_TAG,
    responses(
        (status = 200, description = "All achievements", body = ApiResponse<Vec<AchievementDto>>)
    ),
    security(("bearer" = []))
)]
pub async fn list_achievements(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let achievements = AchievementService::new(&state.db).list().await?;

    Ok(Json(ApiResponse::ok(
        "Achievements retrieved",
        achievements
            .into_iter()
            .map(Achievement::into_dto)
            .collect::<Vec<_>>(),
    )))
}

/// List the achievements the caller has earned, most recent first.
#[utoipa::path(
    get,
    path = "/achievements/me",
    tag = ACHIEVEMENT_TAG,
    responses(
        (status = 200, description = "Earned achievements", body = ApiResponse<Vec<UserAchievementDto>>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_my_achievements(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let earned = AchievementService::new(&state.db)
        .earned_by(auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Achievements retrieved",
        earned
            .into_iter()
            .map(EarnedAchievement::into_dto)
            .collect::<Vec<_>>(),
    )))
}

#[utoipa::path(
    get,
    path = "/achievements/{achievement_id}",
    tag = ACHIEVEMENT_TAG,
    params(("achievement_id" = i32, Path, description = "Achievement id")),
    responses(
        (status = 200, description = "Achievement", body = ApiResponse<AchievementDto>),
        (status = 404, description = "Achievement not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_achievement(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    AppPath(achievement_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let achievement = AchievementService::new(&state.db)
        .get(achievement_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Achievement retrieved",
        achievement.into_dto(),
    )))
}

/// Create an achievement.
///
/// # Access Control
/// - `Admin` - Only admins can manage achievements
#[utoipa::path(
    post,
    path = "/achievements",
    tag = ACHIEVEMENT_TAG,
    request_body = CreateAchievementDto,
    responses(
        (status = 200, description = "Achievement created", body = ApiResponse<AchievementDto>),
        (status = 400, description = "Invalid achievement data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_achievement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<CreateAchievementDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let achievement = AchievementService::new(&state.db)
        .create(CreateAchievementParams::from(payload))
        .await?;

    Ok(Json(ApiResponse::ok("Achievement created", achievement.into_dto())))
}

/// Update an achievement.
///
/// # Access Control
/// - `Admin` - Only admins can manage achievements
#[utoipa::path(
    put,
    path = "/achievements/{achievement_id}",
    tag = ACHIEVEMENT_TAG,
    params(("achievement_id" = i32, Path, description = "Achievement id")),
    request_body = UpdateAchievementDto,
    responses(
        (status = 200, description = "Achievement updated", body = ApiResponse<AchievementDto>),
        (status = 400, description = "Invalid achievement data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Achievement not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_achievement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(achievement_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateAchievementDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let achievement = AchievementService::new(&state.db)
        .update(achievement_id, UpdateAchievementParams::from(payload))
        .await?;

    Ok(Json(ApiResponse::ok(
        "Achievement updated",
        achievement.into_dto(),
    )))
}

/// Delete an achievement along with every grant of it.
///
/// # Access Control
/// - `Admin` - Only admins can manage achievements
#[utoipa::path(
    delete,
    path = "/achievements/{achievement_id}",
    tag = ACHIEVEMENT_TAG,
    params(("achievement_id" = i32, Path, description = "Achievement id")),
    responses(
        (status = 200, description = "Achievement deleted"),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Achievement not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_achievement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(achievement_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;

    AchievementService::new(&state.db)
        .delete(achievement_id)
        .await?;

    Ok(Json(ApiResponse::message("Achievement deleted")))
}

/// Grant an achievement to a user. Granting twice keeps the first timestamp.
///
/// # Access Control
/// - `Admin` - Only admins can grant achievements
#[utoipa::path(
    post,
    path = "/achievements/{achievement_id}/users/{user_id}",
    tag = ACHIEVEMENT_TAG,
    params(
        ("achievement_id" = i32, Path, description = "Achievement id"),
        ("user_id" = i32, Path, description = "User receiving the achievement")
    ),
    responses(
        (status = 200, description = "Achievement granted", body = ApiResponse<UserAchievementDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Achievement or user not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn grant_achievement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((achievement_id, user_id)): AppPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;

    let earned = AchievementService::new(&state.db)
        .grant(achievement_id, user_id)
        .await?;

    Ok(Json(ApiResponse::ok("Achievement granted", earned.into_dto())))
}
