use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PaginatedDto, PaginationQuery},
        user::{
            AuthPayloadDto, CheckEmailQuery, EmailExistsDto, RefreshTokenDto, SignInDto,
            SignUpDto, StreakDto, TokenPairDto, UpdateProfileDto, UpdateRoleDto, UserDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{page::PageRequest, user::UpdateProfileParams, user::User},
        service::user::UserService,
        state::AppState,
        util::extract::{AppJson, AppPath, AppQuery},
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Register with email and password.
///
/// # Returns
/// - `201 Created` - Tokens and the new user
/// - `202 Accepted` - Email or username already registered (`ACCOUNT_EXISTS`)
/// - `400 Bad Request` - Invalid username, email or password
#[utoipa::path(
    post,
    path = "/users/sign-up",
    tag = USER_TAG,
    request_body = SignUpDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AuthPayloadDto>),
        (status = 202, description = "Account already exists", body = ErrorDto),
        (status = 400, description = "Invalid sign-up data", body = ErrorDto)
    ),
)]
pub async fn sign_up(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignUpDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = UserService::new(&state.db, &state.config.jwt_secret)
        .sign_up(payload.username, payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Account created", session.into_dto())),
    ))
}

/// Sign in with email and password.
///
/// # Returns
/// - `200 OK` - Tokens and the user
/// - `401 Unauthorized` - Unknown email or wrong password (`INVALID_CREDENTIALS`)
#[utoipa::path(
    post,
    path = "/users/sign-in",
    tag = USER_TAG,
    request_body = SignInDto,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<AuthPayloadDto>),
        (status = 400, description = "Invalid sign-in data", body = ErrorDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto)
    ),
)]
pub async fn sign_in(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignInDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = UserService::new(&state.db, &state.config.jwt_secret)
        .sign_in(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::ok("Signed in", session.into_dto())))
}

/// Exchange a refresh token for a new token pair.
#[utoipa::path(
    post,
    path = "/users/refresh-token",
    tag = USER_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 200, description = "New token pair", body = ApiResponse<TokenPairDto>),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorDto)
    ),
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefreshTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = UserService::new(&state.db, &state.config.jwt_secret)
        .refresh(&payload.refresh_token)
        .await?;

    Ok(Json(ApiResponse::ok("Token refreshed", tokens.into_dto())))
}

#[utoipa::path(
    get,
    path = "/users/check-email",
    tag = USER_TAG,
    params(("email" = String, Query, description = "Email to look up")),
    responses(
        (status = 200, description = "Whether the email is registered", body = ApiResponse<EmailExistsDto>)
    ),
)]
pub async fn check_email(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CheckEmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let exists = UserService::new(&state.db, &state.config.jwt_secret)
        .email_exists(&query.email)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Email checked",
        EmailExistsDto { exists },
    )))
}

/// Get the caller's profile with preferences.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Profile", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db, &state.config.jwt_secret)
        .get_profile(auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok("Profile retrieved", user.into_dto())))
}

/// Update the caller's profile and preferences.
///
/// # Returns
/// - `200 OK` - The updated profile
/// - `400 Bad Request` - Invalid profile data
/// - `409 Conflict` - Username already taken
#[utoipa::path(
    put,
    path = "/users/me",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 409, description = "Username already taken", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = UserService::new(&state.db, &state.config.jwt_secret)
        .update_profile(auth_user.user_id, UpdateProfileParams::from(payload))
        .await?;

    Ok(Json(ApiResponse::ok("Profile updated", user.into_dto())))
}

/// Delete the caller's account.
#[utoipa::path(
    delete,
    path = "/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    UserService::new(&state.db, &state.config.jwt_secret)
        .delete(auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::message("Account deleted")))
}

/// Get the caller's daily streak. A lapsed streak reads as 0.
#[utoipa::path(
    get,
    path = "/users/me/streak",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Streak counters", body = ApiResponse<StreakDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_my_streak(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let streak = UserService::new(&state.db, &state.config.jwt_secret)
        .streak(auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok("Streak retrieved", streak.into_dto())))
}

/// List users.
///
/// # Access Control
/// - `Admin` - Only admins can list users
#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page, 1 to 100")
    ),
    responses(
        (status = 200, description = "Paginated users", body = ApiResponse<PaginatedDto<UserDto>>),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    let request = PageRequest::new(query.page, query.page_size)?;

    let page = UserService::new(&state.db, &state.config.jwt_secret)
        .list(request)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Users retrieved",
        page.into_dto(User::into_dto),
    )))
}

/// Get a user.
///
/// # Access Control
/// - `Admin` - Only admins can view other users
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = ApiResponse<UserDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(user_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db, &state.config.jwt_secret)
        .get(user_id)
        .await?;

    Ok(Json(ApiResponse::ok("User retrieved", user.into_dto())))
}

/// Change a user's role.
///
/// # Access Control
/// - `Admin` - Only admins can change roles
#[utoipa::path(
    put,
    path = "/users/{user_id}/role",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<UserDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn set_user_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(user_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db, &state.config.jwt_secret)
        .set_role(user_id, payload.role)
        .await?;

    Ok(Json(ApiResponse::ok("Role updated", user.into_dto())))
}
