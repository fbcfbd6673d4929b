use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        course::{CreateUnitDto, UnitDto, UpdateUnitDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::course::{CreateUnitParams, Unit, UpdateUnitParams},
        service::unit::UnitService,
        state::AppState,
        util::extract::{AppJson, AppPath},
    },
};

/// Tag for grouping unit endpoints in OpenAPI documentation
pub static UNIT_TAG: &str = "unit";

/// List a course's units with their modules.
#[utoipa::path(
    get,
    path = "/courses/{course_id}/units",
    tag = UNIT_TAG,
    params(("course_id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Units ordered by number", body = ApiResponse<Vec<UnitDto>>),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn list_units(
    State(state): State<AppState>,
    AppPath(course_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let units = UnitService::new(&state.db).list(course_id).await?;

    Ok(Json(ApiResponse::ok(
        "Units retrieved",
        units.into_iter().map(Unit::into_dto).collect::<Vec<_>>(),
    )))
}

#[utoipa::path(
    get,
    path = "/courses/{course_id}/units/{unit_id}",
    tag = UNIT_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id")
    ),
    responses(
        (status = 200, description = "Unit with modules", body = ApiResponse<UnitDto>),
        (status = 404, description = "Unit not found in course", body = ErrorDto)
    ),
)]
pub async fn get_unit(
    State(state): State<AppState>,
    AppPath((course_id, unit_id)): AppPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let unit = UnitService::new(&state.db).get(course_id, unit_id).await?;

    Ok(Json(ApiResponse::ok("Unit retrieved", unit.into_dto())))
}

/// Create a unit.
///
/// Without a `unitNumber` the unit is appended after the highest existing number.
///
/// # Access Control
/// - `Admin` - Only admins can create units
///
/// # Returns
/// - `200 OK` - The created unit
/// - `403 Forbidden` - Caller is not an admin
/// - `404 Not Found` - Unknown course
/// - `409 Conflict` - Unit number already used in the course
#[utoipa::path(
    post,
    path = "/courses/{course_id}/units",
    tag = UNIT_TAG,
    params(("course_id" = i32, Path, description = "Course id")),
    request_body = CreateUnitDto,
    responses(
        (status = 200, description = "Unit created", body = ApiResponse<UnitDto>),
        (status = 400, description = "Invalid unit data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 409, description = "Duplicate unit number", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_unit(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(course_id): AppPath<i32>,
    AppJson(payload): AppJson<CreateUnitDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let unit = UnitService::new(&state.db)
        .create(CreateUnitParams::from_dto(course_id, payload))
        .await?;

    Ok(Json(ApiResponse::ok("Unit created", unit.into_dto())))
}

/// Update a unit.
///
/// # Access Control
/// - `Admin` - Only admins can update units
#[utoipa::path(
    put,
    path = "/courses/{course_id}/units/{unit_id}",
    tag = UNIT_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id")
    ),
    request_body = UpdateUnitDto,
    responses(
        (status = 200, description = "Unit updated", body = ApiResponse<UnitDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Unit not found in course", body = ErrorDto),
        (status = 409, description = "Duplicate unit number", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_unit(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((course_id, unit_id)): AppPath<(i32, i32)>,
    AppJson(payload): AppJson<UpdateUnitDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let unit = UnitService::new(&state.db)
        .update(UpdateUnitParams::from_dto(course_id, unit_id, payload))
        .await?;

    Ok(Json(ApiResponse::ok("Unit updated", unit.into_dto())))
}

/// Delete a unit with its modules.
///
/// # Access Control
/// - `Admin` - Only admins can delete units
#[utoipa::path(
    delete,
    path = "/courses/{course_id}/units/{unit_id}",
    tag = UNIT_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id")
    ),
    responses(
        (status = 200, description = "Unit deleted"),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Unit not found in course", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_unit(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((course_id, unit_id)): AppPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;

    UnitService::new(&state.db)
        .delete(course_id, unit_id)
        .await?;

    Ok(Json(ApiResponse::message("Unit deleted")))
}
