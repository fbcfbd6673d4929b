use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PaginatedDto, PaginationQuery},
        course::{CreateModuleDto, ModuleDto, UpdateModuleDto},
        progress::ModuleProgressBatchDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            course::{CreateModuleParams, Module, UpdateModuleParams},
            page::PageRequest,
            progress::ModuleProgressBatch,
        },
        service::{module::ModuleService, progress::ProgressService},
        state::AppState,
        util::extract::{AppJson, AppPath, AppQuery},
    },
};

/// Tag for grouping module endpoints in OpenAPI documentation
pub static MODULE_TAG: &str = "module";

/// List one page of a unit's modules.
#[utoipa::path(
    get,
    path = "/courses/{course_id}/units/{unit_id}/modules",
    tag = MODULE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page, 1 to 100")
    ),
    responses(
        (status = 200, description = "Modules ordered by number", body = ApiResponse<PaginatedDto<ModuleDto>>),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 404, description = "Unit not found in course", body = ErrorDto)
    ),
)]
pub async fn list_modules(
    State(state): State<AppState>,
    AppPath((course_id, unit_id)): AppPath<(i32, i32)>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.page_size)?;

    let page = ModuleService::new(&state.db)
        .list(course_id, unit_id, request)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Modules retrieved",
        page.into_dto(Module::into_dto),
    )))
}

/// Get a module with its sections.
#[utoipa::path(
    get,
    path = "/courses/{course_id}/units/{unit_id}/modules/{module_id}",
    tag = MODULE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id"),
        ("module_id" = i32, Path, description = "Module id")
    ),
    responses(
        (status = 200, description = "Module with sections", body = ApiResponse<ModuleDto>),
        (status = 404, description = "Module not found under unit and course", body = ErrorDto)
    ),
)]
pub async fn get_module(
    State(state): State<AppState>,
    AppPath((course_id, unit_id, module_id)): AppPath<(i32, i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let module = ModuleService::new(&state.db)
        .get(course_id, unit_id, module_id, None)
        .await?;

    Ok(Json(ApiResponse::ok("Module retrieved", module.into_dto())))
}

/// Get a module with its sections and the caller's progress.
#[utoipa::path(
    get,
    path = "/courses/{course_id}/units/{unit_id}/modules/{module_id}/progress",
    tag = MODULE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id"),
        ("module_id" = i32, Path, description = "Module id")
    ),
    responses(
        (status = 200, description = "Module with sections and progress", body = ApiResponse<ModuleDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Module not found under unit and course", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_module_with_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((course_id, unit_id, module_id)): AppPath<(i32, i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let module = ModuleService::new(&state.db)
        .get(course_id, unit_id, module_id, Some(auth_user.user_id))
        .await?;

    Ok(Json(ApiResponse::ok("Module retrieved", module.into_dto())))
}

/// Record the caller's progress in a module.
///
/// Applies section timestamps and question answers in one transaction and
/// recomputes the module's progress. Submitting the same batch again changes nothing.
///
/// # Returns
/// - `200 OK` - Batch applied
/// - `400 Bad Request` - A section, question or option is not part of the module
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - Module not found under unit and course
#[utoipa::path(
    post,
    path = "/courses/{course_id}/units/{unit_id}/modules/{module_id}/progress",
    tag = MODULE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id"),
        ("module_id" = i32, Path, description = "Module id")
    ),
    request_body = ModuleProgressBatchDto,
    responses(
        (status = 200, description = "Progress recorded"),
        (status = 400, description = "Batch references foreign content", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Module not found under unit and course", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn record_module_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((course_id, unit_id, module_id)): AppPath<(i32, i32, i32)>,
    AppJson(payload): AppJson<ModuleProgressBatchDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let batch = ModuleProgressBatch::from_dto(
        auth_user.user_id,
        course_id,
        unit_id,
        module_id,
        payload,
    );
    ProgressService::new(&state.db)
        .record_module_progress(batch)
        .await?;

    Ok(Json(ApiResponse::message("Module progress saved")))
}

/// Create a module with its sections.
///
/// Without a `moduleNumber` the module is appended after the highest existing number.
///
/// # Access Control
/// - `Admin` - Only admins can create modules
#[utoipa::path(
    post,
    path = "/courses/{course_id}/units/{unit_id}/modules",
    tag = MODULE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id")
    ),
    request_body = CreateModuleDto,
    responses(
        (status = 200, description = "Module created", body = ApiResponse<ModuleDto>),
        (status = 400, description = "Invalid module or section data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Unit not found in course", body = ErrorDto),
        (status = 409, description = "Duplicate module number", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((course_id, unit_id)): AppPath<(i32, i32)>,
    AppJson(payload): AppJson<CreateModuleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let params = CreateModuleParams::from_dto(unit_id, payload)?;
    let module = ModuleService::new(&state.db)
        .create(course_id, params)
        .await?;

    Ok(Json(ApiResponse::ok("Module created", module.into_dto())))
}

/// Update a module. A present `sections` list replaces every existing section.
///
/// # Access Control
/// - `Admin` - Only admins can update modules
#[utoipa::path(
    put,
    path = "/courses/{course_id}/units/{unit_id}/modules/{module_id}",
    tag = MODULE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id"),
        ("module_id" = i32, Path, description = "Module id")
    ),
    request_body = UpdateModuleDto,
    responses(
        (status = 200, description = "Module updated", body = ApiResponse<ModuleDto>),
        (status = 400, description = "Invalid module or section data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Module not found under unit and course", body = ErrorDto),
        (status = 409, description = "Duplicate module number", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((course_id, unit_id, module_id)): AppPath<(i32, i32, i32)>,
    AppJson(payload): AppJson<UpdateModuleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let params = UpdateModuleParams::from_dto(unit_id, module_id, payload)?;
    let module = ModuleService::new(&state.db)
        .update(course_id, params)
        .await?;

    Ok(Json(ApiResponse::ok("Module updated", module.into_dto())))
}

/// Delete a module with its sections and learner progress.
///
/// # Access Control
/// - `Admin` - Only admins can delete modules
#[utoipa::path(
    delete,
    path = "/courses/{course_id}/units/{unit_id}/modules/{module_id}",
    tag = MODULE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("unit_id" = i32, Path, description = "Unit id"),
        ("module_id" = i32, Path, description = "Module id")
    ),
    responses(
        (status = 200, description = "Module deleted"),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Module not found under unit and course", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((course_id, unit_id, module_id)): AppPath<(i32, i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;

    ModuleService::new(&state.db)
        .delete(course_id, unit_id, module_id)
        .await?;

    Ok(Json(ApiResponse::message("Module deleted")))
}
