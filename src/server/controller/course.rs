use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PaginatedDto},
        course::{CourseDto, CourseListQuery, CreateCourseDto, DepthQuery, UpdateCourseDto},
        progress::EnrollmentDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            course::{Course, CreateCourseParams, UpdateCourseParams},
            page::PageRequest,
        },
        service::course::CourseService,
        state::AppState,
        util::extract::{AppJson, AppPath, AppQuery},
    },
};

/// Tag for grouping course endpoints in OpenAPI documentation
pub static COURSE_TAG: &str = "course";

/// List courses.
///
/// Returns one page of courses with their units and modules, without learner
/// progress. The `filter` parameter needs a signed-in user and is ignored here.
///
/// # Returns
/// - `200 OK` - Paginated course summaries
/// - `400 Bad Request` - Page or page size out of range
#[utoipa::path(
    get,
    path = "/courses",
    tag = COURSE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page, 1 to 100")
    ),
    responses(
        (status = 200, description = "Paginated courses", body = ApiResponse<PaginatedDto<CourseDto>>),
        (status = 400, description = "Invalid pagination", body = ErrorDto)
    ),
)]
pub async fn list_courses(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CourseListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.page_size)?;

    let page = CourseService::new(&state.db)
        .list(query.filter.unwrap_or_default(), None, request)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Courses retrieved",
        page.into_dto(Course::into_dto),
    )))
}

/// List courses with the caller's progress.
///
/// # Returns
/// - `200 OK` - Paginated courses with progress and current position
/// - `400 Bad Request` - Page or page size out of range
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/courses/progress",
    tag = COURSE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("pageSize" = Option<u64>, Query, description = "Items per page, 1 to 100"),
        ("filter" = Option<String>, Query, description = "`learning`, `explore` or `all`")
    ),
    responses(
        (status = 200, description = "Paginated courses with progress", body = ApiResponse<PaginatedDto<CourseDto>>),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_courses_with_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppQuery(query): AppQuery<CourseListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.page_size)?;

    let page = CourseService::new(&state.db)
        .list(
            query.filter.unwrap_or_default(),
            Some(auth_user.user_id),
            request,
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Courses retrieved",
        page.into_dto(Course::into_dto),
    )))
}

/// Get a course tree.
///
/// `type=summary` returns units and modules, `type=full` adds sections and questions.
///
/// # Returns
/// - `200 OK` - The course
/// - `404 Not Found` - Unknown course
#[utoipa::path(
    get,
    path = "/courses/{course_id}",
    tag = COURSE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("type" = Option<String>, Query, description = "`summary` or `full`")
    ),
    responses(
        (status = 200, description = "Course tree", body = ApiResponse<CourseDto>),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn get_course(
    State(state): State<AppState>,
    AppPath(course_id): AppPath<i32>,
    AppQuery(query): AppQuery<DepthQuery>,
) -> Result<impl IntoResponse, AppError> {
    let course = CourseService::new(&state.db)
        .get(course_id, None, query.depth.unwrap_or_default())
        .await?;

    Ok(Json(ApiResponse::ok("Course retrieved", course.into_dto())))
}

/// Get a course tree with the caller's progress.
///
/// # Returns
/// - `200 OK` - The course with module progress and current position
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - Unknown course
#[utoipa::path(
    get,
    path = "/courses/{course_id}/progress",
    tag = COURSE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course id"),
        ("type" = Option<String>, Query, description = "`summary` or `full`")
    ),
    responses(
        (status = 200, description = "Course tree with progress", body = ApiResponse<CourseDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_course_with_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(course_id): AppPath<i32>,
    AppQuery(query): AppQuery<DepthQuery>,
) -> Result<impl IntoResponse, AppError> {
    let course = CourseService::new(&state.db)
        .get(
            course_id,
            Some(auth_user.user_id),
            query.depth.unwrap_or_default(),
        )
        .await?;

    Ok(Json(ApiResponse::ok("Course retrieved", course.into_dto())))
}

/// Enroll the caller in a course.
///
/// Points the enrollment at the first module of the first unit. Enrolling twice
/// returns the existing enrollment.
///
/// # Returns
/// - `200 OK` - The enrollment
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - Unknown course
#[utoipa::path(
    post,
    path = "/courses/{course_id}/enroll",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Enrollment", body = ApiResponse<EnrollmentDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn enroll(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(course_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let enrollment = CourseService::new(&state.db)
        .enroll(auth_user.user_id, course_id)
        .await?;

    Ok(Json(ApiResponse::ok("Enrolled in course", enrollment.into_dto())))
}

/// Create a course.
///
/// # Access Control
/// - `Admin` - Only admins can create courses
///
/// # Returns
/// - `200 OK` - The created course
/// - `400 Bad Request` - Invalid course data or unknown author
/// - `403 Forbidden` - Caller is not an admin
#[utoipa::path(
    post,
    path = "/courses",
    tag = COURSE_TAG,
    request_body = CreateCourseDto,
    responses(
        (status = 200, description = "Course created", body = ApiResponse<CourseDto>),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<CreateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let course = CourseService::new(&state.db)
        .create(CreateCourseParams::from(payload))
        .await?;

    Ok(Json(ApiResponse::ok("Course created", course.into_dto())))
}

/// Update a course.
///
/// Absent fields keep their values; present author or tag lists replace the stored ones.
///
/// # Access Control
/// - `Admin` - Only admins can update courses
///
/// # Returns
/// - `200 OK` - The updated course
/// - `403 Forbidden` - Caller is not an admin
/// - `404 Not Found` - Unknown course
#[utoipa::path(
    put,
    path = "/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course id")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = ApiResponse<CourseDto>),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(course_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let course = CourseService::new(&state.db)
        .update(UpdateCourseParams::from_dto(course_id, payload))
        .await?;

    Ok(Json(ApiResponse::ok("Course updated", course.into_dto())))
}

/// Delete a course with all of its units, modules and sections.
///
/// # Access Control
/// - `Admin` - Only admins can delete courses
#[utoipa::path(
    delete,
    path = "/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(course_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &auth_user)
        .require(&[Permission::Admin])
        .await?;

    CourseService::new(&state.db).delete(course_id).await?;

    Ok(Json(ApiResponse::message("Course deleted")))
}
