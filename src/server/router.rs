use std::{path::Path, time::Duration};

use axum::{
    http::{header, Method, StatusCode},
    middleware::{from_fn_with_state, map_response},
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tower_sessions::{SessionManagerLayer, SessionStore};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::api::ErrorCode,
    server::{
        controller::{
            achievement::{self, ACHIEVEMENT_TAG},
            course::{self, COURSE_TAG},
            health::{self, HEALTH_TAG},
            module::{self, MODULE_TAG},
            notification::{self, NOTIFICATION_TAG},
            oauth::{self, OAUTH_TAG},
            storage::{self, STORAGE_TAG},
            unit::{self, UNIT_TAG},
            user::{self, USER_TAG},
        },
        error::{error_response, AppError},
        middleware::auth::require_auth,
        state::AppState,
    },
};

/// Requests running longer than this are cancelled.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(OpenApi)]
#[openapi(
    info(title = "AlgoLearn API", description = "Courses, progress tracking and accounts"),
    modifiers(&BearerAuth),
    tags(
        (name = USER_TAG, description = "Accounts, profiles and tokens"),
        (name = OAUTH_TAG, description = "Google and Apple sign-in"),
        (name = COURSE_TAG, description = "Courses and enrollment"),
        (name = UNIT_TAG, description = "Units within a course"),
        (name = MODULE_TAG, description = "Modules and learner progress"),
        (name = ACHIEVEMENT_TAG, description = "Achievements and grants"),
        (name = NOTIFICATION_TAG, description = "User notifications"),
        (name = STORAGE_TAG, description = "Presigned uploads"),
        (name = HEALTH_TAG, description = "Liveness"),
    ),
    paths(
        user::sign_up, user::sign_in, user::refresh_token, user::check_email,
        user::get_me, user::update_me, user::delete_me, user::get_my_streak,
        user::list_users, user::get_user, user::set_user_role,
        oauth::google_login, oauth::apple_login, oauth::google_callback,
        oauth::apple_callback, oauth::apple_callback_form,
        course::list_courses, course::list_courses_with_progress, course::get_course,
        course::get_course_with_progress, course::enroll, course::create_course,
        course::update_course, course::delete_course,
        unit::list_units, unit::get_unit, unit::create_unit, unit::update_unit,
        unit::delete_unit,
        module::list_modules, module::get_module, module::get_module_with_progress,
        module::record_module_progress, module::create_module, module::update_module,
        module::delete_module,
        achievement::list_achievements, achievement::list_my_achievements,
        achievement::get_achievement, achievement::create_achievement,
        achievement::update_achievement, achievement::delete_achievement,
        achievement::grant_achievement,
        notification::list_notifications, notification::unread_count,
        notification::mark_read, notification::mark_all_read,
        notification::delete_notification, notification::create_notification,
        storage::presign_upload, storage::delete_object, storage::count_objects,
        health::health,
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by authorized paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Builds the complete application router.
///
/// Routes needing a signed-in user are registered on a separate router whose
/// handlers sit behind `require_auth`; both routers are merged so one path can
/// carry a public GET and an authorized POST. The session layer only wraps the
/// OAuth routes, which are the only ones storing anything in the session.
///
/// # Arguments
/// - `state` - Shared application state
/// - `session_layer` - Session layer for OAuth CSRF state
pub fn router<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    let admin_dir = Path::new(&state.config.admin_dist_dir);
    let admin_spa =
        ServeDir::new(admin_dir).fallback(ServeFile::new(admin_dir.join("index.html")));

    Router::new()
        .merge(public_routes())
        .merge(authorized_routes(state.clone()))
        .merge(oauth_routes().layer(session_layer))
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/admin", admin_spa)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(map_response(timeout_envelope))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]),
        )
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/users/sign-up", post(user::sign_up))
        .route("/users/sign-in", post(user::sign_in))
        .route("/users/refresh-token", post(user::refresh_token))
        .route("/users/check-email", get(user::check_email))
        .route("/courses", get(course::list_courses))
        .route("/courses/{course_id}", get(course::get_course))
        .route("/courses/{course_id}/units", get(unit::list_units))
        .route("/courses/{course_id}/units/{unit_id}", get(unit::get_unit))
        .route(
            "/courses/{course_id}/units/{unit_id}/modules",
            get(module::list_modules),
        )
        .route(
            "/courses/{course_id}/units/{unit_id}/modules/{module_id}",
            get(module::get_module),
        )
}

fn authorized_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(user::list_users))
        .route(
            "/users/me",
            get(user::get_me).put(user::update_me).delete(user::delete_me),
        )
        .route("/users/me/streak", get(user::get_my_streak))
        .route("/users/{user_id}", get(user::get_user))
        .route("/users/{user_id}/role", put(user::set_user_role))
        .route("/courses", post(course::create_course))
        .route("/courses/progress", get(course::list_courses_with_progress))
        .route(
            "/courses/{course_id}",
            put(course::update_course).delete(course::delete_course),
        )
        .route(
            "/courses/{course_id}/progress",
            get(course::get_course_with_progress),
        )
        .route("/courses/{course_id}/enroll", post(course::enroll))
        .route("/courses/{course_id}/units", post(unit::create_unit))
        .route(
            "/courses/{course_id}/units/{unit_id}",
            put(unit::update_unit).delete(unit::delete_unit),
        )
        .route(
            "/courses/{course_id}/units/{unit_id}/modules",
            post(module::create_module),
        )
        .route(
            "/courses/{course_id}/units/{unit_id}/modules/{module_id}",
            put(module::update_module).delete(module::delete_module),
        )
        .route(
            "/courses/{course_id}/units/{unit_id}/modules/{module_id}/progress",
            get(module::get_module_with_progress).post(module::record_module_progress),
        )
        .route(
            "/achievements",
            get(achievement::list_achievements).post(achievement::create_achievement),
        )
        .route("/achievements/me", get(achievement::list_my_achievements))
        .route(
            "/achievements/{achievement_id}",
            get(achievement::get_achievement)
                .put(achievement::update_achievement)
                .delete(achievement::delete_achievement),
        )
        .route(
            "/achievements/{achievement_id}/users/{user_id}",
            post(achievement::grant_achievement),
        )
        .route(
            "/notifications",
            get(notification::list_notifications).post(notification::create_notification),
        )
        .route("/notifications/unread-count", get(notification::unread_count))
        .route("/notifications/read-all", put(notification::mark_all_read))
        .route(
            "/notifications/{notification_id}",
            delete(notification::delete_notification),
        )
        .route(
            "/notifications/{notification_id}/read",
            put(notification::mark_read),
        )
        .route("/storage/presign", post(storage::presign_upload))
        .route("/storage/objects", delete(storage::delete_object))
        .route("/storage/count", get(storage::count_objects))
        .route_layer(from_fn_with_state(state, require_auth))
}

fn oauth_routes() -> Router<AppState> {
    Router::new()
        .route("/login/oauth/google", get(oauth::google_login))
        .route("/login/oauth/apple", get(oauth::apple_login))
        .route("/callback/google", get(oauth::google_callback))
        .route(
            "/callback/apple",
            get(oauth::apple_callback).post(oauth::apple_callback_form),
        )
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Replaces the empty body of a timed-out request with the failure envelope.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return error_response(
            StatusCode::REQUEST_TIMEOUT,
            ErrorCode::InternalError,
            "Request timed out",
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    use super::*;

    #[tokio::test]
    async fn timeout_gets_failure_envelope() {
        let timed_out = Response::builder()
            .status(StatusCode::REQUEST_TIMEOUT)
            .body(Body::empty())
            .unwrap();

        let response = timeout_envelope(timed_out).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["errorCode"], json!("INTERNAL_ERROR"));
    }

    #[tokio::test]
    async fn other_responses_pass_through() {
        let ok = Response::builder()
            .status(StatusCode::OK)
            .body(Body::from("fine"))
            .unwrap();

        let response = timeout_envelope(ok).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"fine");
    }
}
