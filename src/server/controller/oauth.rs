use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        user::AuthPayloadDto,
    },
    server::{
        error::AppError,
        middleware::session::CsrfSession,
        service::{
            oauth::{OAuthProvider, OAuthService},
            user::UserService,
        },
        state::AppState,
    },
};

/// Tag for grouping OAuth endpoints in OpenAPI documentation
pub static OAUTH_TAG: &str = "oauth";

/// Parameters of a provider callback.
///
/// # Fields
/// - `state` - CSRF token that must match the value stored in the session
/// - `code` - Authorization code to exchange for tokens
/// - `user` - Apple only: JSON with the user's name, sent on first sign-in
#[derive(Deserialize, Debug, ToSchema)]
pub struct CallbackParams {
    pub state: String,
    pub code: String,
    #[serde(default)]
    pub user: Option<String>,
}

/// Redirect to Google sign-in.
#[utoipa::path(
    get,
    path = "/login/oauth/google",
    tag = OAUTH_TAG,
    responses((status = 307, description = "Redirect to Google"))
)]
pub async fn google_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    login(&state, &session, OAuthProvider::Google).await
}

/// Redirect to Sign in with Apple.
#[utoipa::path(
    get,
    path = "/login/oauth/apple",
    tag = OAUTH_TAG,
    responses((status = 307, description = "Redirect to Apple"))
)]
pub async fn apple_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    login(&state, &session, OAuthProvider::Apple).await
}

/// Complete Google sign-in.
///
/// # Returns
/// - `200 OK` - Tokens and the signed-in user
/// - `400 Bad Request` - CSRF state mismatch or missing
/// - `401 Unauthorized` - Google rejected the code or the account has no verified email
#[utoipa::path(
    get,
    path = "/callback/google",
    tag = OAUTH_TAG,
    params(
        ("state" = String, Query, description = "CSRF state from the login redirect"),
        ("code" = String, Query, description = "Authorization code")
    ),
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<AuthPayloadDto>),
        (status = 400, description = "CSRF validation failed", body = ErrorDto),
        (status = 401, description = "Provider sign-in failed", body = ErrorDto)
    ),
)]
pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    CsrfSession::new(&session, OAuthProvider::Google)
        .validate(&params.state)
        .await?;

    let oauth = OAuthService::new(OAuthProvider::Google, &state.http_client, &state.google_oauth);
    let token = oauth.exchange(params.code).await?;
    let identity = oauth.google_identity(&token).await?;

    let auth = UserService::new(&state.db, &state.config.jwt_secret)
        .oauth_sign_in(identity)
        .await?;

    Ok(Json(ApiResponse::ok("Signed in", auth.into_dto())))
}

/// Complete Apple sign-in from a query-string redirect.
#[utoipa::path(
    get,
    path = "/callback/apple",
    tag = OAUTH_TAG,
    params(
        ("state" = String, Query, description = "CSRF state from the login redirect"),
        ("code" = String, Query, description = "Authorization code")
    ),
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<AuthPayloadDto>),
        (status = 400, description = "CSRF validation failed", body = ErrorDto),
        (status = 401, description = "Provider sign-in failed", body = ErrorDto)
    ),
)]
pub async fn apple_callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    apple_sign_in(&state, &session, params).await
}

/// Complete Apple sign-in from a `form_post` callback.
#[utoipa::path(
    post,
    path = "/callback/apple",
    tag = OAUTH_TAG,
    request_body(content = CallbackParams, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<AuthPayloadDto>),
        (status = 400, description = "CSRF validation failed", body = ErrorDto),
        (status = 401, description = "Provider sign-in failed", body = ErrorDto)
    ),
)]
pub async fn apple_callback_form(
    State(state): State<AppState>,
    session: Session,
    Form(params): Form<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    apple_sign_in(&state, &session, params).await
}

async fn login(
    state: &AppState,
    session: &Session,
    provider: OAuthProvider,
) -> Result<Redirect, AppError> {
    let oauth_client = match provider {
        OAuthProvider::Google => &state.google_oauth,
        OAuthProvider::Apple => &state.apple_oauth,
    };

    let (url, csrf_token) =
        OAuthService::new(provider, &state.http_client, oauth_client).login_url();

    CsrfSession::new(session, provider)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

async fn apple_sign_in(
    state: &AppState,
    session: &Session,
    params: CallbackParams,
) -> Result<Json<ApiResponse<AuthPayloadDto>>, AppError> {
    CsrfSession::new(session, OAuthProvider::Apple)
        .validate(&params.state)
        .await?;

    let oauth = OAuthService::new(OAuthProvider::Apple, &state.http_client, &state.apple_oauth);
    let token = oauth.exchange(params.code).await?;
    let identity = oauth.apple_identity(&token, params.user.as_deref())?;

    let auth = UserService::new(&state.db, &state.config.jwt_secret)
        .oauth_sign_in(identity)
        .await?;

    Ok(Json(ApiResponse::ok("Signed in", auth.into_dto())))
}
