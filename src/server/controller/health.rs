use axum::{response::IntoResponse, Json};

use crate::model::api::ApiResponse;

/// Tag for grouping health endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// Liveness probe. Does not touch the database.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::message("OK"))
}
