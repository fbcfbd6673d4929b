use utoipa::OpenApi;

use super::*;
use crate::server::router::ApiDoc;

/// Tests the liveness endpoint without credentials.
///
/// Expected: 200 with a success envelope and no payload
#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body.get("payload").is_none());
}

/// Tests that unknown routes do not fall into any authorized handler.
///
/// Expected: 404 with the failure envelope
#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errorCode"], json!("NOT_FOUND"));
}

/// Tests that the generated API document describes the Apple form callback.
///
/// Expected: POST `/callback/apple` takes a form-encoded body
#[test]
fn openapi_documents_apple_form_callback() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

    let content = &doc["paths"]["/callback/apple"]["post"]["requestBody"]["content"];
    assert!(content.get("application/x-www-form-urlencoded").is_some());
}
