//! Router-level tests driving the full application with `oneshot` requests.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, context::TestContext, factory};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::server::{
    config::tests::test_config,
    router,
    service::token::TokenService,
    startup,
    state::AppState,
    storage::memory::MemoryObjectStore,
};

mod course;
mod health;
mod progress;
mod user;

/// Application router over a fresh in-memory database with every table.
struct TestApp {
    // Keeps the in-memory database alive for the router's connection handle.
    _context: TestContext,
    db: DatabaseConnection,
    router: Router,
    jwt_secret: String,
}

impl TestApp {
    async fn new() -> Self {
        let context = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = context.db.clone().unwrap();

        let config = test_config();
        let jwt_secret = config.jwt_secret.clone();
        let state = AppState::new(
            db.clone(),
            Arc::new(config.clone()),
            startup::setup_reqwest_client().unwrap(),
            startup::setup_google_oauth_client(&config).unwrap(),
            startup::setup_apple_oauth_client(&config).unwrap(),
            Arc::new(MemoryObjectStore::new()),
        );

        let router = router::router(state, SessionManagerLayer::new(MemoryStore::default()));

        Self {
            _context: context,
            db,
            router,
            jwt_secret,
        }
    }

    /// Issues an access token for `user_id`.
    fn token_for(&self, user_id: i32) -> String {
        TokenService::new(&self.jwt_secret)
            .issue_pair(user_id)
            .unwrap()
            .access
    }

    /// Access token for a freshly created regular user.
    async fn user_token(&self) -> (i32, String) {
        let user = factory::create_user(&self.db).await.unwrap();
        (user.id, self.token_for(user.id))
    }

    /// Access token for a freshly created admin.
    async fn admin_token(&self) -> (i32, String) {
        let admin = factory::create_admin(&self.db).await.unwrap();
        (admin.id, self.token_for(admin.id))
    }

    /// Sends a request and returns the status with the decoded JSON body.
    ///
    /// Empty bodies decode as `Value::Null`.
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }
}

/// Body of a minimal valid unit creation request.
fn unit_body(name: &str) -> Value {
    json!({ "name": name, "description": "Unit description" })
}
