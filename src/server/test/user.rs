use super::*;

fn sign_up_body(username: &str, email: &str) -> Value {
    json!({ "username": username, "email": email, "password": "correct-horse" })
}

/// Tests registration followed by a second registration with the same email.
///
/// Expected: 201 with tokens and user, then 202 `ACCOUNT_EXISTS`
#[tokio::test]
async fn sign_up_then_duplicate_email() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/users/sign-up", None, sign_up_body("ada", "ada@example.com"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert!(body["payload"]["token"].as_str().is_some());
    assert!(body["payload"]["refreshToken"].as_str().is_some());
    assert_eq!(body["payload"]["user"]["email"], json!("ada@example.com"));

    let (status, body) = app
        .post("/users/sign-up", None, sign_up_body("ada2", "ada@example.com"))
        .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errorCode"], json!("ACCOUNT_EXISTS"));
}

/// Tests that emails are matched without regard to case.
///
/// Expected: stored lowercased, 202 `ACCOUNT_EXISTS` for a differently cased
/// duplicate, and sign-in with mixed case succeeds
#[tokio::test]
async fn email_matching_ignores_case() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/users/sign-up", None, sign_up_body("grace", "Grace@Example.com"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["payload"]["user"]["email"], json!("grace@example.com"));

    let (status, body) = app
        .post("/users/sign-up", None, sign_up_body("grace2", "GRACE@example.com"))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["errorCode"], json!("ACCOUNT_EXISTS"));

    let (status, _) = app
        .post(
            "/users/sign-in",
            None,
            json!({ "email": "GRACE@EXAMPLE.COM", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

/// Tests that invalid sign-up data is rejected before any account is created.
///
/// Expected: 400 `INVALID_REQUEST`, and the email stays unregistered
#[tokio::test]
async fn sign_up_rejects_short_password() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/users/sign-up",
            None,
            json!({ "username": "bob", "email": "bob@example.com", "password": "short" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], json!("INVALID_REQUEST"));

    let (_, body) = app
        .get("/users/check-email?email=bob@example.com", None)
        .await;
    assert_eq!(body["payload"]["exists"], json!(false));
}

/// Tests sign-in with the right and the wrong password.
///
/// Expected: 200 with tokens, then 401 `INVALID_CREDENTIALS`
#[tokio::test]
async fn sign_in_checks_password() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post("/users/sign-up", None, sign_up_body("cyra", "cy@example.com"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post(
            "/users/sign-in",
            None,
            json!({ "email": "cy@example.com", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["payload"]["token"].as_str().is_some());

    let (status, body) = app
        .post(
            "/users/sign-in",
            None,
            json!({ "email": "cy@example.com", "password": "wrong-horse" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], json!("INVALID_CREDENTIALS"));
}

/// Tests that an access token cannot be used as a refresh token.
///
/// Expected: 401 `INVALID_TOKEN`
#[tokio::test]
async fn refresh_rejects_access_token() {
    let app = TestApp::new().await;
    let (_, token) = app.user_token().await;

    let (status, body) = app
        .post("/users/refresh-token", None, json!({ "refreshToken": token }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], json!("INVALID_TOKEN"));
}

/// Tests that authorized routes reject requests without a valid bearer token.
///
/// Expected: 401 `UNAUTHORIZED` for a missing and for a garbage token
#[tokio::test]
async fn me_requires_token() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/users/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], json!("UNAUTHORIZED"));

    let (status, _) = app.get("/users/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Tests reading the caller's own profile.
///
/// Expected: 200 with the caller's id
#[tokio::test]
async fn me_returns_caller() {
    let app = TestApp::new().await;
    let (user_id, token) = app.user_token().await;

    let (status, body) = app.get("/users/me", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["id"], json!(user_id));
}

/// Tests that listing users is admin-only.
///
/// Expected: 403 `FORBIDDEN` for a user, 200 with both accounts for an admin
#[tokio::test]
async fn list_users_requires_admin() {
    let app = TestApp::new().await;
    let (_, user_token) = app.user_token().await;
    let (_, admin_token) = app.admin_token().await;

    let (status, body) = app.get("/users", Some(&user_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errorCode"], json!("FORBIDDEN"));

    let (status, body) = app.get("/users", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["pagination"]["totalItems"], json!(2));
}
