use super::*;

/// Tests that the stored state validates once.
///
/// Verifies the token is consumed so a replayed callback fails.
///
/// Expected: Ok on first validation, CsrfValidationFailed on the second
#[tokio::test]
async fn validates_matching_state_once() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let csrf = CsrfSession::new(session, OAuthProvider::Google);
    csrf.set_token("state-123".to_string()).await?;

    csrf.validate("state-123").await?;
    let replay = csrf.validate("state-123").await;

    assert!(matches!(
        replay,
        Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
    ));

    Ok(())
}

/// Tests a callback state that differs from the stored one.
///
/// Expected: Err(AuthError::CsrfValidationFailed)
#[tokio::test]
async fn rejects_mismatched_state() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let csrf = CsrfSession::new(session, OAuthProvider::Apple);
    csrf.set_token("expected".to_string()).await?;

    let result = csrf.validate("forged").await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
    ));

    Ok(())
}

/// Tests that each provider keeps its own state.
///
/// Expected: the Google state does not validate an Apple callback
#[tokio::test]
async fn keeps_state_per_provider() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    CsrfSession::new(session, OAuthProvider::Google)
        .set_token("google-state".to_string())
        .await?;

    let apple = CsrfSession::new(session, OAuthProvider::Apple)
        .validate("google-state")
        .await;

    assert!(apple.is_err());
    assert_eq!(
        CsrfSession::new(session, OAuthProvider::Google)
            .take_token()
            .await?,
        Some("google-state".to_string())
    );

    Ok(())
}
