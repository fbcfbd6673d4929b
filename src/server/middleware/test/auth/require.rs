use super::*;

/// Tests that an admin passes the admin permission check.
///
/// Expected: Ok(User) with the admin's id
#[tokio::test]
async fn allows_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let auth_user = AuthUser { user_id: admin.id };

    let user = AuthGuard::new(db, &auth_user)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.id, admin.id);
    assert!(user.is_admin());

    Ok(())
}

/// Tests that a regular user is denied admin access.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_regular_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let auth_user = AuthUser { user_id: user.id };

    let result = AuthGuard::new(db, &auth_user)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == user.id
    ));

    Ok(())
}

/// Tests that no permissions only requires the user to exist.
///
/// Expected: Ok(User) for a regular user
#[tokio::test]
async fn empty_permissions_only_load_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let auth_user = AuthUser { user_id: user.id };

    let loaded = AuthGuard::new(db, &auth_user).require(&[]).await?;

    assert_eq!(loaded.username, user.username);

    Ok(())
}

/// Tests a token naming a user that was deleted.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let auth_user = AuthUser { user_id: 4242 };

    let result = AuthGuard::new(db, &auth_user).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(4242)))
    ));

    Ok(())
}
