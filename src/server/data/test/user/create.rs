use super::*;

/// Tests creating a password account.
///
/// Verifies that new accounts start active with zeroed streak counters and the
/// requested role.
///
/// Expected: Ok with default counters
#[tokio::test]
async fn creates_user_with_defaults() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(password_user("ada", "ada@example.com")).await?;

    assert_eq!(user.username, "ada");
    assert_eq!(user.role, "user");
    assert!(user.is_active);
    assert_eq!(user.current_streak, 0);
    assert!(user.last_streak_date.is_none());

    let found = repo.find_by_email("ada@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests that a duplicate email is rejected by the unique constraint.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(password_user("ada", "ada@example.com")).await?;
    let result = repo.create(password_user("grace", "ada@example.com")).await;

    assert!(result.is_err());

    Ok(())
}
