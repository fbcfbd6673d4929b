use super::*;

/// Tests the sign-up clash check.
///
/// Verifies that either a matching email or a matching username counts as an
/// existing account.
///
/// Expected: Ok(true) for either match, Ok(false) for neither
#[tokio::test]
async fn matches_email_or_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .username("ada")
        .email("ada@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(repo
        .exists_by_email_or_username(&existing.email, "someone")
        .await?);
    assert!(repo
        .exists_by_email_or_username("other@example.com", &existing.username)
        .await?);
    assert!(!repo
        .exists_by_email_or_username("other@example.com", "someone")
        .await?);

    Ok(())
}
