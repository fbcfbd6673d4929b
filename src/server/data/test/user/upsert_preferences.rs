use super::*;

/// Tests saving preferences twice.
///
/// Verifies that the first save fills unspecified fields with defaults and the
/// second save only changes the provided field.
///
/// Expected: Ok with theme from the first save and language from the second
#[tokio::test]
async fn merges_into_existing_preferences() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    assert!(repo.find_preferences(user.id).await?.is_none());

    let first = repo
        .upsert_preferences(
            user.id,
            UpdatePreferencesParams {
                theme: Some("dark".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(first.theme, "dark");
    assert_eq!(first.lang, "en");
    assert_eq!(first.timezone, "UTC");

    let second = repo
        .upsert_preferences(
            user.id,
            UpdatePreferencesParams {
                lang: Some("de".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(second.theme, "dark");
    assert_eq!(second.lang, "de");

    Ok(())
}
