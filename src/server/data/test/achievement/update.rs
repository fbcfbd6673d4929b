use super::*;

/// Tests creating and partially updating an achievement.
///
/// Expected: Ok with new points and the original name
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AchievementRepository::new(db);
    let created = repo
        .create(CreateAchievementParams {
            name: "First Steps".to_string(),
            description: "Complete a module".to_string(),
            points: 10,
        })
        .await?;

    let updated = repo
        .update(
            created.id,
            UpdateAchievementParams {
                points: Some(25),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "First Steps");
    assert_eq!(updated.points, 25);
    assert!(repo
        .update(created.id + 1, UpdateAchievementParams::default())
        .await?
        .is_none());

    Ok(())
}
