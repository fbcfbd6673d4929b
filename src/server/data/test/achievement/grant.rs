use super::*;

/// Tests that granting twice keeps a single record.
///
/// Expected: Ok with the same timestamp both times and one earned achievement
#[tokio::test]
async fn grant_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let achievement = factory::create_achievement(db, 50).await?;

    let repo = AchievementRepository::new(db);
    let first = repo.grant(user.id, achievement.id).await?;
    let second = repo.grant(user.id, achievement.id).await?;

    assert_eq!(first.achieved_at, second.achieved_at);

    let earned = repo.earned_by_user(user.id).await?;
    assert_eq!(earned.len(), 1);
    assert_eq!(earned[0].1.points, 50);

    Ok(())
}

/// Tests that only the user's own achievements are returned.
///
/// Expected: Ok with no achievements for the other user
#[tokio::test]
async fn earned_is_scoped_to_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let achievement = factory::create_achievement(db, 10).await?;
    factory::grant_achievement(db, user.id, achievement.id).await?;

    let repo = AchievementRepository::new(db);

    assert!(repo.earned_by_user(other.id).await?.is_empty());

    Ok(())
}
