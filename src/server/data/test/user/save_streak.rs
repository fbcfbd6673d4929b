use super::*;

/// Tests persisting streak counters.
///
/// Expected: Ok with all three counters stored
#[tokio::test]
async fn stores_streak_counters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    let repo = UserRepository::new(db);
    repo.save_streak(
        user.id,
        Streak {
            current: 3,
            longest: 7,
            last_date: Some(day),
        },
    )
    .await?;

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.current_streak, 3);
    assert_eq!(stored.longest_streak, 7);
    assert_eq!(stored.last_streak_date, Some(day));

    Ok(())
}
