use super::*;

/// Tests that a user cannot touch another user's notification.
///
/// Expected: Ok(0) for the other user, Ok(1) for the owner
#[tokio::test]
async fn only_owner_can_mark_read() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let notification = factory::create_notification(db, owner.id, false).await?;

    let repo = NotificationRepository::new(db);

    assert_eq!(repo.mark_read(other.id, notification.id).await?, 0);
    assert_eq!(repo.delete(other.id, notification.id).await?, 0);
    assert_eq!(repo.mark_read(owner.id, notification.id).await?, 1);
    assert_eq!(repo.unread_count(owner.id).await?, 0);

    Ok(())
}

/// Tests marking everything read.
///
/// Expected: Ok(2) for the unread notifications only
#[tokio::test]
async fn mark_all_counts_only_unread() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_notification(db, user.id, false).await?;
    factory::create_notification(db, user.id, false).await?;
    factory::create_notification(db, user.id, true).await?;

    let repo = NotificationRepository::new(db);

    assert_eq!(repo.mark_all_read(user.id).await?, 2);
    assert_eq!(repo.mark_all_read(user.id).await?, 0);

    Ok(())
}
