use super::*;

/// Tests listing with and without the unread filter.
///
/// Verifies that only the user's notifications are counted and that the
/// unread filter excludes read ones.
///
/// Expected: Ok with 3 in total and 2 unread
#[tokio::test]
async fn filters_unread() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_notification(db, user.id, false).await?;
    factory::create_notification(db, user.id, false).await?;
    factory::create_notification(db, user.id, true).await?;
    factory::create_notification(db, other.id, false).await?;

    let repo = NotificationRepository::new(db);
    let request = PageRequest::new(None, None).unwrap();

    let (all, total) = repo
        .get_for_user_paginated(user.id, false, request)
        .await?;
    assert_eq!(total, 3);
    assert_eq!(all.len(), 3);

    let (unread, unread_total) = repo.get_for_user_paginated(user.id, true, request).await?;
    assert_eq!(unread_total, 2);
    assert!(unread.iter().all(|n| !n.is_read));
    assert_eq!(repo.unread_count(user.id).await?, 2);

    Ok(())
}
