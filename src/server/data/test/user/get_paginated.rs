use super::*;

/// Tests paging through users.
///
/// Expected: Ok with the last user alone on page 3 and a total of 5
#[tokio::test]
async fn returns_last_partial_page() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(factory::create_user(db).await?.id);
    }

    let repo = UserRepository::new(db);
    let request = PageRequest::new(Some(3), Some(2)).unwrap();
    let (users, total) = repo.get_paginated(request).await?;

    assert_eq!(total, 5);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, ids[4]);

    Ok(())
}

/// Tests changing a role.
///
/// Expected: Ok(Some) with the admin role, Ok(None) for an unknown user
#[tokio::test]
async fn sets_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo.set_role(user.id, Role::Admin).await?;

    assert_eq!(updated.map(|u| u.role), Some("admin".to_string()));
    assert!(repo.set_role(user.id + 100, Role::Admin).await?.is_none());

    Ok(())
}
