use super::*;

/// Tests pagination across multiple pages.
///
/// Verifies that the repository returns the requested slice of courses ordered
/// by id together with the total count.
///
/// Expected: Ok with 2 courses on page 2 and a total of 5
#[tokio::test]
async fn returns_requested_page_and_total() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(factory::create_course(db).await?.id);
    }

    let repo = CourseRepository::new(db);
    let request = PageRequest::new(Some(2), Some(2)).unwrap();
    let (courses, total) = repo.get_paginated(CourseFilter::All, None, request).await?;

    assert_eq!(total, 5);
    assert_eq!(
        courses.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![ids[2], ids[3]]
    );

    Ok(())
}

/// Tests the learning and explore filters.
///
/// Verifies that `learning` returns only courses the user is enrolled in and
/// `explore` returns only the rest.
///
/// Expected: Ok with disjoint result sets covering every course
#[tokio::test]
async fn filters_by_enrollment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let enrolled = factory::create_course(db).await?;
    let other = factory::create_course(db).await?;
    factory::enroll_user(db, user.id, enrolled.id).await?;

    let repo = CourseRepository::new(db);
    let request = PageRequest::new(None, None).unwrap();

    let (learning, learning_total) = repo
        .get_paginated(CourseFilter::Learning, Some(user.id), request)
        .await?;
    assert_eq!(learning_total, 1);
    assert_eq!(learning[0].id, enrolled.id);

    let (explore, explore_total) = repo
        .get_paginated(CourseFilter::Explore, Some(user.id), request)
        .await?;
    assert_eq!(explore_total, 1);
    assert_eq!(explore[0].id, other.id);

    Ok(())
}

/// Tests that the filter is ignored without a user.
///
/// Expected: Ok with every course
#[tokio::test]
async fn ignores_filter_without_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_course(db).await?;
    factory::create_course(db).await?;

    let repo = CourseRepository::new(db);
    let request = PageRequest::new(None, None).unwrap();
    let (courses, total) = repo
        .get_paginated(CourseFilter::Learning, None, request)
        .await?;

    assert_eq!(total, 2);
    assert_eq!(courses.len(), 2);

    Ok(())
}
