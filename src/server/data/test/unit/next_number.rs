use super::*;

/// Tests numbering for a course without units.
///
/// Expected: Ok(1)
#[tokio::test]
async fn starts_at_one() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;

    let repo = UnitRepository::new(db);

    assert_eq!(repo.next_number(course.id).await?, 1);

    Ok(())
}

/// Tests numbering after gaps.
///
/// Verifies that the next number follows the highest existing number rather
/// than filling gaps, and that units of other courses are not counted.
///
/// Expected: Ok(6)
#[tokio::test]
async fn follows_highest_number() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let other = factory::create_course(db).await?;
    factory::create_unit(db, course.id, 2).await?;
    factory::create_unit(db, course.id, 5).await?;
    factory::create_unit(db, other.id, 9).await?;

    let repo = UnitRepository::new(db);

    assert_eq!(repo.next_number(course.id).await?, 6);

    Ok(())
}
