use super::*;

/// Tests detection of a used unit number.
///
/// Verifies that the number counts as taken for its own course only, and not
/// when the unit holding it is excluded.
///
/// Expected: Ok(true) for the clash, Ok(false) otherwise
#[tokio::test]
async fn detects_number_within_course() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let other = factory::create_course(db).await?;
    let unit = factory::create_unit(db, course.id, 1).await?;

    let repo = UnitRepository::new(db);

    assert!(repo.number_taken(course.id, 1, None).await?);
    assert!(!repo.number_taken(course.id, 1, Some(unit.id)).await?);
    assert!(!repo.number_taken(other.id, 1, None).await?);

    Ok(())
}

/// Tests that the unique index rejects a duplicate number on update.
///
/// Expected: Err from the update
#[tokio::test]
async fn unique_index_rejects_duplicate() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    factory::create_unit(db, course.id, 1).await?;
    let second = factory::create_unit(db, course.id, 2).await?;

    let repo = UnitRepository::new(db);
    let result = repo
        .update(
            second.clone(),
            UpdateUnitParams {
                course_id: course.id,
                unit_id: second.id,
                unit_number: Some(1),
                name: None,
                description: None,
            },
        )
        .await;

    assert!(result.is_err());

    Ok(())
}
