use super::*;

/// Tests that module numbering continues from the highest number in the unit.
///
/// Expected: Ok(1) for an empty unit, then Ok(3) after modules 1 and 2
#[tokio::test]
async fn continues_after_highest_number() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let unit = factory::create_unit(db, course.id, 1).await?;

    let repo = ModuleRepository::new(db);
    assert_eq!(repo.next_number(unit.id).await?, 1);

    factory::create_module(db, unit.id, 1).await?;
    factory::create_module(db, unit.id, 2).await?;

    assert_eq!(repo.next_number(unit.id).await?, 3);
    assert!(repo.number_taken(unit.id, 2, None).await?);

    Ok(())
}
