use super::*;

/// Tests paging through a unit's modules.
///
/// Verifies that modules are ordered by module number regardless of insertion
/// order and that modules of other units are excluded from the total.
///
/// Expected: Ok with modules 3 and 4 on page 2 and a total of 4
#[tokio::test]
async fn pages_in_module_number_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let unit = factory::create_unit(db, course.id, 1).await?;
    let other_unit = factory::create_unit(db, course.id, 2).await?;
    for number in [4, 2, 1, 3] {
        factory::create_module(db, unit.id, number).await?;
    }
    factory::create_module(db, other_unit.id, 1).await?;

    let repo = ModuleRepository::new(db);
    let request = PageRequest::new(Some(2), Some(2)).unwrap();
    let (modules, total) = repo.get_by_unit_paginated(unit.id, request).await?;

    assert_eq!(total, 4);
    assert_eq!(
        modules.iter().map(|m| m.module_number).collect::<Vec<_>>(),
        vec![3, 4]
    );

    Ok(())
}

/// Tests a page past the end.
///
/// Expected: Ok with no modules and the full total
#[tokio::test]
async fn returns_empty_page_past_end() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let unit = factory::create_unit(db, course.id, 1).await?;
    factory::create_module(db, unit.id, 1).await?;

    let repo = ModuleRepository::new(db);
    let request = PageRequest::new(Some(3), Some(10)).unwrap();
    let (modules, total) = repo.get_by_unit_paginated(unit.id, request).await?;

    assert!(modules.is_empty());
    assert_eq!(total, 1);

    Ok(())
}
