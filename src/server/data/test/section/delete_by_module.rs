use super::*;

/// Tests deleting every section of a module.
///
/// Verifies that sections of the module and their questions are removed while
/// sections of other modules stay.
///
/// Expected: Ok(3) with the question gone and the other module untouched
#[tokio::test]
async fn removes_sections_and_questions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let tree = factory::create_course_tree(db).await?;
    let other_module = factory::create_module(db, tree.unit.id, 2).await?;
    factory::section::create_text_section(db, other_module.id, 1).await?;

    let repo = SectionRepository::new(db);
    let deleted = repo.delete_by_module(tree.module.id).await?;

    assert_eq!(deleted, 3);
    assert_eq!(repo.count_by_module(tree.module.id).await?, 0);
    assert_eq!(repo.count_by_module(other_module.id).await?, 1);
    assert!(repo.get_questions(&[tree.question.id]).await?.is_empty());

    Ok(())
}
