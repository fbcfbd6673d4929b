use super::*;

/// Tests creating and then moving an enrollment.
///
/// Expected: Ok with a single enrollment pointing at the latest module
#[tokio::test]
async fn creates_then_moves_pointer() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let tree = factory::create_course_tree(db).await?;
    let second = factory::create_module(db, tree.unit.id, 2).await?;

    let repo = ProgressRepository::new(db);
    let created = repo
        .upsert_enrollment(user.id, tree.course.id, Some(tree.unit.id), Some(tree.module.id))
        .await?;
    assert_eq!(created.current_module_id, Some(tree.module.id));

    repo.upsert_enrollment(user.id, tree.course.id, Some(tree.unit.id), Some(second.id))
        .await?;

    let enrollments = repo.enrollments_for(user.id, &[tree.course.id]).await?;
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].current_module_id, Some(second.id));
    assert_eq!(enrollments[0].created_at, created.created_at);

    Ok(())
}
