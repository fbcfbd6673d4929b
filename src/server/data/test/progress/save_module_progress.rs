use super::*;

/// Tests that `completed_at` is set once.
///
/// Verifies that completing a module stamps `completed_at`, and that a later
/// save keeps the first completion time.
///
/// Expected: Ok with the first completion time preserved
#[tokio::test]
async fn keeps_first_completion_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let tree = factory::create_course_tree(db).await?;
    let first = Utc::now() - Duration::hours(1);

    let repo = ProgressRepository::new(db);
    let partial = repo
        .save_module_progress(user.id, tree.module.id, 33, ProgressStatus::InProgress, 1, first)
        .await?;
    assert_eq!(partial.status, "in_progress");
    assert!(partial.completed_at.is_none());

    let done = repo
        .save_module_progress(user.id, tree.module.id, 100, ProgressStatus::Completed, 3, first)
        .await?;
    assert_eq!(done.completed_at, Some(first));
    assert_eq!(done.started_at, first);

    let later = repo
        .save_module_progress(
            user.id,
            tree.module.id,
            100,
            ProgressStatus::Completed,
            3,
            Utc::now(),
        )
        .await?;
    assert_eq!(later.completed_at, Some(first));
    assert!(later.last_accessed > first);

    Ok(())
}
