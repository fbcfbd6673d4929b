use super::*;

/// Tests answering, re-answering and changing an answer.
///
/// Verifies that re-submitting the same option keeps the original timestamp and
/// choosing a different option replaces the answer.
///
/// Expected: Ok with the original timestamp kept, then the new option stored
#[tokio::test]
async fn replaces_only_changed_answer() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let tree = factory::create_course_tree(db).await?;
    let first_at = Utc::now() - Duration::minutes(1);

    let repo = ProgressRepository::new(db);
    let first = repo
        .upsert_answer(
            user.id,
            tree.question.id,
            tree.incorrect_option.id,
            false,
            first_at,
        )
        .await?;

    let replay = repo
        .upsert_answer(
            user.id,
            tree.question.id,
            tree.incorrect_option.id,
            false,
            Utc::now(),
        )
        .await?;
    assert_eq!(replay.answered_at, first.answered_at);

    let changed = repo
        .upsert_answer(
            user.id,
            tree.question.id,
            tree.correct_option.id,
            true,
            Utc::now(),
        )
        .await?;
    assert_eq!(changed.option_id, tree.correct_option.id);
    assert!(changed.is_correct);
    assert!(changed.answered_at > first_at);

    Ok(())
}
