use super::*;

/// Tests that absent timestamps keep their stored value.
///
/// Verifies that a second update carrying only `completed_at` does not clear the
/// `seen_at` stored by the first.
///
/// Expected: Ok with both timestamps set
#[tokio::test]
async fn merges_timestamps() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let tree = factory::create_course_tree(db).await?;
    let section_id = tree.sections[0].id;
    let seen = Utc::now() - Duration::minutes(5);
    let completed = Utc::now();

    let repo = ProgressRepository::new(db);
    repo.upsert_section_progress(
        user.id,
        tree.module.id,
        &SectionProgressUpdate {
            section_id,
            seen_at: Some(seen),
            started_at: None,
            completed_at: None,
        },
    )
    .await?;

    let row = repo
        .upsert_section_progress(
            user.id,
            tree.module.id,
            &SectionProgressUpdate {
                section_id,
                seen_at: None,
                started_at: None,
                completed_at: Some(completed),
            },
        )
        .await?;

    assert_eq!(row.seen_at, Some(seen));
    assert_eq!(row.completed_at, Some(completed));
    assert!(row.started_at.is_none());

    Ok(())
}

/// Tests replaying the same update.
///
/// Expected: Ok with one row and one completed section
#[tokio::test]
async fn replay_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_progress_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let tree = factory::create_course_tree(db).await?;
    let update = SectionProgressUpdate {
        section_id: tree.sections[1].id,
        seen_at: None,
        started_at: None,
        completed_at: Some(Utc::now()),
    };

    let repo = ProgressRepository::new(db);
    let first = repo
        .upsert_section_progress(user.id, tree.module.id, &update)
        .await?;
    let second = repo
        .upsert_section_progress(user.id, tree.module.id, &update)
        .await?;

    assert_eq!(first, second);
    assert_eq!(
        repo.completed_section_ids(user.id, tree.module.id).await?,
        vec![tree.sections[1].id]
    );

    Ok(())
}
