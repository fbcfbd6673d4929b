use super::*;

/// Tests a partial update.
///
/// Verifies that only the provided fields change and that a provided tag list
/// replaces the existing tags.
///
/// Expected: Ok(Some) with the new name, the old description and one tag
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CourseRepository::new(db);
    let mut params = course_params("Algorithms");
    params.tags = vec!["old".to_string()];
    let course = repo.create(params).await?;

    let updated = repo
        .update(UpdateCourseParams {
            id: course.id,
            name: Some("Advanced Algorithms".to_string()),
            description: None,
            requirements: None,
            what_you_learn: None,
            background_color: None,
            icon_url: None,
            duration: None,
            difficulty: Some(Difficulty::Expert),
            author_ids: None,
            tags: Some(vec!["new".to_string()]),
        })
        .await?
        .unwrap();

    assert_eq!(updated.name, "Advanced Algorithms");
    assert_eq!(updated.description, course.description);
    assert_eq!(updated.difficulty_level, "expert");

    let tags = repo.tags_for(&[course.id]).await?;
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].1.name, "new");

    Ok(())
}

/// Tests updating a course that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_course() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CourseRepository::new(db);
    let result = repo
        .update(UpdateCourseParams {
            id: 42,
            name: Some("Nothing".to_string()),
            description: None,
            requirements: None,
            what_you_learn: None,
            background_color: None,
            icon_url: None,
            duration: None,
            difficulty: None,
            author_ids: None,
            tags: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that deleting a course removes its units and modules.
///
/// Expected: Ok with one row deleted and no units left
#[tokio::test]
async fn delete_cascades_to_units() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let tree = factory::create_course_tree(db).await?;

    let repo = CourseRepository::new(db);
    let deleted = repo.delete(tree.course.id).await?;

    assert_eq!(deleted, 1);
    let units = crate::server::data::unit::UnitRepository::new(db)
        .get_by_courses(&[tree.course.id])
        .await?;
    assert!(units.is_empty());

    Ok(())
}
