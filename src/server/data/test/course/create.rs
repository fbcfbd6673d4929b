use super::*;

/// Tests creating a course with authors and tags.
///
/// Verifies that the repository stores the course row, links each author once,
/// and reuses an existing tag with the same name instead of inserting a new one.
///
/// Expected: Ok with one author and two tags linked
#[tokio::test]
async fn creates_course_with_authors_and_tags() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let other = factory::create_course(db).await?;
    let existing_tag = factory::course::add_course_tag(db, other.id, "graphs").await?;

    let repo = CourseRepository::new(db);
    let mut params = course_params("Algorithms");
    params.author_ids = vec![author.id, author.id];
    params.tags = vec!["graphs".to_string(), "dp".to_string()];
    params.difficulty = Difficulty::Advanced;

    let course = repo.create(params).await?;

    assert_eq!(course.name, "Algorithms");
    assert_eq!(course.difficulty_level, "advanced");

    let authors = repo.authors_for(&[course.id]).await?;
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].1.id, author.id);

    let tags = repo.tags_for(&[course.id]).await?;
    let names: Vec<&str> = tags.iter().map(|(_, tag)| tag.name.as_str()).collect();
    assert_eq!(names, vec!["dp", "graphs"]);
    assert!(tags.iter().any(|(_, tag)| tag.id == existing_tag.id));

    Ok(())
}

/// Tests creating a course with an unknown author.
///
/// Verifies that the foreign key on course authors rejects a user id that
/// does not exist.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_unknown_author() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CourseRepository::new(db);
    let mut params = course_params("Algorithms");
    params.author_ids = vec![999];

    let result = repo.create(params).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests that tag links resolve back to their course through the relation.
///
/// Expected: the link row loads together with its course
#[tokio::test]
async fn tag_link_resolves_course() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    factory::course::add_course_tag(db, course.id, "greedy").await?;

    let links = entity::course_tag::Entity::find()
        .find_also_related(entity::course::Entity)
        .all(db)
        .await?;

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].1.as_ref().map(|c| c.id), Some(course.id));

    Ok(())
}
