use super::*;

/// Tests creating a question section.
///
/// Verifies that the repository stores the question and its options and links
/// the section to the question.
///
/// Expected: Ok with a question section whose options come back in order
#[tokio::test]
async fn creates_question_with_options() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let unit = factory::create_unit(db, course.id, 1).await?;
    let module = factory::create_module(db, unit.id, 1).await?;

    let repo = SectionRepository::new(db);
    let section = repo
        .create(
            module.id,
            &CreateSectionParams {
                position: 1,
                body: SectionBody::Question(CreateQuestionParams {
                    question: "What is the complexity of binary search?".to_string(),
                    question_type: "multiple_choice".to_string(),
                    difficulty: Difficulty::Intermediate,
                    options: vec![
                        ("O(log n)".to_string(), true),
                        ("O(n)".to_string(), false),
                    ],
                }),
            },
        )
        .await?;

    assert_eq!(section.section_type, "question");
    let question_id = section.question_id.unwrap();

    let questions = repo.get_questions(&[question_id]).await?;
    assert_eq!(questions[0].difficulty_level, "intermediate");

    let options = repo.get_options(&[question_id]).await?;
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].content, "O(log n)");
    assert!(options[0].is_correct);
    assert!(!options[1].is_correct);

    Ok(())
}

/// Tests creating text and video sections.
///
/// Expected: Ok with content on the text section and url on the video section
#[tokio::test]
async fn stores_type_specific_content() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let unit = factory::create_unit(db, course.id, 1).await?;
    let module = factory::create_module(db, unit.id, 1).await?;

    let repo = SectionRepository::new(db);
    let text = repo
        .create(
            module.id,
            &CreateSectionParams {
                position: 2,
                body: SectionBody::Text("Arrays are contiguous".to_string()),
            },
        )
        .await?;
    let video = repo
        .create(
            module.id,
            &CreateSectionParams {
                position: 1,
                body: SectionBody::Video("https://videos.example.com/arrays".to_string()),
            },
        )
        .await?;

    assert_eq!(text.content.as_deref(), Some("Arrays are contiguous"));
    assert!(text.url.is_none());
    assert_eq!(video.section_type, "video");

    let sections = repo.get_by_modules(&[module.id]).await?;
    assert_eq!(
        sections.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![video.id, text.id]
    );

    Ok(())
}
