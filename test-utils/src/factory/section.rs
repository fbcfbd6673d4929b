//! Section and question factories.
//!
//! Sections are created at an explicit position. Question sections create their
//! question and options in the same call.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

async fn insert_section(
    db: &DatabaseConnection,
    module_id: i32,
    section_type: &str,
    position: i32,
    content: Option<String>,
    url: Option<String>,
    question_id: Option<i32>,
) -> Result<entity::section::Model, DbErr> {
    let now = Utc::now();
    entity::section::ActiveModel {
        module_id: ActiveValue::Set(module_id),
        section_type: ActiveValue::Set(section_type.to_string()),
        position: ActiveValue::Set(position),
        content: ActiveValue::Set(content),
        url: ActiveValue::Set(url),
        question_id: ActiveValue::Set(question_id),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a text section at `position`.
pub async fn create_text_section(
    db: &DatabaseConnection,
    module_id: i32,
    position: i32,
) -> Result<entity::section::Model, DbErr> {
    insert_section(
        db,
        module_id,
        "text",
        position,
        Some(format!("Text at position {}", position)),
        None,
        None,
    )
    .await
}

/// Creates a video section at `position`.
pub async fn create_video_section(
    db: &DatabaseConnection,
    module_id: i32,
    position: i32,
) -> Result<entity::section::Model, DbErr> {
    insert_section(
        db,
        module_id,
        "video",
        position,
        None,
        Some(format!("https://videos.example.com/{}", position)),
        None,
    )
    .await
}

/// Creates a question with one correct and one incorrect option.
///
/// # Returns
/// - `Ok((question, correct, incorrect))` - The question and both options
/// - `Err(DbErr)` - Database error during insert
pub async fn create_question(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::question::Model,
        entity::question_option::Model,
        entity::question_option::Model,
    ),
    DbErr,
> {
    let question = entity::question::ActiveModel {
        question: ActiveValue::Set("What is the time complexity of binary search?".to_string()),
        question_type: ActiveValue::Set("multiple_choice".to_string()),
        difficulty_level: ActiveValue::Set("beginner".to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let correct = insert_option(db, question.id, "O(log n)", true).await?;
    let incorrect = insert_option(db, question.id, "O(n)", false).await?;

    Ok((question, correct, incorrect))
}

async fn insert_option(
    db: &DatabaseConnection,
    question_id: i32,
    content: &str,
    is_correct: bool,
) -> Result<entity::question_option::Model, DbErr> {
    entity::question_option::ActiveModel {
        question_id: ActiveValue::Set(question_id),
        content: ActiveValue::Set(content.to_string()),
        is_correct: ActiveValue::Set(is_correct),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a question section at `position` with a fresh two-option question.
///
/// # Returns
/// - `Ok((section, question, correct, incorrect))`
/// - `Err(DbErr)` - Database error during insert
pub async fn create_question_section(
    db: &DatabaseConnection,
    module_id: i32,
    position: i32,
) -> Result<
    (
        entity::section::Model,
        entity::question::Model,
        entity::question_option::Model,
        entity::question_option::Model,
    ),
    DbErr,
> {
    let (question, correct, incorrect) = create_question(db).await?;
    let section = insert_section(
        db,
        module_id,
        "question",
        position,
        None,
        None,
        Some(question.id),
    )
    .await?;

    Ok((section, question, correct, incorrect))
}
