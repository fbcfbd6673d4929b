//! Course factory for creating test course entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test courses with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let course = CourseFactory::new(&db)
///     .name("Graphs")
///     .difficulty("advanced")
///     .build()
///     .await?;
/// ```
pub struct CourseFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    description: String,
    difficulty: String,
    duration: i32,
}

impl<'a> CourseFactory<'a> {
    /// Creates a new CourseFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Course {id}"`
    /// - difficulty: `"beginner"`
    /// - duration: `60`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Course {}", id),
            description: format!("Description for course {}", id),
            difficulty: "beginner".to_string(),
            duration: 60,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    /// Builds and inserts the course entity into the database.
    pub async fn build(self) -> Result<entity::course::Model, DbErr> {
        let now = Utc::now();
        entity::course::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            requirements: ActiveValue::Set(None),
            what_you_learn: ActiveValue::Set(None),
            background_color: ActiveValue::Set(None),
            icon_url: ActiveValue::Set(None),
            duration: ActiveValue::Set(self.duration),
            difficulty_level: ActiveValue::Set(self.difficulty),
            rating: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a course with default values.
pub async fn create_course(db: &DatabaseConnection) -> Result<entity::course::Model, DbErr> {
    CourseFactory::new(db).build().await
}

/// Links an author to a course.
pub async fn add_course_author(
    db: &DatabaseConnection,
    course_id: i32,
    user_id: i32,
) -> Result<entity::course_author::Model, DbErr> {
    entity::course_author::ActiveModel {
        course_id: ActiveValue::Set(course_id),
        user_id: ActiveValue::Set(user_id),
    }
    .insert(db)
    .await
}

/// Creates a tag and links it to a course.
pub async fn add_course_tag(
    db: &DatabaseConnection,
    course_id: i32,
    name: impl Into<String>,
) -> Result<entity::tag::Model, DbErr> {
    let tag = entity::tag::ActiveModel {
        name: ActiveValue::Set(name.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    entity::course_tag::ActiveModel {
        course_id: ActiveValue::Set(course_id),
        tag_id: ActiveValue::Set(tag.id),
    }
    .insert(db)
    .await?;

    Ok(tag)
}
