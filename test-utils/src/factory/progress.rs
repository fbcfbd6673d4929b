//! Learner progress factories.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Enrolls a user in a course with no current unit or module.
pub async fn enroll_user(
    db: &DatabaseConnection,
    user_id: i32,
    course_id: i32,
) -> Result<entity::user_course::Model, DbErr> {
    let now = Utc::now();
    entity::user_course::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        course_id: ActiveValue::Set(course_id),
        current_unit_id: ActiveValue::Set(None),
        current_module_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

/// Stores a module progress row with the given percentage and status.
pub async fn create_module_progress(
    db: &DatabaseConnection,
    user_id: i32,
    module_id: i32,
    progress: i32,
    status: &str,
) -> Result<entity::user_module_progress::Model, DbErr> {
    let now = Utc::now();
    entity::user_module_progress::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        module_id: ActiveValue::Set(module_id),
        current_position: ActiveValue::Set(0),
        progress: ActiveValue::Set(progress),
        status: ActiveValue::Set(status.to_string()),
        started_at: ActiveValue::Set(now),
        completed_at: ActiveValue::Set((status == "completed").then_some(now)),
        last_accessed: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
