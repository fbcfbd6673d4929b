//! Notification factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a notification for a user.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Recipient of the notification
/// - `is_read` - Initial read flag
pub async fn create_notification(
    db: &DatabaseConnection,
    user_id: i32,
    is_read: bool,
) -> Result<entity::notification::Model, DbErr> {
    let id = next_id();
    entity::notification::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        title: ActiveValue::Set(format!("Notification {}", id)),
        content: ActiveValue::Set("Something happened".to_string()),
        is_read: ActiveValue::Set(is_read),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
