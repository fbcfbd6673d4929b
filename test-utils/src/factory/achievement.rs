//! Achievement factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an achievement with a unique name worth `points`.
pub async fn create_achievement(
    db: &DatabaseConnection,
    points: i32,
) -> Result<entity::achievement::Model, DbErr> {
    let now = Utc::now();
    entity::achievement::ActiveModel {
        name: ActiveValue::Set(format!("Achievement {}", next_id())),
        description: ActiveValue::Set("Awarded in tests".to_string()),
        points: ActiveValue::Set(points),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Awards an achievement to a user.
pub async fn grant_achievement(
    db: &DatabaseConnection,
    user_id: i32,
    achievement_id: i32,
) -> Result<entity::user_achievement::Model, DbErr> {
    entity::user_achievement::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        achievement_id: ActiveValue::Set(achievement_id),
        achieved_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
