//! Achievement data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::collections::HashMap;

use crate::server::model::achievement::{CreateAchievementParams, UpdateAchievementParams};

pub struct AchievementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AchievementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateAchievementParams,
    ) -> Result<entity::achievement::Model, DbErr> {
        let now = Utc::now();
        entity::achievement::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            points: ActiveValue::Set(params.points),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::achievement::Model>, DbErr> {
        entity::prelude::Achievement::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::achievement::Model>, DbErr> {
        entity::prelude::Achievement::find()
            .order_by_asc(entity::achievement::Column::Id)
            .all(self.db)
            .await
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - The updated achievement
    /// - `Ok(None)` - No achievement with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: i32,
        params: UpdateAchievementParams,
    ) -> Result<Option<entity::achievement::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::achievement::ActiveModel = existing.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(points) = params.points {
            active.points = ActiveValue::Set(points);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Achievement::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Grants an achievement to a user. Granting it again keeps the original timestamp.
    pub async fn grant(
        &self,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<entity::user_achievement::Model, DbErr> {
        let existing = entity::prelude::UserAchievement::find_by_id((user_id, achievement_id))
            .one(self.db)
            .await?;

        if let Some(existing) = existing {
            return Ok(existing);
        }

        entity::user_achievement::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            achievement_id: ActiveValue::Set(achievement_id),
            achieved_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Gets the achievements a user has earned, most recent first.
    pub async fn earned_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<(entity::user_achievement::Model, entity::achievement::Model)>, DbErr> {
        let grants = entity::prelude::UserAchievement::find()
            .filter(entity::user_achievement::Column::UserId.eq(user_id))
            .order_by_desc(entity::user_achievement::Column::AchievedAt)
            .all(self.db)
            .await?;

        let ids: Vec<i32> = grants.iter().map(|grant| grant.achievement_id).collect();
        let achievements: HashMap<i32, entity::achievement::Model> = if ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Achievement::find()
                .filter(entity::achievement::Column::Id.is_in(ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|achievement| (achievement.id, achievement))
                .collect()
        };

        Ok(grants
            .into_iter()
            .filter_map(|grant| {
                achievements
                    .get(&grant.achievement_id)
                    .cloned()
                    .map(|achievement| (grant, achievement))
            })
            .collect())
    }
}
