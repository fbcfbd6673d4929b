//! Achievement service for business logic.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{achievement::AchievementRepository, user::UserRepository},
    error::AppError,
    model::achievement::{
        Achievement, CreateAchievementParams, EarnedAchievement, UpdateAchievementParams,
    },
};

pub struct AchievementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AchievementService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Achievement>, AppError> {
        let rows = AchievementRepository::new(self.db).get_all().await?;

        Ok(rows.into_iter().map(Achievement::from_entity).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Achievement, AppError> {
        AchievementRepository::new(self.db)
            .find_by_id(id)
            .await?
            .map(Achievement::from_entity)
            .ok_or_else(|| AppError::NotFound("Achievement not found".to_string()))
    }

    pub async fn create(&self, params: CreateAchievementParams) -> Result<Achievement, AppError> {
        let achievement = AchievementRepository::new(self.db).create(params).await?;

        tracing::info!(achievement_id = achievement.id, "Created achievement");

        Ok(Achievement::from_entity(achievement))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateAchievementParams,
    ) -> Result<Achievement, AppError> {
        AchievementRepository::new(self.db)
            .update(id, params)
            .await?
            .map(Achievement::from_entity)
            .ok_or_else(|| AppError::NotFound("Achievement not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if AchievementRepository::new(self.db).delete(id).await? == 0 {
            return Err(AppError::NotFound("Achievement not found".to_string()));
        }

        Ok(())
    }

    /// Grants an achievement to a user. Granting twice keeps the first grant.
    ///
    /// # Returns
    /// - `Ok(EarnedAchievement)` - The grant with its original timestamp
    /// - `Err(AppError::NotFound)` - Unknown achievement or user
    pub async fn grant(
        &self,
        achievement_id: i32,
        user_id: i32,
    ) -> Result<EarnedAchievement, AppError> {
        let achievement = self.get(achievement_id).await?;

        if UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let grant = AchievementRepository::new(self.db)
            .grant(user_id, achievement_id)
            .await?;

        Ok(EarnedAchievement {
            achievement,
            achieved_at: grant.achieved_at,
        })
    }

    /// Lists what a user has earned, most recent first.
    pub async fn earned_by(&self, user_id: i32) -> Result<Vec<EarnedAchievement>, AppError> {
        let rows = AchievementRepository::new(self.db)
            .earned_by_user(user_id)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(grant, achievement)| EarnedAchievement {
                achievement: Achievement::from_entity(achievement),
                achieved_at: grant.achieved_at,
            })
            .collect())
    }
}
