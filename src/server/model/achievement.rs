use chrono::{DateTime, Utc};

use crate::model::achievement::{
    AchievementDto, CreateAchievementDto, UpdateAchievementDto, UserAchievementDto,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Achievement {
    pub fn from_entity(entity: entity::achievement::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            points: entity.points,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> AchievementDto {
        AchievementDto {
            id: self.id,
            name: self.name,
            description: self.description,
            points: self.points,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// An achievement together with when the user earned it.
#[derive(Debug, Clone, PartialEq)]
pub struct EarnedAchievement {
    pub achievement: Achievement,
    pub achieved_at: DateTime<Utc>,
}

impl EarnedAchievement {
    pub fn into_dto(self) -> UserAchievementDto {
        UserAchievementDto {
            id: self.achievement.id,
            name: self.achievement.name,
            description: self.achievement.description,
            points: self.achievement.points,
            achieved_at: self.achieved_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateAchievementParams {
    pub name: String,
    pub description: String,
    pub points: i32,
}

impl From<CreateAchievementDto> for CreateAchievementParams {
    fn from(dto: CreateAchievementDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            points: dto.points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateAchievementParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub points: Option<i32>,
}

impl From<UpdateAchievementDto> for UpdateAchievementParams {
    fn from(dto: UpdateAchievementDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            points: dto.points,
        }
    }
}
