use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An achievement as earned by a user.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievementDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub points: i32,
    pub achieved_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
pub struct CreateAchievementDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0))]
    pub points: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug, Default)]
pub struct UpdateAchievementDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub points: Option<i32>,
}
