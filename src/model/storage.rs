use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Top-level prefixes uploads may be placed under.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum StorageFolder {
    ProfilePictures,
    Courses,
    Achievements,
}

impl StorageFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfilePictures => "profile-pictures",
            Self::Courses => "courses",
            Self::Achievements => "achievements",
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequestDto {
    pub folder: StorageFolder,
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
    #[validate(length(min = 1, max = 127))]
    pub content_type: String,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUploadDto {
    pub url: String,
    pub key: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
pub struct DeleteObjectDto {
    #[validate(length(min = 1))]
    pub key: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CountQuery {
    #[serde(default)]
    pub prefix: String,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct ObjectCountDto {
    pub prefix: String,
    pub count: u64,
}
