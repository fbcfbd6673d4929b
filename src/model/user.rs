use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Instructor => "instructor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            "instructor" => Some(Self::Instructor),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
pub struct SignUpDto {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
pub struct SignInDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenDto {
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairDto {
    pub token: String,
    pub refresh_token: String,
}

/// Returned by sign-up, sign-in and OAuth callbacks.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayloadDto {
    pub token: String,
    pub refresh_token: String,
    pub user: UserDto,
}

#[derive(Deserialize, Debug)]
pub struct CheckEmailQuery {
    pub email: String,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct EmailExistsDto {
    pub exists: bool,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PreferencesDto {
    pub theme: String,
    pub lang: String,
    pub timezone: String,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_streak_date: Option<NaiveDate>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferencesDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub preferences: Option<UpdatePreferencesDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug, Default)]
pub struct UpdatePreferencesDto {
    pub theme: Option<String>,
    pub lang: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct UpdateRoleDto {
    pub role: Role,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StreakDto {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_streak_date: Option<NaiveDate>,
}
