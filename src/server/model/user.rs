//! User domain models and parameters.
//!
//! Provides the account model shared by password and OAuth sign-in, the learner's
//! streak counters and display preferences, and the parameter types used for account
//! creation and profile updates.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::user::{
        AuthPayloadDto, PreferencesDto, Role, StreakDto, TokenPairDto, UpdatePreferencesDto,
        UpdateProfileDto, UserDto,
    },
    server::{error::AppError, model::parse_column},
};

pub const DEFAULT_THEME: &str = "light";
pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Display preferences of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub theme: String,
    pub lang: String,
    pub timezone: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Preferences {
    pub fn from_entity(entity: entity::user_preference::Model) -> Self {
        Self {
            theme: entity.theme,
            lang: entity.lang,
            timezone: entity.timezone,
        }
    }

    pub fn into_dto(self) -> PreferencesDto {
        PreferencesDto {
            theme: self.theme,
            lang: self.lang,
            timezone: self.timezone,
        }
    }
}

/// Consecutive-day activity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streak {
    pub current: i32,
    pub longest: i32,
    /// Last day on which activity was recorded.
    pub last_date: Option<NaiveDate>,
}

impl Streak {
    pub fn from_entity(entity: &entity::user::Model) -> Self {
        Self {
            current: entity.current_streak,
            longest: entity.longest_streak,
            last_date: entity.last_streak_date,
        }
    }

    pub fn into_dto(self) -> StreakDto {
        StreakDto {
            current_streak: self.current,
            longest_streak: self.longest,
            last_streak_date: self.last_date,
        }
    }
}

/// Application user.
///
/// Either `password_hash` or `oauth_id` is set depending on how the account was
/// created. Neither is exposed through [`User::into_dto`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub oauth_id: Option<String>,
    pub password_hash: Option<String>,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub streak: Streak,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Loaded only for profile reads.
    pub preferences: Option<Preferences>,
}

impl User {
    /// Converts an entity model to a user domain model.
    ///
    /// # Returns
    /// - `Ok(User)` - Converted user
    /// - `Err(AppError::InternalErr(InvalidEnumValue))` - Stored role is unknown
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let role = parse_column("users.role", &entity.role, Role::parse)?;
        let streak = Streak::from_entity(&entity);

        Ok(Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            oauth_id: entity.oauth_id,
            password_hash: entity.password_hash,
            role,
            first_name: entity.first_name,
            last_name: entity.last_name,
            profile_picture_url: entity.profile_picture_url,
            bio: entity.bio,
            location: entity.location,
            is_active: entity.is_active,
            is_email_verified: entity.is_email_verified,
            streak,
            last_login_at: entity.last_login_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            preferences: None,
        })
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role,
            first_name: self.first_name,
            last_name: self.last_name,
            profile_picture_url: self.profile_picture_url,
            bio: self.bio,
            location: self.location,
            is_active: self.is_active,
            is_email_verified: self.is_email_verified,
            current_streak: self.streak.current,
            longest_streak: self.streak.longest,
            last_streak_date: self.streak.last_date,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            preferences: self.preferences.map(Preferences::into_dto),
        }
    }
}

/// Parameters for inserting a new account.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub oauth_id: Option<String>,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub is_email_verified: bool,
}

/// Partial profile update. `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateProfileParams {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub preferences: Option<UpdatePreferencesParams>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdatePreferencesParams {
    pub theme: Option<String>,
    pub lang: Option<String>,
    pub timezone: Option<String>,
}

impl From<UpdatePreferencesDto> for UpdatePreferencesParams {
    fn from(dto: UpdatePreferencesDto) -> Self {
        Self {
            theme: dto.theme,
            lang: dto.lang,
            timezone: dto.timezone,
        }
    }
}

impl From<UpdateProfileDto> for UpdateProfileParams {
    fn from(dto: UpdateProfileDto) -> Self {
        Self {
            username: dto.username,
            first_name: dto.first_name,
            last_name: dto.last_name,
            profile_picture_url: dto.profile_picture_url,
            bio: dto.bio,
            location: dto.location,
            preferences: dto.preferences.map(UpdatePreferencesParams::from),
        }
    }
}

/// Identity returned by an OAuth provider after a successful code exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthIdentity {
    /// Provider-scoped subject, stored as `<provider>:<sub>`.
    pub oauth_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// Signed access and refresh tokens for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    pub fn into_dto(self) -> TokenPairDto {
        TokenPairDto {
            token: self.access,
            refresh_token: self.refresh,
        }
    }
}

/// Result of a successful sign-up, sign-in or OAuth callback.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub tokens: TokenPair,
    pub user: User,
}

impl AuthSession {
    pub fn into_dto(self) -> AuthPayloadDto {
        AuthPayloadDto {
            token: self.tokens.access,
            refresh_token: self.tokens.refresh,
            user: self.user.into_dto(),
        }
    }
}
