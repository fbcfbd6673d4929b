//! User service for business logic.
//!
//! This module provides the `UserService` for password and OAuth accounts, token
//! issuing and refresh, profile and preference management, streak reads and admin
//! user management. It works with domain models rather than DTOs.

use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::user::Role,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::{
            page::{Page, PageRequest},
            user::{
                AuthSession, CreateUserParams, OAuthIdentity, Preferences, Streak, TokenPair,
                UpdateProfileParams, User,
            },
        },
        service::{
            streak,
            token::{TokenService, TokenType},
        },
        util::password::{hash_password, verify_password},
    },
};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;

/// Service providing business logic for user management.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    tokens: TokenService<'a>,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `jwt_secret` - Key used to sign and verify tokens
    pub fn new(db: &'a DatabaseConnection, jwt_secret: &'a str) -> Self {
        Self {
            db,
            tokens: TokenService::new(jwt_secret),
        }
    }

    /// Registers a password account and signs it in.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - Tokens and the new user
    /// - `Err(AppError::AccountExists)` - Email or username already registered
    pub async fn sign_up(
        &self,
        username: String,
        email: String,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        let user_repo = UserRepository::new(self.db);
        let email = normalize_email(&email);

        if user_repo
            .exists_by_email_or_username(&email, &username)
            .await?
        {
            return Err(AppError::AccountExists(
                "An account with this email or username already exists".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;
        let user = user_repo
            .create(CreateUserParams {
                username,
                email,
                password_hash: Some(password_hash),
                oauth_id: None,
                role: Role::User,
                first_name: None,
                last_name: None,
                profile_picture_url: None,
                is_email_verified: false,
            })
            .await
            .map_err(account_exists_on_conflict)?;

        tracing::info!(user_id = user.id, "Registered user {}", user.username);

        self.session_for(User::from_entity(user)?)
    }

    /// Signs in with email and password.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - Tokens and the user, with `last_login_at` stamped
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email, OAuth-only account or wrong password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(&normalize_email(email)).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let verified = user
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(password, hash));
        if !verified {
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = user_repo.touch_last_login(user, Utc::now()).await?;

        self.session_for(User::from_entity(user)?)
    }

    /// Exchanges a refresh token for a new token pair.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Fresh access and refresh tokens
    /// - `Err(AuthError::InvalidRefreshToken)` - Bad, expired or access-typed token,
    ///   or the user no longer exists
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.tokens.verify(refresh_token, TokenType::Refresh)?;

        if UserRepository::new(self.db)
            .find_by_id(claims.user_id)
            .await?
            .is_none()
        {
            return Err(AuthError::InvalidRefreshToken(format!(
                "user {} no longer exists",
                claims.user_id
            ))
            .into());
        }

        Ok(self.tokens.issue_pair(claims.user_id)?)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(UserRepository::new(self.db)
            .find_by_email(&normalize_email(email))
            .await?
            .is_some())
    }

    /// Gets a user's profile with preferences, defaulted when never saved.
    pub async fn get_profile(&self, user_id: i32) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);
        let user = self.require(user_id).await?;

        let preferences = user_repo
            .find_preferences(user_id)
            .await?
            .map(Preferences::from_entity)
            .unwrap_or_default();

        Ok(user.with_preferences(preferences))
    }

    /// Applies a partial profile update, and preferences when present, atomically.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated profile with preferences
    /// - `Err(AppError::NotFound)` - No user with that id
    /// - `Err(AppError::Conflict)` - The new username belongs to another account
    pub async fn update_profile(
        &self,
        user_id: i32,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        let Some(existing) = user_repo.find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        if let Some(username) = &params.username {
            if user_repo.username_taken(username, user_id).await? {
                return Err(AppError::Conflict("Username is already taken".to_string()));
            }
        }

        user_repo.update_profile(existing, &params).await?;

        if let Some(preferences) = params.preferences {
            user_repo.upsert_preferences(user_id, preferences).await?;
        }

        txn.commit().await?;

        self.get_profile(user_id).await
    }

    /// Deletes an account; progress, enrollments and notifications cascade.
    pub async fn delete(&self, user_id: i32) -> Result<(), AppError> {
        let deleted = UserRepository::new(self.db).delete(user_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!(user_id, "Deleted user");

        Ok(())
    }

    /// Gets the user's streak as it reads today.
    pub async fn streak(&self, user_id: i32) -> Result<Streak, AppError> {
        let user = self.require(user_id).await?;

        Ok(streak::as_of(user.streak, Utc::now().date_naive()))
    }

    /// Lists one page of users ordered by id.
    pub async fn list(&self, request: PageRequest) -> Result<Page<User>, AppError> {
        let (rows, total) = UserRepository::new(self.db)
            .get_paginated(request)
            .await?;

        Page::new(rows, total, request).try_map(User::from_entity)
    }

    pub async fn get(&self, user_id: i32) -> Result<User, AppError> {
        self.require(user_id).await
    }

    /// Changes a user's role.
    ///
    /// # Returns
    /// - `Ok(User)` - The user with the new role
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn set_role(&self, user_id: i32, role: Role) -> Result<User, AppError> {
        let Some(user) = UserRepository::new(self.db).set_role(user_id, role).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        tracing::info!(user_id, role = role.as_str(), "Changed user role");

        User::from_entity(user)
    }

    /// Signs in an OAuth identity, creating or linking the account as needed.
    ///
    /// Accounts are matched by OAuth id first, then by email. A new account gets a
    /// username derived from the email's local part, suffixed when taken.
    pub async fn oauth_sign_in(&self, identity: OAuthIdentity) -> Result<AuthSession, AppError> {
        let user_repo = UserRepository::new(self.db);
        let now = Utc::now();
        let email = normalize_email(&identity.email);

        let user = match user_repo.find_by_oauth_id(&identity.oauth_id).await? {
            Some(user) => user_repo.touch_last_login(user, now).await?,
            None => match user_repo.find_by_email(&email).await? {
                Some(user) => {
                    let user = user_repo.link_oauth_id(user, identity.oauth_id).await?;
                    user_repo.touch_last_login(user, now).await?
                }
                None => {
                    let username = self.free_username(&email).await?;
                    let user = user_repo
                        .create(CreateUserParams {
                            username,
                            email,
                            password_hash: None,
                            oauth_id: Some(identity.oauth_id),
                            role: Role::User,
                            first_name: identity.first_name,
                            last_name: identity.last_name,
                            profile_picture_url: identity.profile_picture_url,
                            is_email_verified: true,
                        })
                        .await?;

                    tracing::info!(user_id = user.id, "Registered OAuth user {}", user.username);

                    user
                }
            },
        };

        self.session_for(User::from_entity(user)?)
    }

    async fn free_username(&self, email: &str) -> Result<String, AppError> {
        let user_repo = UserRepository::new(self.db);
        let base = username_base(email);

        if user_repo.find_by_username(&base).await?.is_none() {
            return Ok(base);
        }

        loop {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            let mut candidate = base.clone();
            candidate.truncate(USERNAME_MAX - 7);
            candidate.push('_');
            candidate.push_str(&suffix[..6]);

            if user_repo.find_by_username(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
    }

    async fn require(&self, user_id: i32) -> Result<User, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        User::from_entity(user)
    }

    fn session_for(&self, user: User) -> Result<AuthSession, AppError> {
        let tokens = self.tokens.issue_pair(user.id)?;

        Ok(AuthSession { tokens, user })
    }
}

/// Emails are stored and matched lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Maps a unique violation on insert to `AccountExists`, covering concurrent
/// sign-ups that both passed the existence check.
fn account_exists_on_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AccountExists(
            "An account with this email or username already exists".to_string(),
        ),
        _ => err.into(),
    }
}

/// Derives a username from an email's local part.
///
/// Keeps ASCII alphanumerics and underscores, lowercased, clamped to the allowed
/// length and padded when too short.
fn username_base(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut name: String = local
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .take(USERNAME_MAX)
        .collect();

    while name.len() < USERNAME_MIN {
        name.push('_');
    }

    name
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    #[test]
    fn emails_are_lowercased() {
        assert_eq!(normalize_email(" Jane.Doe@Example.COM "), "jane.doe@example.com");
    }

    #[tokio::test]
    async fn unique_violation_maps_to_account_exists() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        factory::user::UserFactory::new(db)
            .email("dup@example.com")
            .build()
            .await
            .unwrap();
        let err = factory::user::UserFactory::new(db)
            .email("dup@example.com")
            .build()
            .await
            .unwrap_err();

        assert!(matches!(
            account_exists_on_conflict(err),
            AppError::AccountExists(_)
        ));
    }

    #[test]
    fn username_from_email_local_part() {
        assert_eq!(username_base("Jane.Doe+tag@example.com"), "janedoetag");
    }

    #[test]
    fn short_username_is_padded() {
        assert_eq!(username_base("a@example.com"), "a__");
    }

    #[test]
    fn long_username_is_clamped() {
        let email = format!("{}@example.com", "x".repeat(50));

        assert_eq!(username_base(&email).len(), USERNAME_MAX);
    }
}
