//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for account rows and their preference
//! rows. It handles account creation for password and OAuth sign-up, lookups by the
//! unique keys, profile and role updates, streak counters and paginated listing.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::user::Role,
    server::model::{
        page::PageRequest,
        user::{
            CreateUserParams, Preferences, Streak, UpdatePreferencesParams, UpdateProfileParams,
        },
    },
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new account.
    ///
    /// # Arguments
    /// - `params` - Account fields; exactly one of password hash or OAuth id is expected
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted user
    /// - `Err(DbErr)` - Insert failed, including duplicate username or email
    pub async fn create(&self, params: CreateUserParams) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            username: ActiveValue::Set(params.username),
            email: ActiveValue::Set(params.email),
            oauth_id: ActiveValue::Set(params.oauth_id),
            password_hash: ActiveValue::Set(params.password_hash),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            profile_picture_url: ActiveValue::Set(params.profile_picture_url),
            bio: ActiveValue::Set(None),
            location: ActiveValue::Set(None),
            is_active: ActiveValue::Set(true),
            is_email_verified: ActiveValue::Set(params.is_email_verified),
            current_streak: ActiveValue::Set(0),
            longest_streak: ActiveValue::Set(0),
            last_streak_date: ActiveValue::Set(None),
            last_login_at: ActiveValue::Set(Some(now)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn find_by_oauth_id(
        &self,
        oauth_id: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::OauthId.eq(oauth_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Checks whether an account already uses the email or the username.
    pub async fn exists_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(
                Condition::any()
                    .add(entity::user::Column::Email.eq(email))
                    .add(entity::user::Column::Username.eq(username)),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn username_taken(&self, username: &str, excluding: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .filter(entity::user::Column::Id.ne(excluding))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Returns a paginated list of all users ordered by id.
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users on the page and the count across all pages
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        request: PageRequest,
    ) -> Result<(Vec<entity::user::Model>, u64), DbErr> {
        let paginator = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, request.page_size);

        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(request.index()).await?;

        Ok((users, total))
    }

    /// Stamps a successful sign-in.
    pub async fn touch_last_login(
        &self,
        existing: entity::user::Model,
        at: DateTime<Utc>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active: entity::user::ActiveModel = existing.into();
        active.last_login_at = ActiveValue::Set(Some(at));
        active.update(self.db).await
    }

    /// Links an OAuth identity to an existing account and marks its email verified.
    pub async fn link_oauth_id(
        &self,
        existing: entity::user::Model,
        oauth_id: String,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active: entity::user::ActiveModel = existing.into();
        active.oauth_id = ActiveValue::Set(Some(oauth_id));
        active.is_email_verified = ActiveValue::Set(true);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    /// Applies a partial profile update. Preferences are stored separately.
    pub async fn update_profile(
        &self,
        existing: entity::user::Model,
        params: &UpdateProfileParams,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active: entity::user::ActiveModel = existing.into();
        if let Some(username) = &params.username {
            active.username = ActiveValue::Set(username.clone());
        }
        if let Some(first_name) = &params.first_name {
            active.first_name = ActiveValue::Set(Some(first_name.clone()));
        }
        if let Some(last_name) = &params.last_name {
            active.last_name = ActiveValue::Set(Some(last_name.clone()));
        }
        if let Some(url) = &params.profile_picture_url {
            active.profile_picture_url = ActiveValue::Set(Some(url.clone()));
        }
        if let Some(bio) = &params.bio {
            active.bio = ActiveValue::Set(Some(bio.clone()));
        }
        if let Some(location) = &params.location {
            active.location = ActiveValue::Set(Some(location.clone()));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    /// Sets a user's role.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - The updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_role(&self, id: i32, role: Role) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = existing.into();
        active.role = ActiveValue::Set(role.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn save_streak(&self, id: i32, streak: Streak) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::CurrentStreak,
                sea_orm::sea_query::Expr::value(streak.current),
            )
            .col_expr(
                entity::user::Column::LongestStreak,
                sea_orm::sea_query::Expr::value(streak.longest),
            )
            .col_expr(
                entity::user::Column::LastStreakDate,
                sea_orm::sea_query::Expr::value(streak.last_date),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected)
    }

    /// Gets the stored preferences, if the user ever saved any.
    pub async fn find_preferences(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::user_preference::Model>, DbErr> {
        entity::prelude::UserPreference::find_by_id(user_id)
            .one(self.db)
            .await
    }

    /// Merges the given preference fields into the stored row, starting from defaults.
    pub async fn upsert_preferences(
        &self,
        user_id: i32,
        params: UpdatePreferencesParams,
    ) -> Result<entity::user_preference::Model, DbErr> {
        let current = self
            .find_preferences(user_id)
            .await?
            .map(Preferences::from_entity)
            .unwrap_or_default();

        let entity = entity::prelude::UserPreference::insert(entity::user_preference::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            theme: ActiveValue::Set(params.theme.unwrap_or(current.theme)),
            lang: ActiveValue::Set(params.lang.unwrap_or(current.lang)),
            timezone: ActiveValue::Set(params.timezone.unwrap_or(current.timezone)),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::user_preference::Column::UserId)
                .update_columns([
                    entity::user_preference::Column::Theme,
                    entity::user_preference::Column::Lang,
                    entity::user_preference::Column::Timezone,
                    entity::user_preference::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(entity)
    }
}
