use crate::{
    model::user::Role,
    server::{
        data::user::UserRepository,
        model::{
            page::PageRequest,
            user::{CreateUserParams, Streak, UpdatePreferencesParams},
        },
    },
};
use chrono::NaiveDate;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod exists_by_email_or_username;
mod get_paginated;
mod save_streak;
mod upsert_preferences;

fn password_user(username: &str, email: &str) -> CreateUserParams {
    CreateUserParams {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: Some("$argon2id$placeholder".to_string()),
        oauth_id: None,
        role: Role::User,
        first_name: None,
        last_name: None,
        profile_picture_url: None,
        is_email_verified: false,
    }
}
