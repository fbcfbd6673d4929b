use crate::server::{
    data::achievement::AchievementRepository,
    model::achievement::{CreateAchievementParams, UpdateAchievementParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod grant;
mod update;
