use crate::{
    model::course::ProgressStatus,
    server::{data::progress::ProgressRepository, model::progress::SectionProgressUpdate},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod save_module_progress;
mod upsert_answer;
mod upsert_enrollment;
mod upsert_section_progress;
