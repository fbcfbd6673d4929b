use crate::{
    model::course::Difficulty,
    server::{
        data::section::SectionRepository,
        model::course::{CreateQuestionParams, CreateSectionParams, SectionBody},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_by_module;
