use crate::{
    model::course::{CourseFilter, Difficulty},
    server::{
        data::course::CourseRepository,
        model::{
            course::{CreateCourseParams, UpdateCourseParams},
            page::PageRequest,
        },
    },
};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod update;

fn course_params(name: &str) -> CreateCourseParams {
    CreateCourseParams {
        name: name.to_string(),
        description: "Sorting and searching".to_string(),
        requirements: None,
        what_you_learn: None,
        background_color: None,
        icon_url: None,
        duration: 90,
        difficulty: Difficulty::Beginner,
        author_ids: Vec::new(),
        tags: Vec::new(),
    }
}
