use crate::server::{data::module::ModuleRepository, model::page::PageRequest};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_by_unit_paginated;
mod next_number;
