use crate::server::{data::notification::NotificationRepository, model::page::PageRequest};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_for_user_paginated;
mod mark_read;
