use crate::server::{data::unit::UnitRepository, model::course::UpdateUnitParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod next_number;
mod number_taken;
