//! Unit factory for creating test unit entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating units inside an existing course.
pub struct UnitFactory<'a> {
    db: &'a DatabaseConnection,
    course_id: i32,
    unit_number: i32,
    name: String,
}

impl<'a> UnitFactory<'a> {
    /// Creates a new UnitFactory for the given course.
    ///
    /// Defaults:
    /// - unit_number: `1`
    /// - name: `"Unit {id}"`
    pub fn new(db: &'a DatabaseConnection, course_id: i32) -> Self {
        Self {
            db,
            course_id,
            unit_number: 1,
            name: format!("Unit {}", next_id()),
        }
    }

    pub fn unit_number(mut self, unit_number: i32) -> Self {
        self.unit_number = unit_number;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds and inserts the unit entity into the database.
    pub async fn build(self) -> Result<entity::unit::Model, DbErr> {
        let now = Utc::now();
        entity::unit::ActiveModel {
            course_id: ActiveValue::Set(self.course_id),
            unit_number: ActiveValue::Set(self.unit_number),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(String::new()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a unit with the given ordinal inside a course.
pub async fn create_unit(
    db: &DatabaseConnection,
    course_id: i32,
    unit_number: i32,
) -> Result<entity::unit::Model, DbErr> {
    UnitFactory::new(db, course_id)
        .unit_number(unit_number)
        .build()
        .await
}
