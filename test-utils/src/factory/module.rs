//! Module factory for creating test module entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating modules inside an existing unit.
pub struct ModuleFactory<'a> {
    db: &'a DatabaseConnection,
    unit_id: i32,
    module_number: i32,
    name: String,
}

impl<'a> ModuleFactory<'a> {
    /// Creates a new ModuleFactory for the given unit.
    ///
    /// Defaults:
    /// - module_number: `1`
    /// - name: `"Module {id}"`
    pub fn new(db: &'a DatabaseConnection, unit_id: i32) -> Self {
        Self {
            db,
            unit_id,
            module_number: 1,
            name: format!("Module {}", next_id()),
        }
    }

    pub fn module_number(mut self, module_number: i32) -> Self {
        self.module_number = module_number;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds and inserts the module entity into the database.
    pub async fn build(self) -> Result<entity::module::Model, DbErr> {
        let now = Utc::now();
        entity::module::ActiveModel {
            unit_id: ActiveValue::Set(self.unit_id),
            module_number: ActiveValue::Set(self.module_number),
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

/// Creates a module with the given ordinal inside a unit.
pub async fn create_module(
    db: &DatabaseConnection,
    unit_id: i32,
    module_number: i32,
) -> Result<entity::module::Model, DbErr> {
    ModuleFactory::new(db, unit_id)
        .module_number(module_number)
        .build()
        .await
}
