//! Module data repository.
//!
//! Modules are numbered within their unit, with the same uniqueness rule as units
//! within a course.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{course::UpdateModuleParams, page::PageRequest};

pub struct ModuleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ModuleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        unit_id: i32,
        module_number: i32,
        name: String,
        description: String,
    ) -> Result<entity::module::Model, DbErr> {
        let now = Utc::now();
        entity::module::ActiveModel {
            unit_id: ActiveValue::Set(unit_id),
            module_number: ActiveValue::Set(module_number),
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, module_id: i32) -> Result<Option<entity::module::Model>, DbErr> {
        entity::prelude::Module::find_by_id(module_id)
            .one(self.db)
            .await
    }

    /// Finds a module only if it belongs to the given unit.
    pub async fn find_in_unit(
        &self,
        unit_id: i32,
        module_id: i32,
    ) -> Result<Option<entity::module::Model>, DbErr> {
        entity::prelude::Module::find_by_id(module_id)
            .filter(entity::module::Column::UnitId.eq(unit_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_ids(
        &self,
        module_ids: &[i32],
    ) -> Result<Vec<entity::module::Model>, DbErr> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Module::find()
            .filter(entity::module::Column::Id.is_in(module_ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Gets the modules of several units, ordered by unit then module number.
    pub async fn get_by_units(
        &self,
        unit_ids: &[i32],
    ) -> Result<Vec<entity::module::Model>, DbErr> {
        if unit_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Module::find()
            .filter(entity::module::Column::UnitId.is_in(unit_ids.to_vec()))
            .order_by_asc(entity::module::Column::UnitId)
            .order_by_asc(entity::module::Column::ModuleNumber)
            .all(self.db)
            .await
    }

    /// Gets one page of a unit's modules ordered by module number.
    ///
    /// # Returns
    /// - `Ok((modules, total))` - Modules on the page and the count across all pages
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_unit_paginated(
        &self,
        unit_id: i32,
        request: PageRequest,
    ) -> Result<(Vec<entity::module::Model>, u64), DbErr> {
        let paginator = entity::prelude::Module::find()
            .filter(entity::module::Column::UnitId.eq(unit_id))
            .order_by_asc(entity::module::Column::ModuleNumber)
            .paginate(self.db, request.page_size);

        let total = paginator.num_items().await?;
        let modules = paginator.fetch_page(request.index()).await?;

        Ok((modules, total))
    }

    /// Gets the lowest-numbered module of a unit.
    pub async fn first_in_unit(
        &self,
        unit_id: i32,
    ) -> Result<Option<entity::module::Model>, DbErr> {
        entity::prelude::Module::find()
            .filter(entity::module::Column::UnitId.eq(unit_id))
            .order_by_asc(entity::module::Column::ModuleNumber)
            .one(self.db)
            .await
    }

    /// Gets the number following the highest module number in a unit, 1 when empty.
    pub async fn next_number(&self, unit_id: i32) -> Result<i32, DbErr> {
        let last = entity::prelude::Module::find()
            .filter(entity::module::Column::UnitId.eq(unit_id))
            .order_by_desc(entity::module::Column::ModuleNumber)
            .one(self.db)
            .await?;

        Ok(last.map(|module| module.module_number + 1).unwrap_or(1))
    }

    /// Checks whether another module of the unit already uses `module_number`.
    pub async fn number_taken(
        &self,
        unit_id: i32,
        module_number: i32,
        excluding: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Module::find()
            .filter(entity::module::Column::UnitId.eq(unit_id))
            .filter(entity::module::Column::ModuleNumber.eq(module_number));

        if let Some(module_id) = excluding {
            query = query.filter(entity::module::Column::Id.ne(module_id));
        }

        Ok(query.one(self.db).await?.is_some())
    }

    pub async fn update(
        &self,
        existing: entity::module::Model,
        params: &UpdateModuleParams,
    ) -> Result<entity::module::Model, DbErr> {
        let mut active: entity::module::ActiveModel = existing.into();
        if let Some(module_number) = params.module_number {
            active.module_number = ActiveValue::Set(module_number);
        }
        if let Some(name) = &params.name {
            active.name = ActiveValue::Set(name.clone());
        }
        if let Some(description) = &params.description {
            active.description = ActiveValue::Set(description.clone());
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn delete(&self, module_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Module::delete_by_id(module_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
