//! Module service for business logic.
//!
//! Modules are addressed through course and unit; any broken link in that path is
//! treated as missing. Creating or replacing a module's sections happens in the
//! same transaction as the module row.

use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::HashSet;

use crate::{
    model::course::Depth,
    server::{
        data::{module::ModuleRepository, section::SectionRepository, unit::UnitRepository},
        error::AppError,
        model::{
            course::{CreateModuleParams, CreateSectionParams, Module, UpdateModuleParams},
            page::{Page, PageRequest},
        },
        service::tree::ContentTreeBuilder,
    },
};

pub struct ModuleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModuleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists one page of a unit's modules, without sections.
    ///
    /// # Returns
    /// - `Ok(Page<Module>)` - Modules on the page with the total count
    /// - `Err(AppError::NotFound)` - Unknown unit or not part of the course
    pub async fn list(
        &self,
        course_id: i32,
        unit_id: i32,
        request: PageRequest,
    ) -> Result<Page<Module>, AppError> {
        self.require_unit(course_id, unit_id).await?;

        let (rows, total) = ModuleRepository::new(self.db)
            .get_by_unit_paginated(unit_id, request)
            .await?;

        let modules = ContentTreeBuilder::new(self.db, Depth::Summary)
            .build_modules(rows)
            .await?;

        Ok(Page::new(modules, total, request))
    }

    /// Gets one module with its sections, and the learner's progress when given.
    ///
    /// # Returns
    /// - `Ok(Module)` - The module with sections
    /// - `Err(AppError::NotFound)` - Any of course, unit or module does not line up
    pub async fn get(
        &self,
        course_id: i32,
        unit_id: i32,
        module_id: i32,
        user_id: Option<i32>,
    ) -> Result<Module, AppError> {
        let row = self.require_module(course_id, unit_id, module_id).await?;

        let mut modules = ContentTreeBuilder::new(self.db, Depth::Full)
            .for_user(user_id)
            .build_modules(vec![row])
            .await
            .inspect_err(|e| {
                tracing::error!(module_id, ?user_id, "Failed to load module: {}", e)
            })?;

        modules
            .pop()
            .ok_or_else(|| AppError::NotFound("Module not found".to_string()))
    }

    /// Creates a module and its sections.
    ///
    /// # Returns
    /// - `Ok(Module)` - The created module with sections
    /// - `Err(AppError::NotFound)` - Unknown unit or not part of the course
    /// - `Err(AppError::BadRequest)` - Two sections share a position
    /// - `Err(AppError::Conflict)` - The module number is already used in the unit
    pub async fn create(
        &self,
        course_id: i32,
        params: CreateModuleParams,
    ) -> Result<Module, AppError> {
        self.require_unit(course_id, params.unit_id).await?;
        check_positions(&params.sections)?;

        let txn = self.db.begin().await?;
        let module_repo = ModuleRepository::new(&txn);

        let module_number = match params.module_number {
            Some(number) => number,
            None => module_repo.next_number(params.unit_id).await?,
        };

        if module_repo
            .number_taken(params.unit_id, module_number, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Module number {} already exists in this unit",
                module_number
            )));
        }

        let module = module_repo
            .create(params.unit_id, module_number, params.name, params.description)
            .await?;

        let section_repo = SectionRepository::new(&txn);
        for section in &params.sections {
            section_repo.create(module.id, section).await?;
        }

        txn.commit().await?;

        self.get(course_id, params.unit_id, module.id, None).await
    }

    /// Applies a partial module update. Present sections replace all existing ones.
    ///
    /// # Returns
    /// - `Ok(Module)` - The updated module with sections
    /// - `Err(AppError::NotFound)` - Any of course, unit or module does not line up
    /// - `Err(AppError::Conflict)` - The new number is already used in the unit
    pub async fn update(
        &self,
        course_id: i32,
        params: UpdateModuleParams,
    ) -> Result<Module, AppError> {
        let existing = self
            .require_module(course_id, params.unit_id, params.module_id)
            .await?;
        if let Some(sections) = &params.sections {
            check_positions(sections)?;
        }

        let txn = self.db.begin().await?;
        let module_repo = ModuleRepository::new(&txn);

        if let Some(number) = params.module_number {
            if module_repo
                .number_taken(params.unit_id, number, Some(params.module_id))
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "Module number {} already exists in this unit",
                    number
                )));
            }
        }

        module_repo.update(existing, &params).await?;

        if let Some(sections) = &params.sections {
            let section_repo = SectionRepository::new(&txn);
            section_repo.delete_by_module(params.module_id).await?;
            for section in sections {
                section_repo.create(params.module_id, section).await?;
            }
        }

        txn.commit().await?;

        self.get(course_id, params.unit_id, params.module_id, None)
            .await
    }

    pub async fn delete(
        &self,
        course_id: i32,
        unit_id: i32,
        module_id: i32,
    ) -> Result<(), AppError> {
        self.require_module(course_id, unit_id, module_id).await?;
        ModuleRepository::new(self.db).delete(module_id).await?;

        Ok(())
    }

    async fn require_unit(&self, course_id: i32, unit_id: i32) -> Result<(), AppError> {
        match UnitRepository::new(self.db)
            .find_in_course(course_id, unit_id)
            .await?
        {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Unit not found".to_string())),
        }
    }

    /// Loads a module after checking it sits under the given unit and course.
    pub(crate) async fn require_module(
        &self,
        course_id: i32,
        unit_id: i32,
        module_id: i32,
    ) -> Result<entity::module::Model, AppError> {
        self.require_unit(course_id, unit_id).await?;

        ModuleRepository::new(self.db)
            .find_in_unit(unit_id, module_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Module not found".to_string()))
    }
}

fn check_positions(sections: &[CreateSectionParams]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for section in sections {
        if !seen.insert(section.position) {
            return Err(AppError::BadRequest(format!(
                "Duplicate section position {}",
                section.position
            )));
        }
    }

    Ok(())
}
