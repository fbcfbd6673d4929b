//! Unit service for business logic.
//!
//! Units are addressed through their course; a unit id under the wrong course is
//! treated as missing. New units get the next free number unless one is given.

use sea_orm::DatabaseConnection;

use crate::{
    model::course::Depth,
    server::{
        data::{course::CourseRepository, unit::UnitRepository},
        error::AppError,
        model::course::{CreateUnitParams, Unit, UpdateUnitParams},
        service::tree::ContentTreeBuilder,
    },
};

pub struct UnitService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UnitService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a course's units with their modules, ordered by unit number.
    ///
    /// # Returns
    /// - `Ok(Vec<Unit>)` - Units of the course
    /// - `Err(AppError::NotFound)` - No course with that id
    pub async fn list(&self, course_id: i32) -> Result<Vec<Unit>, AppError> {
        self.require_course(course_id).await?;

        let rows = UnitRepository::new(self.db)
            .get_by_courses(&[course_id])
            .await?;

        ContentTreeBuilder::new(self.db, Depth::Summary)
            .build_units(rows)
            .await
    }

    /// Gets one unit with its modules.
    ///
    /// # Returns
    /// - `Ok(Unit)` - The unit
    /// - `Err(AppError::NotFound)` - Unknown unit or not part of the course
    pub async fn get(&self, course_id: i32, unit_id: i32) -> Result<Unit, AppError> {
        let Some(row) = UnitRepository::new(self.db)
            .find_in_course(course_id, unit_id)
            .await?
        else {
            return Err(AppError::NotFound("Unit not found".to_string()));
        };

        let mut units = ContentTreeBuilder::new(self.db, Depth::Summary)
            .build_units(vec![row])
            .await?;

        units
            .pop()
            .ok_or_else(|| AppError::NotFound("Unit not found".to_string()))
    }

    /// Creates a unit in a course.
    ///
    /// # Returns
    /// - `Ok(Unit)` - The created unit
    /// - `Err(AppError::NotFound)` - No course with that id
    /// - `Err(AppError::Conflict)` - The unit number is already used in the course
    pub async fn create(&self, params: CreateUnitParams) -> Result<Unit, AppError> {
        self.require_course(params.course_id).await?;

        let unit_repo = UnitRepository::new(self.db);
        let unit_number = match params.unit_number {
            Some(number) => number,
            None => unit_repo.next_number(params.course_id).await?,
        };

        if unit_repo
            .number_taken(params.course_id, unit_number, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Unit number {} already exists in this course",
                unit_number
            )));
        }

        let unit = unit_repo
            .create(params.course_id, unit_number, params.name, params.description)
            .await?;

        Ok(Unit::from_entity(unit))
    }

    /// Applies a partial unit update.
    ///
    /// # Returns
    /// - `Ok(Unit)` - The updated unit with its modules
    /// - `Err(AppError::NotFound)` - Unknown unit or not part of the course
    /// - `Err(AppError::Conflict)` - The new number is already used in the course
    pub async fn update(&self, params: UpdateUnitParams) -> Result<Unit, AppError> {
        let unit_repo = UnitRepository::new(self.db);
        let Some(existing) = unit_repo
            .find_in_course(params.course_id, params.unit_id)
            .await?
        else {
            return Err(AppError::NotFound("Unit not found".to_string()));
        };

        if let Some(number) = params.unit_number {
            if unit_repo
                .number_taken(params.course_id, number, Some(params.unit_id))
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "Unit number {} already exists in this course",
                    number
                )));
            }
        }

        let (course_id, unit_id) = (params.course_id, params.unit_id);
        unit_repo.update(existing, params).await?;

        self.get(course_id, unit_id).await
    }

    pub async fn delete(&self, course_id: i32, unit_id: i32) -> Result<(), AppError> {
        let unit_repo = UnitRepository::new(self.db);
        if unit_repo.find_in_course(course_id, unit_id).await?.is_none() {
            return Err(AppError::NotFound("Unit not found".to_string()));
        }

        unit_repo.delete(unit_id).await?;

        Ok(())
    }

    async fn require_course(&self, course_id: i32) -> Result<(), AppError> {
        match CourseRepository::new(self.db).find_by_id(course_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Course not found".to_string())),
        }
    }
}
