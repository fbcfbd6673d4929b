//! Unit data repository.
//!
//! Units are numbered within their course. The `(course_id, unit_number)` pair is
//! unique in the schema; callers check [`UnitRepository::number_taken`] first so a
//! clash surfaces as a conflict rather than a constraint violation.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::course::UpdateUnitParams;

pub struct UnitRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UnitRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        course_id: i32,
        unit_number: i32,
        name: String,
        description: String,
    ) -> Result<entity::unit::Model, DbErr> {
        let now = Utc::now();
        entity::unit::ActiveModel {
            course_id: ActiveValue::Set(course_id),
            unit_number: ActiveValue::Set(unit_number),
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Finds a unit only if it belongs to the given course.
    pub async fn find_in_course(
        &self,
        course_id: i32,
        unit_id: i32,
    ) -> Result<Option<entity::unit::Model>, DbErr> {
        entity::prelude::Unit::find_by_id(unit_id)
            .filter(entity::unit::Column::CourseId.eq(course_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_ids(&self, unit_ids: &[i32]) -> Result<Vec<entity::unit::Model>, DbErr> {
        if unit_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Unit::find()
            .filter(entity::unit::Column::Id.is_in(unit_ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Gets the units of several courses, ordered by course then unit number.
    pub async fn get_by_courses(
        &self,
        course_ids: &[i32],
    ) -> Result<Vec<entity::unit::Model>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Unit::find()
            .filter(entity::unit::Column::CourseId.is_in(course_ids.to_vec()))
            .order_by_asc(entity::unit::Column::CourseId)
            .order_by_asc(entity::unit::Column::UnitNumber)
            .all(self.db)
            .await
    }

    /// Gets the lowest-numbered unit of a course.
    pub async fn first_in_course(
        &self,
        course_id: i32,
    ) -> Result<Option<entity::unit::Model>, DbErr> {
        entity::prelude::Unit::find()
            .filter(entity::unit::Column::CourseId.eq(course_id))
            .order_by_asc(entity::unit::Column::UnitNumber)
            .one(self.db)
            .await
    }

    /// Gets the number following the highest unit number in a course.
    ///
    /// # Returns
    /// - `Ok(1)` - The course has no units
    /// - `Ok(n)` - One past the current maximum
    /// - `Err(DbErr)` - Database error during query
    pub async fn next_number(&self, course_id: i32) -> Result<i32, DbErr> {
        let last = entity::prelude::Unit::find()
            .filter(entity::unit::Column::CourseId.eq(course_id))
            .order_by_desc(entity::unit::Column::UnitNumber)
            .one(self.db)
            .await?;

        Ok(last.map(|unit| unit.unit_number + 1).unwrap_or(1))
    }

    /// Checks whether another unit of the course already uses `unit_number`.
    ///
    /// # Arguments
    /// - `course_id` - Course to check within
    /// - `unit_number` - Number to look for
    /// - `excluding` - Unit id to ignore, used when renumbering a unit
    pub async fn number_taken(
        &self,
        course_id: i32,
        unit_number: i32,
        excluding: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Unit::find()
            .filter(entity::unit::Column::CourseId.eq(course_id))
            .filter(entity::unit::Column::UnitNumber.eq(unit_number));

        if let Some(unit_id) = excluding {
            query = query.filter(entity::unit::Column::Id.ne(unit_id));
        }

        Ok(query.one(self.db).await?.is_some())
    }

    pub async fn update(
        &self,
        existing: entity::unit::Model,
        params: UpdateUnitParams,
    ) -> Result<entity::unit::Model, DbErr> {
        let mut active: entity::unit::ActiveModel = existing.into();
        if let Some(unit_number) = params.unit_number {
            active.unit_number = ActiveValue::Set(unit_number);
        }
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn delete(&self, unit_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Unit::delete_by_id(unit_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
