//! Course service for business logic.
//!
//! This module provides the `CourseService` for course listing, course tree reads
//! with and without learner progress, enrollment, and admin course management.
//! Multi-row writes run in a transaction.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::course::{CourseFilter, Depth},
    server::{
        data::{
            course::CourseRepository, module::ModuleRepository, progress::ProgressRepository,
            unit::UnitRepository, user::UserRepository,
        },
        error::AppError,
        model::{
            course::{Course, CreateCourseParams, UpdateCourseParams},
            page::{Page, PageRequest},
            progress::Enrollment,
        },
        service::tree::ContentTreeBuilder,
    },
};

pub struct CourseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists one page of courses as summary trees.
    ///
    /// # Arguments
    /// - `filter` - Enrollment filter, ignored without a user
    /// - `user_id` - Learner whose progress and position are attached
    /// - `request` - Page to fetch
    ///
    /// # Returns
    /// - `Ok(Page<Course>)` - Courses on the page with the total count
    /// - `Err(AppError)` - Query or assembly failure
    pub async fn list(
        &self,
        filter: CourseFilter,
        user_id: Option<i32>,
        request: PageRequest,
    ) -> Result<Page<Course>, AppError> {
        let (rows, total) = CourseRepository::new(self.db)
            .get_paginated(filter, user_id, request)
            .await
            .inspect_err(|e| {
                tracing::error!(?user_id, ?filter, "Failed to list courses: {}", e)
            })?;

        let courses = ContentTreeBuilder::new(self.db, Depth::Summary)
            .for_user(user_id)
            .build_courses(rows)
            .await?;

        Ok(Page::new(courses, total, request))
    }

    /// Gets one course tree at the requested depth.
    ///
    /// # Returns
    /// - `Ok(Course)` - The assembled course
    /// - `Err(AppError::NotFound)` - No course with that id
    /// - `Err(AppError)` - Query or assembly failure
    pub async fn get(
        &self,
        course_id: i32,
        user_id: Option<i32>,
        depth: Depth,
    ) -> Result<Course, AppError> {
        let Some(row) = CourseRepository::new(self.db).find_by_id(course_id).await? else {
            return Err(AppError::NotFound("Course not found".to_string()));
        };

        let mut courses = ContentTreeBuilder::new(self.db, depth)
            .for_user(user_id)
            .build_courses(vec![row])
            .await
            .inspect_err(|e| {
                tracing::error!(course_id, ?user_id, "Failed to load course tree: {}", e)
            })?;

        courses
            .pop()
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    /// Creates a course with its authors and tags.
    ///
    /// # Returns
    /// - `Ok(Course)` - The created course as a summary tree
    /// - `Err(AppError::BadRequest)` - An author id does not name a user
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateCourseParams) -> Result<Course, AppError> {
        self.check_authors(&params.author_ids).await?;

        let txn = self.db.begin().await?;
        let course = CourseRepository::new(&txn).create(params).await?;
        txn.commit().await?;

        tracing::info!(course_id = course.id, "Created course {}", course.name);

        self.get(course.id, None, Depth::Summary).await
    }

    /// Applies a partial course update.
    ///
    /// # Returns
    /// - `Ok(Course)` - The updated course as a summary tree
    /// - `Err(AppError::NotFound)` - No course with that id
    /// - `Err(AppError::BadRequest)` - An author id does not name a user
    pub async fn update(&self, params: UpdateCourseParams) -> Result<Course, AppError> {
        if let Some(author_ids) = &params.author_ids {
            self.check_authors(author_ids).await?;
        }

        let course_id = params.id;
        let txn = self.db.begin().await?;
        let updated = CourseRepository::new(&txn).update(params).await?;
        if updated.is_none() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }
        txn.commit().await?;

        self.get(course_id, None, Depth::Summary).await
    }

    /// Deletes a course and, through cascades, everything beneath it.
    pub async fn delete(&self, course_id: i32) -> Result<(), AppError> {
        let deleted = CourseRepository::new(self.db).delete(course_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        tracing::info!(course_id, "Deleted course");

        Ok(())
    }

    /// Enrolls a learner, pointing them at the first module of the first unit.
    ///
    /// Enrolling again returns the existing enrollment unchanged.
    ///
    /// # Returns
    /// - `Ok(Enrollment)` - New or existing enrollment
    /// - `Err(AppError::NotFound)` - No course with that id
    pub async fn enroll(&self, user_id: i32, course_id: i32) -> Result<Enrollment, AppError> {
        if CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        let progress_repo = ProgressRepository::new(self.db);
        if let Some(existing) = progress_repo.find_enrollment(user_id, course_id).await? {
            return Ok(Enrollment::from_entity(existing));
        }

        let first_unit = UnitRepository::new(self.db)
            .first_in_course(course_id)
            .await?;
        let first_module = match &first_unit {
            Some(unit) => ModuleRepository::new(self.db).first_in_unit(unit.id).await?,
            None => None,
        };

        let enrollment = progress_repo
            .upsert_enrollment(
                user_id,
                course_id,
                first_unit.map(|u| u.id),
                first_module.map(|m| m.id),
            )
            .await?;

        Ok(Enrollment::from_entity(enrollment))
    }

    async fn check_authors(&self, author_ids: &[i32]) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);
        for &author_id in author_ids {
            if user_repo.find_by_id(author_id).await?.is_none() {
                return Err(AppError::BadRequest(format!(
                    "Author {} does not exist",
                    author_id
                )));
            }
        }

        Ok(())
    }
}
