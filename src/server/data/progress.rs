//! Learner progress data repository.
//!
//! Covers enrollment pointers, module and section progress, and question answers.
//! The repository is generic over the connection so the module-progress write can
//! run every statement on a single transaction.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::{model::course::ProgressStatus, server::model::progress::SectionProgressUpdate};

pub struct ProgressRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProgressRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_enrollment(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> Result<Option<entity::user_course::Model>, DbErr> {
        entity::prelude::UserCourse::find_by_id((user_id, course_id))
            .one(self.db)
            .await
    }

    /// Gets the user's enrollments among the given courses.
    pub async fn enrollments_for(
        &self,
        user_id: i32,
        course_ids: &[i32],
    ) -> Result<Vec<entity::user_course::Model>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserCourse::find()
            .filter(entity::user_course::Column::UserId.eq(user_id))
            .filter(entity::user_course::Column::CourseId.is_in(course_ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Creates the enrollment or moves its position pointers.
    ///
    /// # Arguments
    /// - `user_id` - Learner
    /// - `course_id` - Course being learned
    /// - `unit_id` - Unit the learner is on
    /// - `module_id` - Module the learner is on
    ///
    /// # Returns
    /// - `Ok(Model)` - The stored enrollment
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert_enrollment(
        &self,
        user_id: i32,
        course_id: i32,
        unit_id: Option<i32>,
        module_id: Option<i32>,
    ) -> Result<entity::user_course::Model, DbErr> {
        let now = Utc::now();

        match self.find_enrollment(user_id, course_id).await? {
            Some(existing) => {
                let mut active: entity::user_course::ActiveModel = existing.into();
                active.current_unit_id = ActiveValue::Set(unit_id);
                active.current_module_id = ActiveValue::Set(module_id);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await
            }
            None => {
                entity::user_course::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    course_id: ActiveValue::Set(course_id),
                    current_unit_id: ActiveValue::Set(unit_id),
                    current_module_id: ActiveValue::Set(module_id),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await
            }
        }
    }

    /// Gets the user's progress rows for the given modules. Modules without a row are absent.
    pub async fn module_progress_for(
        &self,
        user_id: i32,
        module_ids: &[i32],
    ) -> Result<Vec<entity::user_module_progress::Model>, DbErr> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserModuleProgress::find()
            .filter(entity::user_module_progress::Column::UserId.eq(user_id))
            .filter(entity::user_module_progress::Column::ModuleId.is_in(module_ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Gets the user's progress rows for the given sections.
    pub async fn section_progress_for(
        &self,
        user_id: i32,
        section_ids: &[i32],
    ) -> Result<Vec<entity::user_section_progress::Model>, DbErr> {
        if section_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserSectionProgress::find()
            .filter(entity::user_section_progress::Column::UserId.eq(user_id))
            .filter(entity::user_section_progress::Column::SectionId.is_in(section_ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Merges timestamps into the user's progress for one section.
    ///
    /// Timestamps absent from `update` keep their stored value, so replaying the
    /// same update leaves the row unchanged.
    ///
    /// # Returns
    /// - `Ok(Model)` - The stored row after merging
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert_section_progress(
        &self,
        user_id: i32,
        module_id: i32,
        update: &SectionProgressUpdate,
    ) -> Result<entity::user_section_progress::Model, DbErr> {
        let existing = entity::prelude::UserSectionProgress::find_by_id((user_id, update.section_id))
            .one(self.db)
            .await?;

        match existing {
            Some(existing) => {
                let unchanged = existing.clone();
                let mut active: entity::user_section_progress::ActiveModel = existing.into();
                if let Some(seen_at) = update.seen_at {
                    active.seen_at = ActiveValue::Set(Some(seen_at));
                }
                if let Some(started_at) = update.started_at {
                    active.started_at = ActiveValue::Set(Some(started_at));
                }
                if let Some(completed_at) = update.completed_at {
                    active.completed_at = ActiveValue::Set(Some(completed_at));
                }

                if active.is_changed() {
                    active.update(self.db).await
                } else {
                    Ok(unchanged)
                }
            }
            None => {
                entity::user_section_progress::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    section_id: ActiveValue::Set(update.section_id),
                    module_id: ActiveValue::Set(module_id),
                    seen_at: ActiveValue::Set(update.seen_at),
                    started_at: ActiveValue::Set(update.started_at),
                    completed_at: ActiveValue::Set(update.completed_at),
                }
                .insert(self.db)
                .await
            }
        }
    }

    /// Records the user's answer to a question.
    ///
    /// Re-submitting the stored option is a no-op; choosing a different option
    /// replaces the answer and its timestamp.
    pub async fn upsert_answer(
        &self,
        user_id: i32,
        question_id: i32,
        option_id: i32,
        is_correct: bool,
        answered_at: DateTime<Utc>,
    ) -> Result<entity::user_question_answer::Model, DbErr> {
        let existing = entity::prelude::UserQuestionAnswer::find_by_id((user_id, question_id))
            .one(self.db)
            .await?;

        match existing {
            Some(existing) if existing.option_id == option_id => Ok(existing),
            Some(existing) => {
                let mut active: entity::user_question_answer::ActiveModel = existing.into();
                active.option_id = ActiveValue::Set(option_id);
                active.is_correct = ActiveValue::Set(is_correct);
                active.answered_at = ActiveValue::Set(answered_at);
                active.update(self.db).await
            }
            None => {
                entity::user_question_answer::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    question_id: ActiveValue::Set(question_id),
                    option_id: ActiveValue::Set(option_id),
                    is_correct: ActiveValue::Set(is_correct),
                    answered_at: ActiveValue::Set(answered_at),
                }
                .insert(self.db)
                .await
            }
        }
    }

    /// Gets the ids of the module's sections the user has completed.
    pub async fn completed_section_ids(
        &self,
        user_id: i32,
        module_id: i32,
    ) -> Result<Vec<i32>, DbErr> {
        let rows = entity::prelude::UserSectionProgress::find()
            .filter(entity::user_section_progress::Column::UserId.eq(user_id))
            .filter(entity::user_section_progress::Column::ModuleId.eq(module_id))
            .filter(entity::user_section_progress::Column::CompletedAt.is_not_null())
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.section_id).collect())
    }

    /// Stores recomputed module progress.
    ///
    /// `started_at` is set when the row is first created and `completed_at` the first
    /// time the status becomes completed; neither is overwritten afterwards.
    pub async fn save_module_progress(
        &self,
        user_id: i32,
        module_id: i32,
        progress: i32,
        status: ProgressStatus,
        current_position: i32,
        now: DateTime<Utc>,
    ) -> Result<entity::user_module_progress::Model, DbErr> {
        let completed = status == ProgressStatus::Completed;
        let existing = entity::prelude::UserModuleProgress::find_by_id((user_id, module_id))
            .one(self.db)
            .await?;

        match existing {
            Some(existing) => {
                let completed_at = existing.completed_at.or(completed.then_some(now));
                let mut active: entity::user_module_progress::ActiveModel = existing.into();
                active.progress = ActiveValue::Set(progress);
                active.status = ActiveValue::Set(status.as_str().to_string());
                active.current_position = ActiveValue::Set(current_position);
                active.completed_at = ActiveValue::Set(completed_at);
                active.last_accessed = ActiveValue::Set(now);
                active.update(self.db).await
            }
            None => {
                entity::user_module_progress::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    module_id: ActiveValue::Set(module_id),
                    current_position: ActiveValue::Set(current_position),
                    progress: ActiveValue::Set(progress),
                    status: ActiveValue::Set(status.as_str().to_string()),
                    started_at: ActiveValue::Set(now),
                    completed_at: ActiveValue::Set(completed.then_some(now)),
                    last_accessed: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await
            }
        }
    }
}
