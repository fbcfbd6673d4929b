//! Module-progress write path.
//!
//! A learner reports section timestamps and question answers for one module in a
//! single batch. The batch is checked against the module's content first, then every
//! write, the recomputed module progress, the enrollment pointer and the daily streak
//! are applied on one transaction. Any failure after validation rolls back the whole
//! batch.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::course::ProgressStatus,
    server::{
        data::{progress::ProgressRepository, section::SectionRepository, user::UserRepository},
        error::AppError,
        model::{
            progress::{AnswerUpdate, ModuleProgressBatch},
            user::Streak,
        },
        service::{module::ModuleService, streak},
    },
};

pub struct ProgressService<'a> {
    db: &'a DatabaseConnection,
}

/// Progress figures derived from the module's completed sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleCompletion {
    pub progress: i32,
    pub status: ProgressStatus,
    pub current_position: i32,
}

impl<'a> ProgressService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a learner's progress batch for one module.
    ///
    /// Section progress and answers are upserts, so submitting the same batch twice
    /// leaves the stored state unchanged.
    ///
    /// # Returns
    /// - `Ok(())` - Batch applied and committed
    /// - `Err(AppError::NotFound)` - Any of course, unit or module does not line up
    /// - `Err(AppError::BadRequest)` - A section, question or option is not part of the module
    /// - `Err(AppError::DbErr)` - A write failed and the batch was rolled back
    pub async fn record_module_progress(&self, batch: ModuleProgressBatch) -> Result<(), AppError> {
        ModuleService::new(self.db)
            .require_module(batch.course_id, batch.unit_id, batch.module_id)
            .await?;

        let section_repo = SectionRepository::new(self.db);
        let sections = section_repo.get_by_modules(&[batch.module_id]).await?;
        let question_ids: Vec<i32> = sections.iter().filter_map(|s| s.question_id).collect();
        let options = section_repo.get_options(&question_ids).await?;

        let section_ids: HashSet<i32> = sections.iter().map(|s| s.id).collect();
        for update in &batch.sections {
            if !section_ids.contains(&update.section_id) {
                return Err(AppError::BadRequest(format!(
                    "Section {} is not part of module {}",
                    update.section_id, batch.module_id
                )));
            }
        }

        let option_answers: HashMap<i32, (i32, bool)> = options
            .iter()
            .map(|o| (o.id, (o.question_id, o.is_correct)))
            .collect();
        let mut answers = Vec::with_capacity(batch.answers.len());
        for answer in &batch.answers {
            if !question_ids.contains(&answer.question_id) {
                return Err(AppError::BadRequest(format!(
                    "Question {} is not part of module {}",
                    answer.question_id, batch.module_id
                )));
            }
            match option_answers.get(&answer.option_id) {
                Some(&(question_id, is_correct)) if question_id == answer.question_id => {
                    answers.push((*answer, is_correct));
                }
                _ => {
                    return Err(AppError::BadRequest(format!(
                        "Option {} does not belong to question {}",
                        answer.option_id, answer.question_id
                    )));
                }
            }
        }

        let positions: HashMap<i32, i32> = sections.iter().map(|s| (s.id, s.position)).collect();

        self.apply(&batch, &answers, &positions)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    user_id = batch.user_id,
                    module_id = batch.module_id,
                    "Failed to record module progress: {}",
                    e
                )
            })
    }

    async fn apply(
        &self,
        batch: &ModuleProgressBatch,
        answers: &[(AnswerUpdate, bool)],
        positions: &HashMap<i32, i32>,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;
        let progress_repo = ProgressRepository::new(&txn);

        for update in &batch.sections {
            progress_repo
                .upsert_section_progress(batch.user_id, batch.module_id, update)
                .await?;
        }

        for (answer, is_correct) in answers {
            progress_repo
                .upsert_answer(
                    batch.user_id,
                    answer.question_id,
                    answer.option_id,
                    *is_correct,
                    now,
                )
                .await?;
        }

        let completed = progress_repo
            .completed_section_ids(batch.user_id, batch.module_id)
            .await?;
        let completion = compute_completion(&completed, positions);

        progress_repo
            .save_module_progress(
                batch.user_id,
                batch.module_id,
                completion.progress,
                completion.status,
                completion.current_position,
                now,
            )
            .await?;

        progress_repo
            .upsert_enrollment(
                batch.user_id,
                batch.course_id,
                Some(batch.unit_id),
                Some(batch.module_id),
            )
            .await?;

        let user_repo = UserRepository::new(&txn);
        if let Some(user) = user_repo.find_by_id(batch.user_id).await? {
            let current = Streak::from_entity(&user);
            let next = streak::record_activity(current, now.date_naive());
            if next != current {
                user_repo.save_streak(batch.user_id, next).await?;
            }
        }

        txn.commit().await?;

        tracing::debug!(
            user_id = batch.user_id,
            module_id = batch.module_id,
            progress = completion.progress,
            "Recorded module progress"
        );

        Ok(())
    }
}

/// Derives module progress from the completed section ids.
///
/// `positions` maps every section of the module to its position; completed ids not
/// in the map are ignored. A module without sections reads as 0 and in progress.
pub fn compute_completion(completed: &[i32], positions: &HashMap<i32, i32>) -> ModuleCompletion {
    let done: Vec<i32> = completed
        .iter()
        .filter_map(|id| positions.get(id).copied())
        .collect();

    let total = positions.len() as i32;
    let progress = if total == 0 {
        0
    } else {
        done.len() as i32 * 100 / total
    };
    let status = if progress == 100 {
        ProgressStatus::Completed
    } else {
        ProgressStatus::InProgress
    };

    ModuleCompletion {
        progress,
        status,
        current_position: done.into_iter().max().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(pairs: &[(i32, i32)]) -> HashMap<i32, i32> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn partial_completion_rounds_down() {
        let completion = compute_completion(&[10], &positions(&[(10, 1), (11, 2), (12, 3)]));

        assert_eq!(completion.progress, 33);
        assert_eq!(completion.status, ProgressStatus::InProgress);
        assert_eq!(completion.current_position, 1);
    }

    #[test]
    fn all_sections_complete_module() {
        let completion = compute_completion(&[11, 10], &positions(&[(10, 1), (11, 2)]));

        assert_eq!(completion.progress, 100);
        assert_eq!(completion.status, ProgressStatus::Completed);
        assert_eq!(completion.current_position, 2);
    }

    #[test]
    fn empty_module_is_not_complete() {
        let completion = compute_completion(&[], &HashMap::new());

        assert_eq!(completion.progress, 0);
        assert_eq!(completion.status, ProgressStatus::InProgress);
    }

    #[test]
    fn ignores_sections_outside_module() {
        let completion = compute_completion(&[99], &positions(&[(10, 1)]));

        assert_eq!(completion.progress, 0);
        assert_eq!(completion.current_position, 0);
    }
}
