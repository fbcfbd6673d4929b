//! Learner progress parameters and enrollment model.

use chrono::{DateTime, Utc};

use crate::model::progress::{EnrollmentDto, ModuleProgressBatchDto};

/// Timestamps to merge into one section's progress. `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProgressUpdate {
    pub section_id: i32,
    pub seen_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerUpdate {
    pub question_id: i32,
    pub option_id: i32,
}

/// Everything a learner reports for one module in a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleProgressBatch {
    pub user_id: i32,
    pub course_id: i32,
    pub unit_id: i32,
    pub module_id: i32,
    pub sections: Vec<SectionProgressUpdate>,
    pub answers: Vec<AnswerUpdate>,
}

impl ModuleProgressBatch {
    pub fn from_dto(
        user_id: i32,
        course_id: i32,
        unit_id: i32,
        module_id: i32,
        dto: ModuleProgressBatchDto,
    ) -> Self {
        Self {
            user_id,
            course_id,
            unit_id,
            module_id,
            sections: dto
                .sections
                .into_iter()
                .map(|s| SectionProgressUpdate {
                    section_id: s.section_id,
                    seen_at: s.seen_at,
                    started_at: s.started_at,
                    completed_at: s.completed_at,
                })
                .collect(),
            answers: dto
                .answers
                .into_iter()
                .map(|a| AnswerUpdate {
                    question_id: a.question_id,
                    option_id: a.option_id,
                })
                .collect(),
        }
    }
}

/// A learner's enrollment and current position in a course.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub user_id: i32,
    pub course_id: i32,
    pub current_unit_id: Option<i32>,
    pub current_module_id: Option<i32>,
}

impl Enrollment {
    pub fn from_entity(entity: entity::user_course::Model) -> Self {
        Self {
            user_id: entity.user_id,
            course_id: entity.course_id,
            current_unit_id: entity.current_unit_id,
            current_module_id: entity.current_module_id,
        }
    }

    pub fn into_dto(self) -> EnrollmentDto {
        EnrollmentDto {
            course_id: self.course_id,
            current_unit_id: self.current_unit_id,
            current_module_id: self.current_module_id,
        }
    }
}
