use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Batch of section progress and question answers for one module.
#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgressBatchDto {
    #[serde(default)]
    pub sections: Vec<SectionProgressInputDto>,
    #[serde(default)]
    pub answers: Vec<QuestionAnswerInputDto>,
}

/// Absent timestamps leave the stored value untouched.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SectionProgressInputDto {
    pub section_id: i32,
    pub seen_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswerInputDto {
    pub question_id: i32,
    pub option_id: i32,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDto {
    pub course_id: i32,
    pub current_unit_id: Option<i32>,
    pub current_module_id: Option<i32>,
}
