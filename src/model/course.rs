use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Text,
    Video,
    Question,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Video => "video",
            Self::Question => "question",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "video" => Some(Self::Video),
            "question" => Some(Self::Question),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    Uninitiated,
    InProgress,
    Completed,
    Abandoned,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitiated => "uninitiated",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "uninitiated" => Some(Self::Uninitiated),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "abandoned" => Some(Self::Abandoned),
            _ => None,
        }
    }
}

/// How much of the content tree to load.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    /// Course, units and modules.
    #[default]
    Summary,
    /// Additionally sections, questions and section progress.
    Full,
}

/// Enrollment filter for course listings.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum CourseFilter {
    #[default]
    All,
    /// Courses the user is enrolled in.
    Learning,
    /// Courses the user is not enrolled in.
    Explore,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CourseListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub filter: Option<CourseFilter>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DepthQuery {
    #[serde(rename = "type")]
    pub depth: Option<Depth>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct TagDto {
    pub id: i32,
    pub name: String,
}

/// Lightweight pointer to the unit a learner is on.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UnitRefDto {
    pub id: i32,
    pub unit_number: i32,
    pub name: String,
}

/// Lightweight pointer to the module a learner is on.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRefDto {
    pub id: i32,
    pub module_number: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub requirements: Option<String>,
    pub what_you_learn: Option<String>,
    pub background_color: Option<String>,
    pub icon_url: Option<String>,
    pub duration: i32,
    pub difficulty_level: Difficulty,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub authors: Vec<AuthorDto>,
    pub tags: Vec<TagDto>,
    pub units: Vec<UnitDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_unit: Option<UnitRefDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_module: Option<ModuleRefDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UnitDto {
    pub id: i32,
    pub course_id: i32,
    pub unit_number: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modules: Vec<ModuleDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDto {
    pub id: i32,
    pub unit_id: i32,
    pub module_number: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Percentage of completed sections, present only in progress mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProgressStatus>,
    /// Present only when the full tree was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionDto>>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SectionDto {
    pub id: i32,
    pub module_id: i32,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub position: i32,
    pub content: Option<String>,
    pub url: Option<String>,
    pub question: Option<QuestionDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<SectionProgressDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SectionProgressDto {
    pub seen_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: i32,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty_level: Difficulty,
    pub options: Vec<QuestionOptionDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOptionDto {
    pub id: i32,
    pub content: String,
    pub is_correct: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: String,
    pub requirements: Option<String>,
    pub what_you_learn: Option<String>,
    pub background_color: Option<String>,
    pub icon_url: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub duration: i32,
    pub difficulty_level: Difficulty,
    #[serde(default)]
    pub author_ids: Vec<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial course update. Absent fields keep their stored value; present
/// `authorIds`/`tags` replace the whole list.
#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub what_you_learn: Option<String>,
    pub background_color: Option<String>,
    pub icon_url: Option<String>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    pub difficulty_level: Option<Difficulty>,
    pub author_ids: Option<Vec<i32>>,
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitDto {
    /// Assigned as the next free number when absent.
    #[validate(range(min = 1))]
    pub unit_number: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUnitDto {
    #[validate(range(min = 1))]
    pub unit_number: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleDto {
    /// Assigned as the next free number when absent.
    #[validate(range(min = 1))]
    pub module_number: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(nested)]
    #[serde(default)]
    pub sections: Vec<CreateSectionDto>,
}

/// Partial module update. Present `sections` replace every existing section.
#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModuleDto {
    #[validate(range(min = 1))]
    pub module_number: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(nested)]
    pub sections: Option<Vec<CreateSectionDto>>,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionDto {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[validate(range(min = 1))]
    pub position: i32,
    pub content: Option<String>,
    pub url: Option<String>,
    #[validate(nested)]
    pub question: Option<CreateQuestionDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionDto {
    #[validate(length(min = 1))]
    pub question: String,
    #[serde(rename = "type", default = "default_question_type")]
    pub question_type: String,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: Difficulty,
    #[validate(length(min = 2))]
    pub options: Vec<CreateQuestionOptionDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionOptionDto {
    pub content: String,
    #[serde(default)]
    pub is_correct: bool,
}

fn default_question_type() -> String {
    "multiple_choice".to_string()
}

fn default_difficulty() -> Difficulty {
    Difficulty::Beginner
}
