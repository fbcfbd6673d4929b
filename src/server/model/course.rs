//! Course content domain models and parameters.
//!
//! Models the course → unit → module → section hierarchy. Progress fields are
//! `Option`s: `None` means no learner was given, `Some` carries the learner's
//! state with missing rows already coalesced to zero values.

use chrono::{DateTime, Utc};

use crate::{
    model::course::{
        AuthorDto, CourseDto, CreateCourseDto, CreateModuleDto, CreateQuestionDto,
        CreateSectionDto, CreateUnitDto, Difficulty, ModuleDto, ModuleRefDto, ProgressStatus,
        QuestionDto, QuestionOptionDto, SectionDto, SectionKind, SectionProgressDto, TagDto,
        UnitDto, UnitRefDto, UpdateCourseDto, UpdateModuleDto, UpdateUnitDto,
    },
    server::{error::AppError, model::parse_column},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture_url: Option<String>,
}

impl Author {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            first_name: entity.first_name,
            last_name: entity.last_name,
            profile_picture_url: entity.profile_picture_url,
        }
    }

    pub fn into_dto(self) -> AuthorDto {
        AuthorDto {
            id: self.id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            profile_picture_url: self.profile_picture_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// Where a learner currently is within a course.
///
/// A missing pointer is represented by the zero value of the reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LearnerPosition {
    pub current_unit: UnitRef,
    pub current_module: ModuleRef,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitRef {
    pub id: i32,
    pub unit_number: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleRef {
    pub id: i32,
    pub module_number: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub requirements: Option<String>,
    pub what_you_learn: Option<String>,
    pub background_color: Option<String>,
    pub icon_url: Option<String>,
    pub duration: i32,
    pub difficulty: Difficulty,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub authors: Vec<Author>,
    pub tags: Vec<Tag>,
    pub units: Vec<Unit>,
    /// Present only when the course was loaded for a learner.
    pub position: Option<LearnerPosition>,
}

impl Course {
    /// Converts a course row into a course with no children loaded.
    ///
    /// # Returns
    /// - `Ok(Course)` - Converted course
    /// - `Err(AppError::InternalErr)` - Stored difficulty level is unknown
    pub fn from_entity(entity: entity::course::Model) -> Result<Self, AppError> {
        let difficulty = parse_column(
            "courses.difficulty_level",
            &entity.difficulty_level,
            Difficulty::parse,
        )?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            requirements: entity.requirements,
            what_you_learn: entity.what_you_learn,
            background_color: entity.background_color,
            icon_url: entity.icon_url,
            duration: entity.duration,
            difficulty,
            rating: entity.rating,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            authors: Vec::new(),
            tags: Vec::new(),
            units: Vec::new(),
            position: None,
        })
    }

    pub fn into_dto(self) -> CourseDto {
        let (current_unit, current_module) = match self.position {
            Some(position) => (
                Some(UnitRefDto {
                    id: position.current_unit.id,
                    unit_number: position.current_unit.unit_number,
                    name: position.current_unit.name,
                }),
                Some(ModuleRefDto {
                    id: position.current_module.id,
                    module_number: position.current_module.module_number,
                    name: position.current_module.name,
                }),
            ),
            None => (None, None),
        };

        CourseDto {
            id: self.id,
            name: self.name,
            description: self.description,
            requirements: self.requirements,
            what_you_learn: self.what_you_learn,
            background_color: self.background_color,
            icon_url: self.icon_url,
            duration: self.duration,
            difficulty_level: self.difficulty,
            rating: self.rating,
            created_at: self.created_at,
            updated_at: self.updated_at,
            authors: self.authors.into_iter().map(Author::into_dto).collect(),
            tags: self
                .tags
                .into_iter()
                .map(|tag| TagDto {
                    id: tag.id,
                    name: tag.name,
                })
                .collect(),
            units: self.units.into_iter().map(Unit::into_dto).collect(),
            current_unit,
            current_module,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: i32,
    pub course_id: i32,
    pub unit_number: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modules: Vec<Module>,
}

impl Unit {
    pub fn from_entity(entity: entity::unit::Model) -> Self {
        Self {
            id: entity.id,
            course_id: entity.course_id,
            unit_number: entity.unit_number,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            modules: Vec::new(),
        }
    }

    pub fn into_dto(self) -> UnitDto {
        UnitDto {
            id: self.id,
            course_id: self.course_id,
            unit_number: self.unit_number,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
            modules: self.modules.into_iter().map(Module::into_dto).collect(),
        }
    }
}

/// A learner's completion of one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModuleProgress {
    /// Percentage of completed sections, 0 to 100.
    pub progress: i32,
    pub status: ProgressStatus,
}

impl ModuleProgress {
    pub fn from_entity(entity: &entity::user_module_progress::Model) -> Result<Self, AppError> {
        let status = parse_column(
            "user_module_progress.status",
            &entity.status,
            ProgressStatus::parse,
        )?;

        Ok(Self {
            progress: entity.progress,
            status,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub id: i32,
    pub unit_id: i32,
    pub module_number: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present only when loaded for a learner.
    pub progress: Option<ModuleProgress>,
    /// Present only when sections were loaded.
    pub sections: Option<Vec<Section>>,
}

impl Module {
    pub fn from_entity(entity: entity::module::Model) -> Self {
        Self {
            id: entity.id,
            unit_id: entity.unit_id,
            module_number: entity.module_number,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            progress: None,
            sections: None,
        }
    }

    pub fn into_dto(self) -> ModuleDto {
        ModuleDto {
            id: self.id,
            unit_id: self.unit_id,
            module_number: self.module_number,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
            progress: self.progress.map(|p| p.progress),
            status: self.progress.map(|p| p.status),
            sections: self
                .sections
                .map(|sections| sections.into_iter().map(Section::into_dto).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionProgress {
    pub seen_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SectionProgress {
    pub fn from_entity(entity: &entity::user_section_progress::Model) -> Self {
        Self {
            seen_at: entity.seen_at,
            started_at: entity.started_at,
            completed_at: entity.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: i32,
    pub module_id: i32,
    pub kind: SectionKind,
    pub position: i32,
    pub content: Option<String>,
    pub url: Option<String>,
    pub question: Option<Question>,
    /// Present only when loaded for a learner.
    pub progress: Option<SectionProgress>,
}

impl Section {
    pub fn from_entity(entity: entity::section::Model) -> Result<Self, AppError> {
        let kind = parse_column("sections.section_type", &entity.section_type, SectionKind::parse)?;

        Ok(Self {
            id: entity.id,
            module_id: entity.module_id,
            kind,
            position: entity.position,
            content: entity.content,
            url: entity.url,
            question: None,
            progress: None,
        })
    }

    pub fn into_dto(self) -> SectionDto {
        SectionDto {
            id: self.id,
            module_id: self.module_id,
            kind: self.kind,
            position: self.position,
            content: self.content,
            url: self.url,
            question: self.question.map(Question::into_dto),
            progress: self.progress.map(|p| SectionProgressDto {
                seen_at: p.seen_at,
                started_at: p.started_at,
                completed_at: p.completed_at,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionOption {
    pub id: i32,
    pub content: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub question_type: String,
    pub difficulty: Difficulty,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn from_entity(
        entity: entity::question::Model,
        options: Vec<entity::question_option::Model>,
    ) -> Result<Self, AppError> {
        let difficulty = parse_column(
            "questions.difficulty_level",
            &entity.difficulty_level,
            Difficulty::parse,
        )?;

        Ok(Self {
            id: entity.id,
            question: entity.question,
            question_type: entity.question_type,
            difficulty,
            options: options
                .into_iter()
                .map(|option| QuestionOption {
                    id: option.id,
                    content: option.content,
                    is_correct: option.is_correct,
                })
                .collect(),
        })
    }

    pub fn into_dto(self) -> QuestionDto {
        QuestionDto {
            id: self.id,
            question: self.question,
            question_type: self.question_type,
            difficulty_level: self.difficulty,
            options: self
                .options
                .into_iter()
                .map(|option| QuestionOptionDto {
                    id: option.id,
                    content: option.content,
                    is_correct: option.is_correct,
                })
                .collect(),
        }
    }
}

/// Parameters for creating a course.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCourseParams {
    pub name: String,
    pub description: String,
    pub requirements: Option<String>,
    pub what_you_learn: Option<String>,
    pub background_color: Option<String>,
    pub icon_url: Option<String>,
    pub duration: i32,
    pub difficulty: Difficulty,
    pub author_ids: Vec<i32>,
    pub tags: Vec<String>,
}

impl From<CreateCourseDto> for CreateCourseParams {
    fn from(dto: CreateCourseDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            requirements: dto.requirements,
            what_you_learn: dto.what_you_learn,
            background_color: dto.background_color,
            icon_url: dto.icon_url,
            duration: dto.duration,
            difficulty: dto.difficulty_level,
            author_ids: dto.author_ids,
            tags: dto.tags,
        }
    }
}

/// Parameters for a partial course update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCourseParams {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub what_you_learn: Option<String>,
    pub background_color: Option<String>,
    pub icon_url: Option<String>,
    pub duration: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub author_ids: Option<Vec<i32>>,
    pub tags: Option<Vec<String>>,
}

impl UpdateCourseParams {
    pub fn from_dto(id: i32, dto: UpdateCourseDto) -> Self {
        Self {
            id,
            name: dto.name,
            description: dto.description,
            requirements: dto.requirements,
            what_you_learn: dto.what_you_learn,
            background_color: dto.background_color,
            icon_url: dto.icon_url,
            duration: dto.duration,
            difficulty: dto.difficulty_level,
            author_ids: dto.author_ids,
            tags: dto.tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateUnitParams {
    pub course_id: i32,
    /// Next free number when `None`.
    pub unit_number: Option<i32>,
    pub name: String,
    pub description: String,
}

impl CreateUnitParams {
    pub fn from_dto(course_id: i32, dto: CreateUnitDto) -> Self {
        Self {
            course_id,
            unit_number: dto.unit_number,
            name: dto.name,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUnitParams {
    pub course_id: i32,
    pub unit_id: i32,
    pub unit_number: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateUnitParams {
    pub fn from_dto(course_id: i32, unit_id: i32, dto: UpdateUnitDto) -> Self {
        Self {
            course_id,
            unit_id,
            unit_number: dto.unit_number,
            name: dto.name,
            description: dto.description,
        }
    }
}

/// Type-specific body of a new section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Text(String),
    Video(String),
    Question(CreateQuestionParams),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSectionParams {
    pub position: i32,
    pub body: SectionBody,
}

impl CreateSectionParams {
    pub fn kind(&self) -> SectionKind {
        match self.body {
            SectionBody::Text(_) => SectionKind::Text,
            SectionBody::Video(_) => SectionKind::Video,
            SectionBody::Question(_) => SectionKind::Question,
        }
    }
}

impl TryFrom<CreateSectionDto> for CreateSectionParams {
    type Error = AppError;

    /// Checks that the section carries the content its type requires.
    fn try_from(dto: CreateSectionDto) -> Result<Self, Self::Error> {
        let missing = |field: &str| {
            AppError::BadRequest(format!(
                "{} section at position {} requires {}",
                dto.kind.as_str(),
                dto.position,
                field
            ))
        };

        let body = match dto.kind {
            SectionKind::Text => SectionBody::Text(dto.content.clone().ok_or_else(|| missing("content"))?),
            SectionKind::Video => SectionBody::Video(dto.url.clone().ok_or_else(|| missing("url"))?),
            SectionKind::Question => SectionBody::Question(
                dto.question
                    .clone()
                    .map(CreateQuestionParams::from)
                    .ok_or_else(|| missing("question"))?,
            ),
        };

        Ok(Self {
            position: dto.position,
            body,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateQuestionParams {
    pub question: String,
    pub question_type: String,
    pub difficulty: Difficulty,
    /// Option content and correctness, in display order.
    pub options: Vec<(String, bool)>,
}

impl From<CreateQuestionDto> for CreateQuestionParams {
    fn from(dto: CreateQuestionDto) -> Self {
        Self {
            question: dto.question,
            question_type: dto.question_type,
            difficulty: dto.difficulty_level,
            options: dto
                .options
                .into_iter()
                .map(|option| (option.content, option.is_correct))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateModuleParams {
    pub unit_id: i32,
    /// Next free number when `None`.
    pub module_number: Option<i32>,
    pub name: String,
    pub description: String,
    pub sections: Vec<CreateSectionParams>,
}

impl CreateModuleParams {
    pub fn from_dto(unit_id: i32, dto: CreateModuleDto) -> Result<Self, AppError> {
        let sections = dto
            .sections
            .into_iter()
            .map(CreateSectionParams::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            unit_id,
            module_number: dto.module_number,
            name: dto.name,
            description: dto.description,
            sections,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateModuleParams {
    pub unit_id: i32,
    pub module_id: i32,
    pub module_number: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Replaces every section when present.
    pub sections: Option<Vec<CreateSectionParams>>,
}

impl UpdateModuleParams {
    pub fn from_dto(unit_id: i32, module_id: i32, dto: UpdateModuleDto) -> Result<Self, AppError> {
        let sections = dto
            .sections
            .map(|sections| {
                sections
                    .into_iter()
                    .map(CreateSectionParams::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            unit_id,
            module_id,
            module_number: dto.module_number,
            name: dto.name,
            description: dto.description,
            sections,
        })
    }
}
