//! Section data repository.
//!
//! Sections carry type-specific content. Question sections reference a question row
//! whose options are stored separately, so creating or replacing sections also
//! writes those rows.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::course::{CreateQuestionParams, CreateSectionParams, SectionBody};

pub struct SectionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SectionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a section and, for question sections, its question and options.
    ///
    /// # Arguments
    /// - `module_id` - Module the section belongs to
    /// - `params` - Position and type-specific body
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted section row
    /// - `Err(DbErr)` - Insert failed
    pub async fn create(
        &self,
        module_id: i32,
        params: &CreateSectionParams,
    ) -> Result<entity::section::Model, DbErr> {
        let (content, url, question_id) = match &params.body {
            SectionBody::Text(content) => (Some(content.clone()), None, None),
            SectionBody::Video(url) => (None, Some(url.clone()), None),
            SectionBody::Question(question) => {
                let question = self.create_question(question).await?;
                (None, None, Some(question.id))
            }
        };

        let now = Utc::now();
        entity::section::ActiveModel {
            module_id: ActiveValue::Set(module_id),
            section_type: ActiveValue::Set(params.kind().as_str().to_string()),
            position: ActiveValue::Set(params.position),
            content: ActiveValue::Set(content),
            url: ActiveValue::Set(url),
            question_id: ActiveValue::Set(question_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    async fn create_question(
        &self,
        params: &CreateQuestionParams,
    ) -> Result<entity::question::Model, DbErr> {
        let question = entity::question::ActiveModel {
            question: ActiveValue::Set(params.question.clone()),
            question_type: ActiveValue::Set(params.question_type.clone()),
            difficulty_level: ActiveValue::Set(params.difficulty.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (content, is_correct) in &params.options {
            entity::question_option::ActiveModel {
                question_id: ActiveValue::Set(question.id),
                content: ActiveValue::Set(content.clone()),
                is_correct: ActiveValue::Set(*is_correct),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(question)
    }

    /// Gets the sections of several modules, ordered by module then position.
    pub async fn get_by_modules(
        &self,
        module_ids: &[i32],
    ) -> Result<Vec<entity::section::Model>, DbErr> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Section::find()
            .filter(entity::section::Column::ModuleId.is_in(module_ids.to_vec()))
            .order_by_asc(entity::section::Column::ModuleId)
            .order_by_asc(entity::section::Column::Position)
            .all(self.db)
            .await
    }

    pub async fn count_by_module(&self, module_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Section::find()
            .filter(entity::section::Column::ModuleId.eq(module_id))
            .count(self.db)
            .await
    }

    pub async fn get_questions(
        &self,
        question_ids: &[i32],
    ) -> Result<Vec<entity::question::Model>, DbErr> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Question::find()
            .filter(entity::question::Column::Id.is_in(question_ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Gets the options of several questions, ordered by id.
    pub async fn get_options(
        &self,
        question_ids: &[i32],
    ) -> Result<Vec<entity::question_option::Model>, DbErr> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::QuestionOption::find()
            .filter(entity::question_option::Column::QuestionId.is_in(question_ids.to_vec()))
            .order_by_asc(entity::question_option::Column::Id)
            .all(self.db)
            .await
    }

    /// Deletes every section of a module along with the questions they reference.
    ///
    /// # Returns
    /// - `Ok(rows)` - Number of deleted sections
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_module(&self, module_id: i32) -> Result<u64, DbErr> {
        let question_ids: Vec<i32> = entity::prelude::Section::find()
            .filter(entity::section::Column::ModuleId.eq(module_id))
            .all(self.db)
            .await?
            .into_iter()
            .filter_map(|section| section.question_id)
            .collect();

        let result = entity::prelude::Section::delete_many()
            .filter(entity::section::Column::ModuleId.eq(module_id))
            .exec(self.db)
            .await?;

        if !question_ids.is_empty() {
            entity::prelude::Question::delete_many()
                .filter(entity::question::Column::Id.is_in(question_ids))
                .exec(self.db)
                .await?;
        }

        Ok(result.rows_affected)
    }
}
