//! Content tree assembly.
//!
//! Builds nested course → unit → module → section trees from flat per-level
//! queries: one query per level for any number of parents, joined in memory by
//! parent id. When a learner is given, their progress rows are loaded per level as
//! well and missing rows are filled with zero values.

use sea_orm::ConnectionTrait;
use std::collections::HashMap;

use crate::{
    model::course::Depth,
    server::{
        data::{
            course::CourseRepository, module::ModuleRepository, progress::ProgressRepository,
            section::SectionRepository, unit::UnitRepository,
        },
        error::AppError,
        model::course::{
            Author, Course, LearnerPosition, Module, ModuleProgress, ModuleRef, Question, Section,
            SectionProgress, Tag, Unit, UnitRef,
        },
    },
};

pub struct ContentTreeBuilder<'a, C: ConnectionTrait> {
    db: &'a C,
    depth: Depth,
    user_id: Option<i32>,
}

impl<'a, C: ConnectionTrait> ContentTreeBuilder<'a, C> {
    pub fn new(db: &'a C, depth: Depth) -> Self {
        Self {
            db,
            depth,
            user_id: None,
        }
    }

    /// Loads learner progress alongside the content when `user_id` is set.
    pub fn for_user(mut self, user_id: Option<i32>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Assembles full course trees, preserving the order of `courses`.
    ///
    /// # Arguments
    /// - `courses` - Course rows to expand
    ///
    /// # Returns
    /// - `Ok(Vec<Course>)` - Courses with authors, tags, units and, for a learner, their position
    /// - `Err(AppError::DbErr)` - A level query failed
    /// - `Err(AppError::InternalErr)` - A stored enumeration value could not be parsed
    pub async fn build_courses(
        &self,
        courses: Vec<entity::course::Model>,
    ) -> Result<Vec<Course>, AppError> {
        let course_ids: Vec<i32> = courses.iter().map(|c| c.id).collect();
        let course_repo = CourseRepository::new(self.db);

        let mut authors: HashMap<i32, Vec<Author>> = HashMap::new();
        for (course_id, user) in course_repo.authors_for(&course_ids).await? {
            authors
                .entry(course_id)
                .or_default()
                .push(Author::from_entity(user));
        }

        let mut tags: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (course_id, tag) in course_repo.tags_for(&course_ids).await? {
            tags.entry(course_id).or_default().push(Tag {
                id: tag.id,
                name: tag.name,
            });
        }

        let unit_rows = UnitRepository::new(self.db)
            .get_by_courses(&course_ids)
            .await?;
        let mut units: HashMap<i32, Vec<Unit>> = HashMap::new();
        for unit in self.build_units(unit_rows).await? {
            units.entry(unit.course_id).or_default().push(unit);
        }

        let enrollments: HashMap<i32, entity::user_course::Model> = match self.user_id {
            Some(user_id) => ProgressRepository::new(self.db)
                .enrollments_for(user_id, &course_ids)
                .await?
                .into_iter()
                .map(|e| (e.course_id, e))
                .collect(),
            None => HashMap::new(),
        };

        courses
            .into_iter()
            .map(|entity| {
                let mut course = Course::from_entity(entity)?;
                course.authors = authors.remove(&course.id).unwrap_or_default();
                course.tags = tags.remove(&course.id).unwrap_or_default();
                course.units = units.remove(&course.id).unwrap_or_default();

                if self.user_id.is_some() {
                    let enrollment = enrollments.get(&course.id);
                    course.position = Some(learner_position(
                        &course.units,
                        enrollment.and_then(|e| e.current_unit_id),
                        enrollment.and_then(|e| e.current_module_id),
                    ));
                }

                Ok(course)
            })
            .collect()
    }

    /// Assembles units with their modules, preserving the order of `units`.
    pub async fn build_units(&self, units: Vec<entity::unit::Model>) -> Result<Vec<Unit>, AppError> {
        let unit_ids: Vec<i32> = units.iter().map(|u| u.id).collect();
        let module_rows = ModuleRepository::new(self.db)
            .get_by_units(&unit_ids)
            .await?;

        let mut modules: HashMap<i32, Vec<Module>> = HashMap::new();
        for module in self.build_modules(module_rows).await? {
            modules.entry(module.unit_id).or_default().push(module);
        }

        Ok(units
            .into_iter()
            .map(|entity| {
                let mut unit = Unit::from_entity(entity);
                unit.modules = modules.remove(&unit.id).unwrap_or_default();
                unit
            })
            .collect())
    }

    /// Assembles modules with progress and, at full depth, their sections.
    pub async fn build_modules(
        &self,
        modules: Vec<entity::module::Model>,
    ) -> Result<Vec<Module>, AppError> {
        let module_ids: Vec<i32> = modules.iter().map(|m| m.id).collect();

        let progress: HashMap<i32, entity::user_module_progress::Model> = match self.user_id {
            Some(user_id) => ProgressRepository::new(self.db)
                .module_progress_for(user_id, &module_ids)
                .await?
                .into_iter()
                .map(|p| (p.module_id, p))
                .collect(),
            None => HashMap::new(),
        };

        let mut sections: HashMap<i32, Vec<Section>> = HashMap::new();
        if self.depth == Depth::Full {
            let section_rows = SectionRepository::new(self.db)
                .get_by_modules(&module_ids)
                .await?;
            for section in self.build_sections(section_rows).await? {
                sections.entry(section.module_id).or_default().push(section);
            }
        }

        modules
            .into_iter()
            .map(|entity| {
                let mut module = Module::from_entity(entity);

                if self.user_id.is_some() {
                    let stored = progress
                        .get(&module.id)
                        .map(ModuleProgress::from_entity)
                        .transpose()?;
                    module.progress = Some(stored.unwrap_or_default());
                }

                if self.depth == Depth::Full {
                    module.sections = Some(sections.remove(&module.id).unwrap_or_default());
                }

                Ok(module)
            })
            .collect()
    }

    async fn build_sections(
        &self,
        sections: Vec<entity::section::Model>,
    ) -> Result<Vec<Section>, AppError> {
        let section_repo = SectionRepository::new(self.db);
        let section_ids: Vec<i32> = sections.iter().map(|s| s.id).collect();
        let question_ids: Vec<i32> = sections.iter().filter_map(|s| s.question_id).collect();

        let mut options: HashMap<i32, Vec<entity::question_option::Model>> = HashMap::new();
        for option in section_repo.get_options(&question_ids).await? {
            options.entry(option.question_id).or_default().push(option);
        }

        let mut questions: HashMap<i32, Question> = HashMap::new();
        for question in section_repo.get_questions(&question_ids).await? {
            let question_options = options.remove(&question.id).unwrap_or_default();
            let question = Question::from_entity(question, question_options)?;
            questions.insert(question.id, question);
        }

        let progress: HashMap<i32, entity::user_section_progress::Model> = match self.user_id {
            Some(user_id) => ProgressRepository::new(self.db)
                .section_progress_for(user_id, &section_ids)
                .await?
                .into_iter()
                .map(|p| (p.section_id, p))
                .collect(),
            None => HashMap::new(),
        };

        sections
            .into_iter()
            .map(|entity| {
                let question_id = entity.question_id;
                let mut section = Section::from_entity(entity)?;
                section.question = question_id.and_then(|id| questions.get(&id).cloned());

                if self.user_id.is_some() {
                    section.progress = Some(
                        progress
                            .get(&section.id)
                            .map(SectionProgress::from_entity)
                            .unwrap_or_default(),
                    );
                }

                Ok(section)
            })
            .collect()
    }
}

/// Resolves enrollment pointers against the assembled units.
///
/// Pointers that are unset or no longer resolve become zero-value references.
fn learner_position(
    units: &[Unit],
    unit_id: Option<i32>,
    module_id: Option<i32>,
) -> LearnerPosition {
    let current_unit = unit_id
        .and_then(|id| units.iter().find(|u| u.id == id))
        .map(|u| UnitRef {
            id: u.id,
            unit_number: u.unit_number,
            name: u.name.clone(),
        })
        .unwrap_or_default();

    let current_module = module_id
        .and_then(|id| {
            units
                .iter()
                .flat_map(|u| u.modules.iter())
                .find(|m| m.id == id)
        })
        .map(|m| ModuleRef {
            id: m.id,
            module_number: m.module_number,
            name: m.name.clone(),
        })
        .unwrap_or_default();

    LearnerPosition {
        current_unit,
        current_module,
    }
}
