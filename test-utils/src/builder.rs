use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Course, Unit};
///
/// let test = TestBuilder::new()
///     .with_table(Course)
///     .with_table(Unit)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// CREATE INDEX statements executed after every table exists.
    indexes: Vec<IndexCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after the tables they reference).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds a raw index statement, created once all tables exist.
    pub fn with_index(mut self, index: IndexCreateStatement) -> Self {
        self.indexes.push(index);
        self
    }

    /// Adds the user and user preference tables.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User).with_table(UserPreference)
    }

    /// Adds every table of the course content hierarchy.
    ///
    /// Includes users (course authors), tags, courses, units, modules, questions with
    /// their options and sections, along with the unique ordinal indexes on units and
    /// modules that the production migrations create.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_content_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Course)
            .with_table(Tag)
            .with_table(CourseTag)
            .with_table(CourseAuthor)
            .with_table(Unit)
            .with_table(Module)
            .with_table(Question)
            .with_table(QuestionOption)
            .with_table(Section)
            .with_index(
                Index::create()
                    .name("idx_units_course_id_unit_number")
                    .table(Unit)
                    .col(entity::unit::Column::CourseId)
                    .col(entity::unit::Column::UnitNumber)
                    .unique()
                    .to_owned(),
            )
            .with_index(
                Index::create()
                    .name("idx_modules_unit_id_module_number")
                    .table(Module)
                    .col(entity::module::Column::UnitId)
                    .col(entity::module::Column::ModuleNumber)
                    .unique()
                    .to_owned(),
            )
    }

    /// Adds the content hierarchy plus every learner progress table.
    pub fn with_progress_tables(self) -> Self {
        self.with_content_tables()
            .with_table(UserCourse)
            .with_table(UserModuleProgress)
            .with_table(UserSectionProgress)
            .with_table(UserQuestionAnswer)
    }

    /// Adds every table in the schema.
    ///
    /// Use this for router-level tests that exercise several resource groups.
    pub fn with_all_tables(self) -> Self {
        self.with_progress_tables()
            .with_table(Achievement)
            .with_table(UserAchievement)
            .with_table(Notification)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}
