//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// A course with one unit holding one module of three sections.
pub struct CourseTree {
    pub course: entity::course::Model,
    pub unit: entity::unit::Model,
    pub module: entity::module::Model,
    /// Text, video and question sections at positions 1, 2 and 3.
    pub sections: Vec<entity::section::Model>,
    pub question: entity::question::Model,
    pub correct_option: entity::question_option::Model,
    pub incorrect_option: entity::question_option::Model,
}

/// Creates a complete course hierarchy with all dependencies.
///
/// This is a convenience method that creates:
/// 1. Course
/// 2. Unit number 1
/// 3. Module number 1
/// 4. A text, a video and a question section
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(CourseTree)` - Every created entity
/// - `Err(DbErr)` - Database error during creation
pub async fn create_course_tree(db: &DatabaseConnection) -> Result<CourseTree, DbErr> {
    let course = crate::factory::course::create_course(db).await?;
    let unit = crate::factory::unit::create_unit(db, course.id, 1).await?;
    let module = crate::factory::module::create_module(db, unit.id, 1).await?;

    let text = crate::factory::section::create_text_section(db, module.id, 1).await?;
    let video = crate::factory::section::create_video_section(db, module.id, 2).await?;
    let (question_section, question, correct_option, incorrect_option) =
        crate::factory::section::create_question_section(db, module.id, 3).await?;

    Ok(CourseTree {
        course,
        unit,
        module,
        sections: vec![text, video, question_section],
        question,
        correct_option,
        incorrect_option,
    })
}
