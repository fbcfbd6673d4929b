//! SeaORM entities for the AlgoLearn schema.
//!
//! One module per table. Enumerated columns (roles, difficulty levels, section
//! types, progress statuses) are stored as plain strings and parsed into domain
//! enums by the server's model layer.

pub mod prelude;

pub mod achievement;
pub mod course;
pub mod course_author;
pub mod course_tag;
pub mod module;
pub mod notification;
pub mod question;
pub mod question_option;
pub mod section;
pub mod tag;
pub mod unit;
pub mod user;
pub mod user_achievement;
pub mod user_course;
pub mod user_module_progress;
pub mod user_preference;
pub mod user_question_answer;
pub mod user_section_progress;
