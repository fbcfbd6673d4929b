//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories take the ids of the parents they hang off, so
//! a test creates its hierarchy top-down or uses `helpers::create_course_tree`.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::create_user(&db).await?;
//!     let tree = factory::create_course_tree(&db).await?;
//!     factory::enroll_user(&db, user.id, tree.course.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users and admins
//! - `course` - Courses, authors and tags
//! - `unit` - Units within a course
//! - `module` - Modules within a unit
//! - `section` - Text, video and question sections
//! - `progress` - Enrollments and module progress rows
//! - `achievement` - Achievements and grants
//! - `notification` - User notifications
//! - `helpers` - Id counter and the full course tree helper

pub mod achievement;
pub mod course;
pub mod helpers;
pub mod module;
pub mod notification;
pub mod progress;
pub mod section;
pub mod unit;
pub mod user;

pub use achievement::{create_achievement, grant_achievement};
pub use course::create_course;
pub use helpers::{create_course_tree, CourseTree};
pub use module::create_module;
pub use notification::create_notification;
pub use progress::{create_module_progress, enroll_user};
pub use unit::create_unit;
pub use user::{create_admin, create_user};
