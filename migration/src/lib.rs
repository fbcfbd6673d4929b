pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_course_table;
mod m20250101_000003_create_unit_table;
mod m20250101_000004_create_module_table;
mod m20250101_000005_create_question_table;
mod m20250101_000006_create_section_table;
mod m20250102_000007_create_user_course_table;
mod m20250102_000008_create_progress_tables;
mod m20250103_000009_create_achievement_table;
mod m20250103_000010_create_notification_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_course_table::Migration),
            Box::new(m20250101_000003_create_unit_table::Migration),
            Box::new(m20250101_000004_create_module_table::Migration),
            Box::new(m20250101_000005_create_question_table::Migration),
            Box::new(m20250101_000006_create_section_table::Migration),
            Box::new(m20250102_000007_create_user_course_table::Migration),
            Box::new(m20250102_000008_create_progress_tables::Migration),
            Box::new(m20250103_000009_create_achievement_table::Migration),
            Box::new(m20250103_000010_create_notification_table::Migration),
        ]
    }
}
