use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250101_000001_create_user_table::User, m20250101_000002_create_course_table::Course,
    m20250101_000003_create_unit_table::Unit, m20250101_000004_create_module_table::Module,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCourse::Table)
                    .if_not_exists()
                    .col(integer(UserCourse::UserId))
                    .col(integer(UserCourse::CourseId))
                    .col(integer_null(UserCourse::CurrentUnitId))
                    .col(integer_null(UserCourse::CurrentModuleId))
                    .col(
                        timestamp_with_time_zone(UserCourse::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(UserCourse::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserCourse::UserId)
                            .col(UserCourse::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_courses_user_id")
                            .from(UserCourse::Table, UserCourse::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_courses_course_id")
                            .from(UserCourse::Table, UserCourse::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_courses_current_unit_id")
                            .from(UserCourse::Table, UserCourse::CurrentUnitId)
                            .to(Unit::Table, Unit::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_courses_current_module_id")
                            .from(UserCourse::Table, UserCourse::CurrentModuleId)
                            .to(Module::Table, Module::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCourse::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserCourse {
    #[sea_orm(iden = "user_courses")]
    Table,
    UserId,
    CourseId,
    CurrentUnitId,
    CurrentModuleId,
    CreatedAt,
    UpdatedAt,
}
