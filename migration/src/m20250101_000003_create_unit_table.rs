use sea_orm_migration::{prelude::*, schema::*};

use super::m20250101_000002_create_course_table::Course;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Unit::Table)
                    .if_not_exists()
                    .col(pk_auto(Unit::Id))
                    .col(integer(Unit::CourseId))
                    .col(integer(Unit::UnitNumber))
                    .col(string(Unit::Name))
                    .col(text(Unit::Description).default(""))
                    .col(
                        timestamp_with_time_zone(Unit::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Unit::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_units_course_id")
                            .from(Unit::Table, Unit::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_units_course_id_unit_number")
                    .table(Unit::Table)
                    .col(Unit::CourseId)
                    .col(Unit::UnitNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Unit::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Unit {
    #[sea_orm(iden = "units")]
    Table,
    Id,
    CourseId,
    UnitNumber,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
