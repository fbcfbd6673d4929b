use sea_orm_migration::{prelude::*, schema::*};

use super::m20250101_000003_create_unit_table::Unit;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Module::Table)
                    .if_not_exists()
                    .col(pk_auto(Module::Id))
                    .col(integer(Module::UnitId))
                    .col(integer(Module::ModuleNumber))
                    .col(string(Module::Name))
                    .col(text(Module::Description).default(""))
                    .col(
                        timestamp_with_time_zone(Module::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Module::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_modules_unit_id")
                            .from(Module::Table, Module::UnitId)
                            .to(Unit::Table, Unit::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_modules_unit_id_module_number")
                    .table(Module::Table)
                    .col(Module::UnitId)
                    .col(Module::ModuleNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Module::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Module {
    #[sea_orm(iden = "modules")]
    Table,
    Id,
    UnitId,
    ModuleNumber,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
