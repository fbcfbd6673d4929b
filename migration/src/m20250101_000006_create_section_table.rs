use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250101_000004_create_module_table::Module,
    m20250101_000005_create_question_table::Question,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(pk_auto(Section::Id))
                    .col(integer(Section::ModuleId))
                    .col(string(Section::SectionType))
                    .col(integer(Section::Position))
                    .col(text_null(Section::Content))
                    .col(string_null(Section::Url))
                    .col(integer_null(Section::QuestionId))
                    .col(
                        timestamp_with_time_zone(Section::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Section::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sections_module_id")
                            .from(Section::Table, Section::ModuleId)
                            .to(Module::Table, Module::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sections_question_id")
                            .from(Section::Table, Section::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sections_module_id_position")
                    .table(Section::Table)
                    .col(Section::ModuleId)
                    .col(Section::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Section::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Section {
    #[sea_orm(iden = "sections")]
    Table,
    Id,
    ModuleId,
    SectionType,
    Position,
    Content,
    Url,
    QuestionId,
    CreatedAt,
    UpdatedAt,
}
