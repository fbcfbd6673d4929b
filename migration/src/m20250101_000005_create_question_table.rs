use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Question::Table)
                    .if_not_exists()
                    .col(pk_auto(Question::Id))
                    .col(text(Question::Question))
                    .col(string(Question::QuestionType).default("multiple_choice"))
                    .col(string(Question::DifficultyLevel).default("beginner"))
                    .col(
                        timestamp_with_time_zone(Question::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuestionOption::Table)
                    .if_not_exists()
                    .col(pk_auto(QuestionOption::Id))
                    .col(integer(QuestionOption::QuestionId))
                    .col(text(QuestionOption::Content))
                    .col(boolean(QuestionOption::IsCorrect).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_options_question_id")
                            .from(QuestionOption::Table, QuestionOption::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuestionOption::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Question::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Question {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    Question,
    QuestionType,
    DifficultyLevel,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum QuestionOption {
    #[sea_orm(iden = "question_options")]
    Table,
    Id,
    QuestionId,
    Content,
    IsCorrect,
}
