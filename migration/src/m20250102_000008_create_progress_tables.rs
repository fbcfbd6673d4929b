use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250101_000001_create_user_table::User,
    m20250101_000004_create_module_table::Module,
    m20250101_000005_create_question_table::{Question, QuestionOption},
    m20250101_000006_create_section_table::Section,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserModuleProgress::Table)
                    .if_not_exists()
                    .col(integer(UserModuleProgress::UserId))
                    .col(integer(UserModuleProgress::ModuleId))
                    .col(integer(UserModuleProgress::CurrentPosition).default(0))
                    .col(integer(UserModuleProgress::Progress).default(0))
                    .col(string(UserModuleProgress::Status).default("uninitiated"))
                    .col(
                        timestamp_with_time_zone(UserModuleProgress::StartedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(
                        UserModuleProgress::CompletedAt,
                    ))
                    .col(
                        timestamp_with_time_zone(UserModuleProgress::LastAccessed)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserModuleProgress::UserId)
                            .col(UserModuleProgress::ModuleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_module_progress_user_id")
                            .from(UserModuleProgress::Table, UserModuleProgress::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_module_progress_module_id")
                            .from(UserModuleProgress::Table, UserModuleProgress::ModuleId)
                            .to(Module::Table, Module::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSectionProgress::Table)
                    .if_not_exists()
                    .col(integer(UserSectionProgress::UserId))
                    .col(integer(UserSectionProgress::SectionId))
                    .col(integer(UserSectionProgress::ModuleId))
                    .col(timestamp_with_time_zone_null(UserSectionProgress::SeenAt))
                    .col(timestamp_with_time_zone_null(
                        UserSectionProgress::StartedAt,
                    ))
                    .col(timestamp_with_time_zone_null(
                        UserSectionProgress::CompletedAt,
                    ))
                    .primary_key(
                        Index::create()
                            .col(UserSectionProgress::UserId)
                            .col(UserSectionProgress::SectionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_section_progress_user_id")
                            .from(UserSectionProgress::Table, UserSectionProgress::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_section_progress_section_id")
                            .from(UserSectionProgress::Table, UserSectionProgress::SectionId)
                            .to(Section::Table, Section::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserQuestionAnswer::Table)
                    .if_not_exists()
                    .col(integer(UserQuestionAnswer::UserId))
                    .col(integer(UserQuestionAnswer::QuestionId))
                    .col(integer(UserQuestionAnswer::OptionId))
                    .col(boolean(UserQuestionAnswer::IsCorrect))
                    .col(
                        timestamp_with_time_zone(UserQuestionAnswer::AnsweredAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserQuestionAnswer::UserId)
                            .col(UserQuestionAnswer::QuestionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_question_answers_user_id")
                            .from(UserQuestionAnswer::Table, UserQuestionAnswer::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_question_answers_question_id")
                            .from(UserQuestionAnswer::Table, UserQuestionAnswer::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_question_answers_option_id")
                            .from(UserQuestionAnswer::Table, UserQuestionAnswer::OptionId)
                            .to(QuestionOption::Table, QuestionOption::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserQuestionAnswer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserSectionProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserModuleProgress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserModuleProgress {
    #[sea_orm(iden = "user_module_progress")]
    Table,
    UserId,
    ModuleId,
    CurrentPosition,
    Progress,
    Status,
    StartedAt,
    CompletedAt,
    LastAccessed,
}

#[derive(DeriveIden)]
pub enum UserSectionProgress {
    #[sea_orm(iden = "user_section_progress")]
    Table,
    UserId,
    SectionId,
    ModuleId,
    SeenAt,
    StartedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
pub enum UserQuestionAnswer {
    #[sea_orm(iden = "user_question_answers")]
    Table,
    UserId,
    QuestionId,
    OptionId,
    IsCorrect,
    AnsweredAt,
}
