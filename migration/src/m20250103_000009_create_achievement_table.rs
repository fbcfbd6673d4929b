use sea_orm_migration::{prelude::*, schema::*};

use super::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Achievement::Table)
                    .if_not_exists()
                    .col(pk_auto(Achievement::Id))
                    .col(string_uniq(Achievement::Name))
                    .col(text(Achievement::Description))
                    .col(integer(Achievement::Points).default(0))
                    .col(
                        timestamp_with_time_zone(Achievement::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Achievement::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserAchievement::Table)
                    .if_not_exists()
                    .col(integer(UserAchievement::UserId))
                    .col(integer(UserAchievement::AchievementId))
                    .col(
                        timestamp_with_time_zone(UserAchievement::AchievedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserAchievement::UserId)
                            .col(UserAchievement::AchievementId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_achievements_user_id")
                            .from(UserAchievement::Table, UserAchievement::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_achievements_achievement_id")
                            .from(UserAchievement::Table, UserAchievement::AchievementId)
                            .to(Achievement::Table, Achievement::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAchievement::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Achievement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Achievement {
    #[sea_orm(iden = "achievements")]
    Table,
    Id,
    Name,
    Description,
    Points,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum UserAchievement {
    #[sea_orm(iden = "user_achievements")]
    Table,
    UserId,
    AchievementId,
    AchievedAt,
}
