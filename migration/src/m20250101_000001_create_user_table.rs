use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_uniq(User::Username))
                    .col(string_uniq(User::Email))
                    .col(string_null(User::OauthId).unique_key())
                    .col(string_null(User::PasswordHash))
                    .col(string(User::Role).default("user"))
                    .col(string_null(User::FirstName))
                    .col(string_null(User::LastName))
                    .col(string_null(User::ProfilePictureUrl))
                    .col(text_null(User::Bio))
                    .col(string_null(User::Location))
                    .col(boolean(User::IsActive).default(true))
                    .col(boolean(User::IsEmailVerified).default(false))
                    .col(integer(User::CurrentStreak).default(0))
                    .col(integer(User::LongestStreak).default(0))
                    .col(date_null(User::LastStreakDate))
                    .col(timestamp_with_time_zone_null(User::LastLoginAt))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserPreference::Table)
                    .if_not_exists()
                    .col(integer(UserPreference::UserId).primary_key())
                    .col(string(UserPreference::Theme).default("system"))
                    .col(string(UserPreference::Lang).default("en"))
                    .col(string(UserPreference::Timezone).default("UTC"))
                    .col(
                        timestamp_with_time_zone(UserPreference::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_preferences_user_id")
                            .from(UserPreference::Table, UserPreference::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserPreference::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    OauthId,
    PasswordHash,
    Role,
    FirstName,
    LastName,
    ProfilePictureUrl,
    Bio,
    Location,
    IsActive,
    IsEmailVerified,
    CurrentStreak,
    LongestStreak,
    LastStreakDate,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum UserPreference {
    #[sea_orm(iden = "user_preferences")]
    Table,
    UserId,
    Theme,
    Lang,
    Timezone,
    UpdatedAt,
}
