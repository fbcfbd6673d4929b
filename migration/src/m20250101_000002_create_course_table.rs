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
                    .table(Course::Table)
                    .if_not_exists()
                    .col(pk_auto(Course::Id))
                    .col(string(Course::Name))
                    .col(text(Course::Description))
                    .col(text_null(Course::Requirements))
                    .col(text_null(Course::WhatYouLearn))
                    .col(string_null(Course::BackgroundColor))
                    .col(string_null(Course::IconUrl))
                    .col(integer(Course::Duration).default(0))
                    .col(string(Course::DifficultyLevel).default("beginner"))
                    .col(double(Course::Rating).default(0.0))
                    .col(
                        timestamp_with_time_zone(Course::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Course::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(pk_auto(Tag::Id))
                    .col(string_uniq(Tag::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseTag::Table)
                    .if_not_exists()
                    .col(integer(CourseTag::CourseId))
                    .col(integer(CourseTag::TagId))
                    .primary_key(
                        Index::create()
                            .col(CourseTag::CourseId)
                            .col(CourseTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_tags_course_id")
                            .from(CourseTag::Table, CourseTag::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_tags_tag_id")
                            .from(CourseTag::Table, CourseTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseAuthor::Table)
                    .if_not_exists()
                    .col(integer(CourseAuthor::CourseId))
                    .col(integer(CourseAuthor::UserId))
                    .primary_key(
                        Index::create()
                            .col(CourseAuthor::CourseId)
                            .col(CourseAuthor::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_authors_course_id")
                            .from(CourseAuthor::Table, CourseAuthor::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_authors_user_id")
                            .from(CourseAuthor::Table, CourseAuthor::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseAuthor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Course {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
    Description,
    Requirements,
    WhatYouLearn,
    BackgroundColor,
    IconUrl,
    Duration,
    DifficultyLevel,
    Rating,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Tag {
    #[sea_orm(iden = "tags")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum CourseTag {
    #[sea_orm(iden = "course_tags")]
    Table,
    CourseId,
    TagId,
}

#[derive(DeriveIden)]
pub enum CourseAuthor {
    #[sea_orm(iden = "course_authors")]
    Table,
    CourseId,
    UserId,
}
