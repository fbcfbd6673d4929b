//! Notification data repository.
//!
//! Every read and write except creation is scoped to the owning user, so a
//! notification id belonging to someone else behaves as if it did not exist.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{notification::CreateNotificationParams, page::PageRequest};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateNotificationParams,
    ) -> Result<entity::notification::Model, DbErr> {
        entity::notification::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets one page of a user's notifications, newest first.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the notifications
    /// - `unread_only` - Restrict to notifications not yet read
    /// - `request` - Page to fetch
    ///
    /// # Returns
    /// - `Ok((notifications, total))` - Page and count across all pages
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_for_user_paginated(
        &self,
        user_id: i32,
        unread_only: bool,
        request: PageRequest,
    ) -> Result<(Vec<entity::notification::Model>, u64), DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id));

        if unread_only {
            query = query.filter(entity::notification::Column::IsRead.eq(false));
        }

        let paginator = query
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, request.page_size);

        let total = paginator.num_items().await?;
        let notifications = paginator.fetch_page(request.index()).await?;

        Ok((notifications, total))
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Marks one of the user's notifications as read.
    ///
    /// # Returns
    /// - `Ok(1)` - The notification belongs to the user
    /// - `Ok(0)` - Unknown id or owned by someone else
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_read(&self, user_id: i32, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .col_expr(
                entity::notification::Column::IsRead,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks every unread notification of the user as read, returning how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .col_expr(
                entity::notification::Column::IsRead,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, user_id: i32, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
