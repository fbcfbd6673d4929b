//! Notification service for business logic.
//!
//! Every user-facing operation is scoped to the caller; a notification owned by
//! someone else behaves as if it did not exist.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{notification::NotificationRepository, user::UserRepository},
    error::AppError,
    model::{
        notification::{CreateNotificationParams, Notification},
        page::{Page, PageRequest},
    },
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        user_id: i32,
        unread_only: bool,
        request: PageRequest,
    ) -> Result<Page<Notification>, AppError> {
        let (rows, total) = NotificationRepository::new(self.db)
            .get_for_user_paginated(user_id, unread_only, request)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(Notification::from_entity).collect(),
            total,
            request,
        ))
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .unread_count(user_id)
            .await?)
    }

    /// Sends a notification to a user.
    ///
    /// # Returns
    /// - `Ok(Notification)` - The stored notification, unread
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn create(&self, params: CreateNotificationParams) -> Result<Notification, AppError> {
        if UserRepository::new(self.db)
            .find_by_id(params.user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let notification = NotificationRepository::new(self.db).create(params).await?;

        Ok(Notification::from_entity(notification))
    }

    pub async fn mark_read(&self, user_id: i32, id: i32) -> Result<(), AppError> {
        if NotificationRepository::new(self.db)
            .mark_read(user_id, id)
            .await?
            == 0
        {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }

    /// Marks all of the user's unread notifications read, returning how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    pub async fn delete(&self, user_id: i32, id: i32) -> Result<(), AppError> {
        if NotificationRepository::new(self.db).delete(user_id, id).await? == 0 {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }
}
