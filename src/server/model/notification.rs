use chrono::{DateTime, Utc};

use crate::model::notification::{CreateNotificationDto, NotificationDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            content: entity.content,
            is_read: entity.is_read,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            title: self.title,
            content: self.content,
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateNotificationParams {
    pub user_id: i32,
    pub title: String,
    pub content: String,
}

impl From<CreateNotificationDto> for CreateNotificationParams {
    fn from(dto: CreateNotificationDto) -> Self {
        Self {
            user_id: dto.user_id,
            title: dto.title,
            content: dto.content,
        }
    }
}
