//! Presigned upload domain model.

use chrono::{DateTime, Utc};

use crate::model::storage::PresignedUploadDto;

#[derive(Debug, Clone, PartialEq)]
pub struct PresignedUpload {
    pub url: String,
    pub key: String,
    pub expires_at: DateTime<Utc>,
}

impl PresignedUpload {
    pub fn into_dto(self) -> PresignedUploadDto {
        PresignedUploadDto {
            url: self.url,
            key: self.key,
            expires_at: self.expires_at,
        }
    }
}
