//! Upload presigning and object management.
//!
//! Upload keys are generated server-side as `<folder>/<uuid>-<filename>` with the
//! filename reduced to a safe character set, so clients never choose the full key.

use chrono::Utc;

use crate::{
    model::storage::StorageFolder,
    server::{error::AppError, model::storage::PresignedUpload, storage::ObjectStore},
};

/// How long a presigned upload URL stays valid.
pub const PRESIGN_TTL: std::time::Duration = std::time::Duration::from_secs(15 * 60);

const MAX_FILENAME_LEN: usize = 100;

pub struct StorageService<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> StorageService<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Presigns a single upload into `folder`.
    ///
    /// # Returns
    /// - `Ok(PresignedUpload)` - URL, generated key and expiry
    /// - `Err(AppError::StorageErr)` - The store could not presign
    pub async fn presign_upload(
        &self,
        folder: StorageFolder,
        filename: &str,
        content_type: &str,
    ) -> Result<PresignedUpload, AppError> {
        let key = format!(
            "{}/{}-{}",
            folder.as_str(),
            uuid::Uuid::new_v4(),
            sanitize_filename(filename)
        );
        let expires_at = Utc::now()
            + chrono::Duration::from_std(PRESIGN_TTL)
                .unwrap_or_else(|_| chrono::Duration::minutes(15));

        let url = self
            .store
            .presign_put(&key, content_type, PRESIGN_TTL)
            .await
            .inspect_err(|e| tracing::error!(%key, "Failed to presign upload: {}", e))?;

        Ok(PresignedUpload {
            url,
            key,
            expires_at,
        })
    }

    /// Deletes an object.
    ///
    /// # Returns
    /// - `Ok(())` - Deleted, or the key did not exist
    /// - `Err(AppError::BadRequest)` - The key is empty, absolute or traverses upward
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
            return Err(AppError::BadRequest(format!("Invalid object key '{}'", key)));
        }

        self.store.delete(key).await?;

        tracing::info!(%key, "Deleted object");

        Ok(())
    }

    pub async fn count(&self, prefix: &str) -> Result<u64, AppError> {
        Ok(self.store.count(prefix).await?)
    }
}

/// Reduces a client filename to ASCII alphanumerics, `.`, `-` and `_`.
fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .take(MAX_FILENAME_LEN)
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::storage::memory::MemoryObjectStore;

    #[test]
    fn sanitizes_unsafe_characters() {
        assert_eq!(sanitize_filename("my photo (1).png"), "my-photo--1-.png");
    }

    #[test]
    fn strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\a.jpg"), "a.jpg");
    }

    #[test]
    fn falls_back_for_empty_name() {
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[tokio::test]
    async fn presigns_key_under_folder() {
        let store = MemoryObjectStore::new();
        let service = StorageService::new(&store);

        let upload = service
            .presign_upload(StorageFolder::ProfilePictures, "me.png", "image/png")
            .await
            .unwrap();

        assert!(upload.key.starts_with("profile-pictures/"));
        assert!(upload.key.ends_with("-me.png"));
        assert!(upload.url.contains(&upload.key));
        assert!(upload.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn rejects_traversing_key() {
        let store = MemoryObjectStore::new();
        let service = StorageService::new(&store);

        let result = service.delete("courses/../secrets").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn counts_by_prefix() {
        let store = MemoryObjectStore::new();
        store.insert("courses/a.png");
        store.insert("courses/b.png");
        store.insert("achievements/c.png");
        let service = StorageService::new(&store);

        assert_eq!(service.count("courses/").await.unwrap(), 2);

        service.delete("courses/a.png").await.unwrap();
        assert!(!store.contains("courses/a.png"));
        assert_eq!(service.count("courses/").await.unwrap(), 1);
    }
}
