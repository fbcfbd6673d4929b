use std::{collections::BTreeSet, sync::Mutex, time::Duration};

use async_trait::async_trait;

use crate::server::{error::storage::StorageError, storage::ObjectStore};

/// Keeps object keys in memory and hands out fake presigned URLs.
#[derive(Default)]
pub struct MemoryObjectStore {
    keys: Mutex<BTreeSet<String>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `key` as if an upload had completed.
    pub fn insert(&self, key: impl Into<String>) {
        if let Ok(mut keys) = self.keys.lock() {
            keys.insert(key.into());
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys
            .lock()
            .map(|keys| keys.contains(key))
            .unwrap_or(false)
    }

    fn poisoned(key: &str) -> StorageError {
        StorageError::Request {
            key: key.to_string(),
            reason: "memory store lock poisoned".to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        Ok(format!(
            "memory://bucket/{}?content-type={}&expires={}",
            key,
            content_type,
            expires_in.as_secs()
        ))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut keys = self.keys.lock().map_err(|_| Self::poisoned(key))?;
        keys.remove(key);
        Ok(())
    }

    async fn count(&self, prefix: &str) -> Result<u64, StorageError> {
        let keys = self.keys.lock().map_err(|_| Self::poisoned(prefix))?;
        Ok(keys.iter().filter(|key| key.starts_with(prefix)).count() as u64)
    }
}
