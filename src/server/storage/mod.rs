//! Object store access.
//!
//! `ObjectStore` is the only capability trait in the server: the S3 backend is used
//! in production and an in-memory backend in tests.

#[cfg(test)]
pub mod memory;
pub mod s3;

use std::time::Duration;

use async_trait::async_trait;

use crate::server::error::storage::StorageError;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns a URL that accepts a single `PUT` of `key` with the given content
    /// type until `expires_in` elapses.
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;

    /// Removes `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Counts the objects whose key starts with `prefix`.
    async fn count(&self, prefix: &str) -> Result<u64, StorageError>;
}
