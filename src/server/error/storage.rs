use thiserror::Error;

/// Failures talking to the object store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The presigning configuration was rejected, typically an expiry out of range.
    #[error("Invalid presigning configuration: {0}")]
    PresignConfig(String),

    /// The object store rejected or failed a request.
    #[error("Object store request failed for '{key}': {reason}")]
    Request { key: String, reason: String },
}
