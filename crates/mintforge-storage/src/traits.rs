//! Storage abstraction trait
//!
//! This module defines the [`BucketStore`] trait the upload service talks to.
//! The production implementation is S3; tests substitute in-memory doubles.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Minimal interface onto a bucket of objects.
///
/// The upload service owns key construction, content-type inference, and
/// URL policy; a `BucketStore` only creates objects and signs read access.
/// Implementations must be safe to share across tasks — the service holds
/// one instance behind an `Arc` for its whole lifetime.
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Create (or overwrite) the object at `key` with the given content type.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()>;

    /// Produce a time-limited URL granting read access to `key`.
    ///
    /// No existence check is performed; signing a key with no object behind
    /// it is allowed and the backing store rejects the access instead.
    async fn signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;
}
